use ts_rs::TS;

/// Every type exposed over the HTTP API, in the order they are emitted.
pub const API_TYPE_NAMES: &[&str] = &[
    "Answer",
    "Question",
    "CreateAnswerRequest",
    "CreateQuestionRequest",
    "ErrorResponse",
    "ErrorsResponse",
    "WelcomeResponse",
];

pub fn generate_typescript_definitions(
    type_names: &[&str],
) -> Result<String, Box<dyn std::error::Error>> {
    if type_names.is_empty() {
        return Err("No type names provided".into());
    }

    let mut definitions = Vec::new();

    for name in type_names {
        let cleaned = clean_type(export_type(name)?);

        if !cleaned.trim().is_empty() {
            definitions.push(cleaned);
        }
    }

    Ok(definitions.join("\n\n"))
}

fn export_type(name: &str) -> Result<String, Box<dyn std::error::Error>> {
    use crate::*;

    let result = match name {
        "Answer" => Answer::export_to_string()?,
        "Question" => Question::export_to_string()?,
        "CreateAnswerRequest" => CreateAnswerRequest::export_to_string()?,
        "CreateQuestionRequest" => CreateQuestionRequest::export_to_string()?,
        "ErrorResponse" => ErrorResponse::export_to_string()?,
        "ErrorsResponse" => ErrorsResponse::export_to_string()?,
        "WelcomeResponse" => WelcomeResponse::export_to_string()?,
        _ => {
            return Err(format!(
                "Unknown type: '{}'. Available types: {}",
                name,
                API_TYPE_NAMES.join(", ")
            )
            .into());
        }
    };

    Ok(result)
}

fn clean_type(mut type_def: String) -> String {
    type_def.retain(|c| c != '\r');

    let filtered: Vec<&str> = type_def
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.starts_with("import type")
                && !trimmed.starts_with("// This file was generated")
        })
        .collect();

    let result = filtered.join("\n").trim().to_string();
    if result.is_empty() {
        result
    } else {
        format!("{}\n", result)
    }
}
