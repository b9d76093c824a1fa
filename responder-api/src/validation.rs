//! Request body schemas.
//!
//! Bodies are checked against a fixed [`Schema`] before they are turned into
//! typed requests. Messages follow the wording clients of the service already
//! match on, e.g. `"author" is required` or `"answers[0].summary" must be a
//! string`. Fields are checked in schema order, array items in index order,
//! and keys the schema does not name are rejected last.

use crate::error::ApiError;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Rule {
    RequiredString,
    OptionalArrayOf(&'static [Field]),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Field {
    name: &'static str,
    rule: Rule,
}

const ANSWER_FIELDS: &[Field] = &[
    Field {
        name: "author",
        rule: Rule::RequiredString,
    },
    Field {
        name: "summary",
        rule: Rule::RequiredString,
    },
];

const QUESTION_FIELDS: &[Field] = &[
    Field {
        name: "author",
        rule: Rule::RequiredString,
    },
    Field {
        name: "summary",
        rule: Rule::RequiredString,
    },
    Field {
        name: "answers",
        rule: Rule::OptionalArrayOf(ANSWER_FIELDS),
    },
];

/// The set of keys an object body may carry.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    fields: &'static [Field],
}

pub const ANSWER_SCHEMA: Schema = Schema {
    fields: ANSWER_FIELDS,
};

pub const QUESTION_SCHEMA: Schema = Schema {
    fields: QUESTION_FIELDS,
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationOptions {
    /// Collect every issue instead of stopping at the first one.
    pub report_all: bool,
}

struct Issues {
    report_all: bool,
    messages: Vec<String>,
}

impl Issues {
    fn push(&mut self, message: String) {
        self.messages.push(message);
    }

    fn should_stop(&self) -> bool {
        !self.report_all && !self.messages.is_empty()
    }
}

pub fn validate<T: DeserializeOwned>(
    body: Value,
    schema: &Schema,
    options: ValidationOptions,
) -> Result<T, ApiError> {
    let messages = check(&body, schema, options);
    if !messages.is_empty() {
        return Err(ApiError::Validation(messages));
    }

    serde_json::from_value(body).map_err(|e| ApiError::Validation(vec![e.to_string()]))
}

/// Returns the issues found in `body`, empty when it conforms.
pub fn check(body: &Value, schema: &Schema, options: ValidationOptions) -> Vec<String> {
    let mut issues = Issues {
        report_all: options.report_all,
        messages: Vec::new(),
    };
    check_object(body, None, schema.fields, &mut issues);
    issues.messages
}

fn field_path(prefix: Option<&str>, name: &str) -> String {
    match prefix {
        Some(prefix) => format!("{prefix}.{name}"),
        None => name.to_string(),
    }
}

fn check_object(value: &Value, prefix: Option<&str>, fields: &[Field], issues: &mut Issues) {
    let Some(map) = value.as_object() else {
        issues.push(format!(
            "\"{}\" must be of type object",
            prefix.unwrap_or("value")
        ));
        return;
    };

    for field in fields {
        if issues.should_stop() {
            return;
        }
        check_field(map, prefix, field, issues);
    }

    for key in map.keys() {
        if issues.should_stop() {
            return;
        }
        if !fields.iter().any(|field| field.name == key.as_str()) {
            issues.push(format!("\"{}\" is not allowed", field_path(prefix, key)));
        }
    }
}

fn check_field(map: &Map<String, Value>, prefix: Option<&str>, field: &Field, issues: &mut Issues) {
    let path = field_path(prefix, field.name);

    match (map.get(field.name), field.rule) {
        (None, Rule::RequiredString) => issues.push(format!("\"{path}\" is required")),
        (None, Rule::OptionalArrayOf(_)) => {}
        (Some(Value::String(s)), Rule::RequiredString) if s.is_empty() => {
            issues.push(format!("\"{path}\" is not allowed to be empty"))
        }
        (Some(Value::String(_)), Rule::RequiredString) => {}
        (Some(_), Rule::RequiredString) => issues.push(format!("\"{path}\" must be a string")),
        (Some(Value::Array(items)), Rule::OptionalArrayOf(item_fields)) => {
            for (index, item) in items.iter().enumerate() {
                if issues.should_stop() {
                    return;
                }
                let item_path = format!("{path}[{index}]");
                check_object(item, Some(&item_path), item_fields, issues);
            }
        }
        (Some(_), Rule::OptionalArrayOf(_)) => issues.push(format!("\"{path}\" must be an array")),
    }
}
