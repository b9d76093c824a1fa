use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use clap::Parser;
use responder_api::config::ApiConfig;
use responder_api::routes::configure_routes;
use responder_api::store::QuestionStore;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "responder-api", version, about = "Questions and answers over HTTP")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = ApiConfig::load(cli.config.as_deref()).context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    let store = QuestionStore::open_file(&config.storage.path)
        .await
        .with_context(|| {
            format!(
                "Failed to open question store at {}",
                config.storage.path.display()
            )
        })?;
    info!(
        path = %config.storage.path.display(),
        questions = store.count().await,
        "Question store loaded"
    );

    let store = web::Data::new(store);
    let validation = web::Data::new(config.validation.options());

    let bind_addr = config.server.bind_address();
    info!("Responder app listening on http://{}", bind_addr);

    HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .app_data(validation.clone())
            .wrap(Logger::default())
            .configure(configure_routes)
    })
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
