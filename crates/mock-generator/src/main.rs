//! Development stand-in for the plugin generation service.
//!
//! Answers `POST /generate` with canned progress steps and a fixed file list
//! so the panel can be exercised without the real generator.

use axum::{http::StatusCode, response::IntoResponse, routing::post, Json, Router};
use pluginchat_models::{GeneratedFile, GenerationRequest, GenerationResult};
use serde_json::json;
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_ADDR: &str = "127.0.0.1:8000";

/// Canned plugin skeleton: relative path and content.
const PLUGIN_FILES: &[(&str, &str)] = &[
    (
        "plugin.xml",
        "<pluginMetaData path=\"generated\">\n  <name>Generated Plugin</name>\n</pluginMetaData>\n",
    ),
    (
        "src/main/java/com/example/GeneratedServicePlugin.java",
        "package com.example;\n\npublic class GeneratedServicePlugin {}\n",
    ),
    (
        "pom.xml",
        "<project>\n  <artifactId>generated-plugin</artifactId>\n</project>\n",
    ),
];

fn app() -> Router {
    Router::new().route("/generate", post(generate))
}

async fn generate(Json(req): Json<GenerationRequest>) -> impl IntoResponse {
    let prompt = req.prompt.trim();
    if prompt.is_empty() {
        info!("rejected empty prompt");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(json!({ "error": "prompt must not be empty" })),
        )
            .into_response();
    }
    info!(prompt_len = prompt.len(), "generation requested");

    let files: Vec<GeneratedFile> = PLUGIN_FILES
        .iter()
        .map(|(path, content)| GeneratedFile::new(*path, content.len() as u64))
        .collect();

    let steps = vec![
        "1) Prompt empfangen".to_string(),
        "2) Metadaten extrahiert".to_string(),
        format!("3) {} Dateien generiert", files.len()),
        "4) Dateien auf Festplatte gespeichert".to_string(),
    ];

    Json(GenerationResult {
        steps,
        files,
        msg: Some("Plugin files generated and saved successfully.".to_string()),
        error: None,
    })
    .into_response()
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let addr = std::env::var("MOCK_GENERATOR_ADDR").unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "mock generator listening");
    axum::serve(listener, app()).await?;
    Ok(())
}
