//! Shared fixtures: a local generation service and an open panel.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::post;
use axum::{Json, Router};
use pluginchat_models::GenerationRequest;
use pluginchat_panel::{PanelController, SurfaceEndpoint};
use pluginchat_sdk::{BackendConfig, GenerationClient};
use serde_json::json;

use crate::host::ChannelHost;

async fn generate(Json(req): Json<GenerationRequest>) -> Json<serde_json::Value> {
    Json(json!({
        "steps": [format!("got {}", req.prompt)],
        "files": [{ "path": "plugin.xml", "size_bytes": 42 }],
    }))
}

async fn backend() -> String {
    let app = Router::new().route("/generate", post(generate));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{addr}/generate")
}

/// Open a panel against a fresh local backend and take its surface.
pub async fn open_panel() -> (Arc<PanelController>, SurfaceEndpoint) {
    let client = GenerationClient::new(
        BackendConfig::default()
            .with_endpoint(backend().await)
            .with_timeout(Duration::from_secs(5)),
    )
    .unwrap();
    let (host, mut presented) = ChannelHost::new();
    let controller = PanelController::new(host, client);
    controller.open_or_focus();
    let endpoint = presented.try_recv().unwrap();
    (controller, endpoint)
}
