//! Headless host for the plugin chat panel.
//!
//! Opens the panel once, feeds it prompts from the command line or stdin
//! and prints what the surface would show. With `--json` it becomes a
//! stdio bridge speaking the raw surface protocol instead.

mod bridge;
mod host;
#[cfg(test)]
mod testing;
mod transcript;

use std::time::Duration;

use clap::Parser;
use pluginchat_panel::{PanelController, PanelOpen};
use pluginchat_sdk::{BackendConfig, GenerationClient};
use tokio::io::BufReader;
use tracing::debug;

use crate::host::ChannelHost;

/// Plugin generation chat, in the terminal.
#[derive(Parser, Debug)]
#[command(name = "pluginchat-cli")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Generation service endpoint (overrides PLUGINCHAT_BACKEND_URL).
    #[arg(long)]
    backend: Option<String>,

    /// Request timeout in seconds (overrides PLUGINCHAT_TIMEOUT_SECS).
    #[arg(long)]
    timeout: Option<u64>,

    /// Speak the JSON surface protocol on stdin/stdout, one object per line.
    #[arg(long)]
    json: bool,

    /// Prompts to submit in order. Read from stdin, one per line, when absent.
    prompts: Vec<String>,
}

impl Cli {
    fn backend_config(&self) -> BackendConfig {
        let mut config = BackendConfig::from_env();
        if let Some(endpoint) = &self.backend {
            config = config.with_endpoint(endpoint.clone());
        }
        if let Some(secs) = self.timeout {
            config = config.with_timeout(Duration::from_secs(secs));
        }
        config
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the transcript.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let client = GenerationClient::new(cli.backend_config())?;
    debug!(endpoint = client.endpoint(), "generation client ready");

    let (host, mut presented) = ChannelHost::new();
    let controller = PanelController::new(host, client);

    if controller.open_or_focus() != PanelOpen::Created {
        anyhow::bail!("panel already open");
    }
    let endpoint = presented
        .recv()
        .await
        .ok_or_else(|| anyhow::anyhow!("host dropped the panel"))?;

    let stdin = BufReader::new(tokio::io::stdin());
    let stdout = tokio::io::stdout();
    let result = if cli.json {
        bridge::run(endpoint, stdin, stdout).await
    } else {
        transcript::run(endpoint, cli.prompts, stdin, stdout).await
    };

    controller.dispose();
    result
}
