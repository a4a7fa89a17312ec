//! JSON stdio bridge.
//!
//! Lets an out-of-process surface drive the panel: every input line is a
//! `{"command":"sendPrompt",…}` object, every output line a `PanelEvent`.
//! On end of input the bridge waits for the answers still outstanding.

use pluginchat_models::{ModelError, SurfaceMessage};
use pluginchat_panel::{SurfaceEndpoint, SurfaceSignal};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

pub async fn run<R, W>(
    mut endpoint: SurfaceEndpoint,
    input: R,
    mut output: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut outstanding = 0usize;
    let mut input_open = true;

    while input_open || outstanding > 0 {
        tokio::select! {
            line = lines.next_line(), if input_open => {
                match line? {
                    Some(line) if line.trim().is_empty() => {}
                    Some(line) => match SurfaceMessage::from_json(&line) {
                        Ok(message) => {
                            let SurfaceMessage::SendPrompt { text } = &message;
                            // The controller ignores blank prompts without answering.
                            if !text.trim().is_empty() {
                                outstanding += 1;
                            }
                            endpoint.send(message);
                        }
                        Err(ModelError::UnknownCommand { command }) => {
                            warn!(%command, "ignoring unknown command");
                        }
                        Err(e) => warn!(error = %e, "ignoring malformed message"),
                    },
                    None => input_open = false,
                }
            }
            signal = endpoint.recv() => {
                let Some(signal) = signal else {
                    break;
                };
                if let SurfaceSignal::Event(event) = signal {
                    if event.is_terminal() {
                        outstanding = outstanding.saturating_sub(1);
                    }
                    let mut line = serde_json::to_string(&event)?;
                    line.push('\n');
                    output.write_all(line.as_bytes()).await?;
                    output.flush().await?;
                }
            }
        }
    }
    Ok(())
}
