//! Plain-text rendering of the panel in a terminal.

use pluginchat_panel::{ChatView, SurfaceEndpoint, SurfaceSignal};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Entries of `view` not printed yet; advances `printed`.
fn unprinted(view: &ChatView, printed: &mut usize) -> Vec<String> {
    let lines = view.transcript()[*printed..]
        .iter()
        .map(pluginchat_models::TranscriptEntry::plain_text)
        .collect();
    *printed = view.transcript().len();
    lines
}

struct Terminal<W> {
    endpoint: SurfaceEndpoint,
    view: ChatView,
    printed: usize,
    out: W,
}

impl<W: AsyncWrite + Unpin> Terminal<W> {
    fn new(endpoint: SurfaceEndpoint, out: W) -> Self {
        let view = ChatView::new(&endpoint.options().greeting);
        Self {
            endpoint,
            view,
            printed: 0,
            out,
        }
    }

    async fn flush(&mut self) -> anyhow::Result<()> {
        for line in unprinted(&self.view, &mut self.printed) {
            self.out.write_all(line.as_bytes()).await?;
            self.out.write_all(b"\n").await?;
        }
        self.out.flush().await?;
        if let Some(status) = self.view.status().text() {
            eprintln!("… {status}");
        }
        Ok(())
    }

    /// Submit one prompt and wait for its terminal event.
    async fn submit(&mut self, prompt: &str) -> anyhow::Result<()> {
        let Some(message) = self.view.submit_text(prompt) else {
            return Ok(());
        };
        self.flush().await?;
        if !self.endpoint.send(message) {
            anyhow::bail!("panel closed");
        }

        loop {
            let Some(signal) = self.endpoint.recv().await else {
                anyhow::bail!("panel closed while waiting for an answer");
            };
            if let SurfaceSignal::Event(event) = signal {
                self.view.apply(&event);
                self.flush().await?;
                if event.is_terminal() {
                    return Ok(());
                }
            }
        }
    }
}

/// Print the greeting, then submit every prompt in turn. Prompts come from
/// `input`, one per line, when `prompts` is empty.
pub async fn run<R, W>(
    endpoint: SurfaceEndpoint,
    prompts: Vec<String>,
    input: R,
    out: W,
) -> anyhow::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut terminal = Terminal::new(endpoint, out);
    terminal.flush().await?;

    if prompts.is_empty() {
        let mut lines = input.lines();
        while let Some(line) = lines.next_line().await? {
            terminal.submit(&line).await?;
        }
    } else {
        for prompt in &prompts {
            terminal.submit(prompt).await?;
        }
    }
    Ok(())
}
