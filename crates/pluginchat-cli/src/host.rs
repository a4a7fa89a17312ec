use std::sync::Arc;

use pluginchat_panel::{SurfaceEndpoint, SurfaceHost};
use tokio::sync::mpsc;

/// Hands presented surfaces to the main task.
pub struct ChannelHost {
    sender: mpsc::UnboundedSender<SurfaceEndpoint>,
}

impl ChannelHost {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<SurfaceEndpoint>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Arc::new(Self { sender }), receiver)
    }
}

impl SurfaceHost for ChannelHost {
    fn present(&self, endpoint: SurfaceEndpoint) {
        if let Err(e) = self.sender.send(endpoint) {
            tracing::warn!(panel_id = %e.0.id(), "no one to present the panel to");
        }
    }
}
