use std::cell::RefCell;
use std::sync::Arc;

use dioxus::prelude::{asset, Asset};
use futures::channel::mpsc as futures_mpsc;
use pluginchat_models::SurfaceMessage;
use pluginchat_panel::{ChatView, PanelController, SurfaceEndpoint, SurfaceHost, SurfaceOptions};
use pluginchat_sdk::{BackendConfig, GenerationClient, SdkError};
use tokio::sync::mpsc;
use uuid::Uuid;

// ── What the panel component renders ──────────────────────────────────

/// UI-side state of the live panel.
#[derive(Clone)]
pub struct PanelState {
    pub id: Uuid,
    pub options: SurfaceOptions,
    pub view: ChatView,
    /// Bumped on every reveal; the panel focuses its prompt input.
    pub focus_requests: u64,
    pub commands: futures_mpsc::UnboundedSender<PanelCommand>,
}

/// Requests from the panel component to the task owning the surface.
#[derive(Debug)]
pub enum PanelCommand {
    Submit(SurfaceMessage),
    Close,
}

/// Header icon bundled with the app.
const PANEL_ICON: Asset = asset!("/assets/icon.png");

// ── Host side ─────────────────────────────────────────────────────────

/// Receives surfaces presented by the controller.
struct GuiHost {
    presented: mpsc::UnboundedSender<SurfaceEndpoint>,
}

impl SurfaceHost for GuiHost {
    fn present(&self, endpoint: SurfaceEndpoint) {
        if self.presented.send(endpoint).is_err() {
            tracing::warn!("window gone, dropping presented panel");
        }
    }
}

/// The host application: one controller plus the queue of surfaces it
/// presented and the window has not picked up yet.
pub struct Shell {
    pub controller: Arc<PanelController>,
    presented: RefCell<mpsc::UnboundedReceiver<SurfaceEndpoint>>,
}

impl Shell {
    pub fn new() -> Result<Self, SdkError> {
        let client = GenerationClient::new(BackendConfig::from_env())?;
        let options = SurfaceOptions {
            icon_uri: Some(icon_uri()),
            ..SurfaceOptions::default()
        };
        let (sender, receiver) = mpsc::unbounded_channel();
        let controller =
            PanelController::with_options(Arc::new(GuiHost { presented: sender }), client, options);
        Ok(Self {
            controller,
            presented: RefCell::new(receiver),
        })
    }

    /// Take the surface presented by the last `open_or_focus`, if any.
    pub fn take_presented(&self) -> Option<SurfaceEndpoint> {
        self.presented.borrow_mut().try_recv().ok()
    }
}

/// `PLUGINCHAT_ICON_URI` if set, otherwise the bundled icon.
fn icon_uri() -> String {
    std::env::var("PLUGINCHAT_ICON_URI").unwrap_or_else(|_| PANEL_ICON.to_string())
}
