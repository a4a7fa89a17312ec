//! Panel controller: singleton lifecycle and prompt relay.
//!
//! The controller owns at most one [`PanelHandle`] at a time. Creating,
//! revealing and disposing the panel all go through it; nothing else
//! touches the registry.
//!
//! Each live panel carries two subscriptions, each a tokio task draining one
//! source:
//!
//! * **messages**: `sendPrompt` messages from the surface. Every prompt is
//!   relayed on its own task so the surface keeps accepting input while the
//!   generation service works. Relays are not cancelled on dispose; their
//!   late events are dropped by the closed [`SurfaceLink`].
//! * **close**: fires when the surface is closed by anyone and disposes the
//!   panel it belongs to.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};

use pluginchat_models::{PanelEvent, SurfaceMessage};
use pluginchat_sdk::GenerationClient;
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::surface::{self, SurfaceEndpoint, SurfaceInbound, SurfaceLink, SurfaceOptions};
use crate::view::ANALYZING_TEXT;

/// Whatever displays a newly created surface (a window, a terminal loop, a
/// test harness).
pub trait SurfaceHost: Send + Sync + 'static {
    /// Take ownership of a freshly created surface and show it.
    fn present(&self, endpoint: SurfaceEndpoint);
}

/// Outcome of [`PanelController::open_or_focus`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelOpen {
    /// No panel existed; a new one was presented.
    Created,
    /// The live panel was brought to the foreground.
    Revealed,
}

// ---------------------------------------------------------------------------
// Subscription / PanelHandle
// ---------------------------------------------------------------------------

/// A background task tied to one panel; aborted when disposed.
#[derive(Debug)]
struct Subscription {
    name: &'static str,
    task: JoinHandle<()>,
}

impl Subscription {
    fn spawn<F>(name: &'static str, future: F) -> Self
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        Self {
            name,
            task: tokio::spawn(future),
        }
    }

    fn dispose(self) {
        debug!(subscription = self.name, "releasing subscription");
        self.task.abort();
    }
}

/// The one live panel.
#[derive(Debug)]
struct PanelHandle {
    id: Uuid,
    link: SurfaceLink,
    subscriptions: Vec<Subscription>,
}

impl PanelHandle {
    fn release(self) {
        self.link.close();
        for subscription in self.subscriptions {
            subscription.dispose();
        }
        info!(panel_id = %self.id, "panel disposed");
    }
}

// ---------------------------------------------------------------------------
// PanelController
// ---------------------------------------------------------------------------

/// Process-wide owner of the chat panel.
pub struct PanelController {
    host: Arc<dyn SurfaceHost>,
    client: GenerationClient,
    options: SurfaceOptions,
    current: Mutex<Option<PanelHandle>>,
}

impl PanelController {
    /// Create a controller with default surface presets.
    pub fn new(host: Arc<dyn SurfaceHost>, client: GenerationClient) -> Arc<Self> {
        Self::with_options(host, client, SurfaceOptions::default())
    }

    /// Create a controller whose surfaces use `options`.
    pub fn with_options(
        host: Arc<dyn SurfaceHost>,
        client: GenerationClient,
        options: SurfaceOptions,
    ) -> Arc<Self> {
        Arc::new(Self {
            host,
            client,
            options,
            current: Mutex::new(None),
        })
    }

    /// `true` while a panel is live.
    pub fn is_open(&self) -> bool {
        self.lock().is_some()
    }

    /// Identifier of the live panel, if any.
    pub fn current_panel_id(&self) -> Option<Uuid> {
        self.lock().as_ref().map(|handle| handle.id)
    }

    /// Create the panel, or reveal it if it already exists.
    ///
    /// Revealing never touches the surface's transcript. Must be called
    /// from within a tokio runtime.
    pub fn open_or_focus(self: &Arc<Self>) -> PanelOpen {
        let mut current = self.lock();

        if let Some(handle) = current.as_ref() {
            if handle.link.reveal() {
                debug!(panel_id = %handle.id, "panel revealed");
                return PanelOpen::Revealed;
            }
        }

        // Closed but not yet disposed: the close subscription is about to
        // run. Release it here so the new panel is not cleared by it.
        let stale = current.take();

        let (link, endpoint, inbound) = surface::channel(self.options.clone());
        let id = link.id();
        let subscriptions = self.subscribe(&link, inbound);
        *current = Some(PanelHandle {
            id,
            link,
            subscriptions,
        });
        drop(current);

        if let Some(stale) = stale {
            stale.release();
        }

        info!(panel_id = %id, title = %self.options.title, "panel created");
        self.host.present(endpoint);
        PanelOpen::Created
    }

    /// Relay one prompt from the live panel to the generation service.
    ///
    /// Pushes `showStatus`, then exactly one of `showSteps` / `showError`.
    /// Blank prompts and calls without a live panel do nothing.
    pub async fn on_prompt_received(&self, prompt: &str) {
        let link = self.lock().as_ref().map(|handle| handle.link.clone());
        match link {
            Some(link) => self.relay(&link, prompt).await,
            None => debug!("prompt received without a live panel, ignoring"),
        }
    }

    /// Dispose of the live panel. No-op when there is none.
    pub fn dispose(&self) {
        let handle = self.lock().take();
        if let Some(handle) = handle {
            handle.release();
        }
    }

    /// Dispose of panel `id` only if it is still the live one.
    fn dispose_panel(&self, id: Uuid) {
        let handle = {
            let mut current = self.lock();
            match current.as_ref() {
                Some(handle) if handle.id == id => current.take(),
                _ => None,
            }
        };
        if let Some(handle) = handle {
            handle.release();
        }
    }

    async fn relay(&self, link: &SurfaceLink, prompt: &str) {
        if prompt.trim().is_empty() {
            debug!(panel_id = %link.id(), "blank prompt, ignoring");
            return;
        }

        link.post(PanelEvent::status(ANALYZING_TEXT));

        let terminal = match self.client.generate(prompt).await {
            Ok(result) => {
                info!(
                    panel_id = %link.id(),
                    steps = result.steps.len(),
                    files = result.files.len(),
                    "generation finished"
                );
                result.into_event()
            }
            Err(e) if e.is_backend_rejection() => {
                let status_text = e.status_text().unwrap_or_default();
                warn!(panel_id = %link.id(), error = %e, "generation rejected");
                PanelEvent::error(format!("Backend error: {status_text}"))
            }
            Err(e) => {
                warn!(panel_id = %link.id(), error = %e, "generation service unreachable");
                PanelEvent::error(format!("Connection error: {e}"))
            }
        };

        if !link.post(terminal) {
            debug!(panel_id = %link.id(), "panel gone before the answer arrived");
        }
    }

    fn subscribe(
        self: &Arc<Self>,
        link: &SurfaceLink,
        inbound: SurfaceInbound,
    ) -> Vec<Subscription> {
        let SurfaceInbound { messages, closed } = inbound;
        vec![
            Subscription::spawn(
                "messages",
                dispatch_messages(Arc::downgrade(self), link.clone(), messages),
            ),
            Subscription::spawn("close", watch_close(Arc::downgrade(self), link.id(), closed)),
        ]
    }

    fn lock(&self) -> MutexGuard<'_, Option<PanelHandle>> {
        self.current.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Message subscription: one relay task per `sendPrompt`.
async fn dispatch_messages(
    controller: Weak<PanelController>,
    link: SurfaceLink,
    mut messages: mpsc::UnboundedReceiver<SurfaceMessage>,
) {
    while let Some(message) = messages.recv().await {
        let Some(controller) = controller.upgrade() else {
            break;
        };
        match message {
            SurfaceMessage::SendPrompt { text } => {
                let link = link.clone();
                tokio::spawn(async move {
                    controller.relay(&link, &text).await;
                });
            }
        }
    }
    debug!(panel_id = %link.id(), "message subscription ended");
}

/// Close subscription: dispose the panel once its surface closes.
async fn watch_close(
    controller: Weak<PanelController>,
    id: Uuid,
    mut closed: watch::Receiver<bool>,
) {
    // An error means every sender is gone, which also means the surface is.
    let _ = closed.wait_for(|closed| *closed).await;
    if let Some(controller) = controller.upgrade() {
        debug!(panel_id = %id, "surface closed");
        controller.dispose_panel(id);
    }
}
