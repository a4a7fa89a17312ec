//! Channel transport between the controller and a rendering surface.
//!
//! [`channel`] creates three connected halves:
//!
//! ```text
//!   SurfaceLink  ──SurfaceSignal (events, reveal)──▶  SurfaceEndpoint
//!   SurfaceInbound ◀──────SurfaceMessage────────────  SurfaceEndpoint
//!   SurfaceInbound ◀──────closed flag───────────────  SurfaceLink / SurfaceEndpoint
//! ```
//!
//! The link is kept by the controller, the endpoint is handed to the host
//! that displays the panel, and the inbound half feeds the controller's
//! subscriptions. Closing either side (or dropping the endpoint) flips a
//! shared flag; from then on events posted through the link are dropped.

use std::sync::Arc;

use pluginchat_models::{PanelEvent, SurfaceMessage};
use tokio::sync::{mpsc, watch};
use tracing::debug;
use uuid::Uuid;

/// Title shown in the panel header.
pub const PANEL_TITLE: &str = "Mirth Plugin AI Chat";

/// First assistant line of every new panel.
pub const GREETING: &str = "Please describe your Mirth Connect plugin as precisely as possible.";

/// Presets a surface is created with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceOptions {
    /// Header / window title.
    pub title: String,
    /// Text of the initial assistant entry.
    pub greeting: String,
    /// Surface-addressable URI of the header icon, resolved by the host.
    pub icon_uri: Option<String>,
}

impl Default for SurfaceOptions {
    fn default() -> Self {
        Self {
            title: PANEL_TITLE.to_string(),
            greeting: GREETING.to_string(),
            icon_uri: None,
        }
    }
}

/// What the controller pushes to a surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SurfaceSignal {
    /// A protocol event to render.
    Event(PanelEvent),
    /// Bring the surface to the foreground.
    Reveal,
}

/// Create a connected link / endpoint / inbound triple for a new surface.
pub fn channel(options: SurfaceOptions) -> (SurfaceLink, SurfaceEndpoint, SurfaceInbound) {
    let id = Uuid::new_v4();
    let (signal_tx, signal_rx) = mpsc::unbounded_channel();
    let (message_tx, message_rx) = mpsc::unbounded_channel();
    let (closed_tx, closed_rx) = watch::channel(false);
    let closed = Arc::new(closed_tx);

    let link = SurfaceLink {
        id,
        signals: signal_tx,
        closed: Arc::clone(&closed),
    };
    let endpoint = SurfaceEndpoint {
        id,
        options,
        signals: signal_rx,
        outbound: message_tx,
        closed,
    };
    let inbound = SurfaceInbound {
        messages: message_rx,
        closed: closed_rx,
    };
    (link, endpoint, inbound)
}

// ---------------------------------------------------------------------------
// SurfaceLink
// ---------------------------------------------------------------------------

/// Controller-side handle on a surface.
#[derive(Debug, Clone)]
pub struct SurfaceLink {
    id: Uuid,
    signals: mpsc::UnboundedSender<SurfaceSignal>,
    closed: Arc<watch::Sender<bool>>,
}

impl SurfaceLink {
    /// Identifier shared by both halves of the surface.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// `true` once either side closed the surface.
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow() || self.signals.is_closed()
    }

    /// Push an event to the surface.
    ///
    /// Returns `false` and drops the event when the surface is gone.
    pub fn post(&self, event: PanelEvent) -> bool {
        self.send(SurfaceSignal::Event(event))
    }

    /// Ask the surface to come to the foreground.
    pub fn reveal(&self) -> bool {
        self.send(SurfaceSignal::Reveal)
    }

    /// Close the surface. Idempotent.
    pub fn close(&self) {
        if !self.closed.send_replace(true) {
            debug!(panel_id = %self.id, "surface closed by controller");
        }
    }

    fn send(&self, signal: SurfaceSignal) -> bool {
        if self.is_closed() {
            debug!(panel_id = %self.id, ?signal, "surface closed, dropping signal");
            return false;
        }
        self.signals.send(signal).is_ok()
    }
}

// ---------------------------------------------------------------------------
// SurfaceEndpoint
// ---------------------------------------------------------------------------

/// Rendering-side half of a surface: receives signals, emits prompts.
///
/// Dropping the endpoint closes the surface.
#[derive(Debug)]
pub struct SurfaceEndpoint {
    id: Uuid,
    options: SurfaceOptions,
    signals: mpsc::UnboundedReceiver<SurfaceSignal>,
    outbound: mpsc::UnboundedSender<SurfaceMessage>,
    closed: Arc<watch::Sender<bool>>,
}

impl SurfaceEndpoint {
    /// Identifier shared by both halves of the surface.
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Presets the surface was created with.
    pub fn options(&self) -> &SurfaceOptions {
        &self.options
    }

    /// `true` once either side closed the surface.
    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }

    /// Wait for the next signal. `None` once the surface is closed.
    pub async fn recv(&mut self) -> Option<SurfaceSignal> {
        if self.is_closed() {
            return None;
        }
        let mut closed = self.closed.subscribe();
        tokio::select! {
            biased;
            signal = self.signals.recv() => signal,
            () = async {
                let _ = closed.wait_for(|closed| *closed).await;
            } => None,
        }
    }

    /// Take the next signal if one is already queued.
    pub fn try_recv(&mut self) -> Option<SurfaceSignal> {
        if self.is_closed() {
            return None;
        }
        self.signals.try_recv().ok()
    }

    /// Send a message to the controller. `false` if the surface is closed.
    pub fn send(&self, message: SurfaceMessage) -> bool {
        if self.is_closed() {
            return false;
        }
        self.outbound.send(message).is_ok()
    }

    /// Send a `sendPrompt` message.
    pub fn send_prompt(&self, text: impl Into<String>) -> bool {
        self.send(SurfaceMessage::send_prompt(text))
    }

    /// Close the surface (user or host action). Idempotent.
    pub fn close(&self) {
        if !self.closed.send_replace(true) {
            debug!(panel_id = %self.id, "surface closed by host");
        }
    }
}

impl Drop for SurfaceEndpoint {
    fn drop(&mut self) {
        self.close();
    }
}

// ---------------------------------------------------------------------------
// SurfaceInbound
// ---------------------------------------------------------------------------

/// What the controller's subscriptions listen to.
#[derive(Debug)]
pub struct SurfaceInbound {
    pub(crate) messages: mpsc::UnboundedReceiver<SurfaceMessage>,
    pub(crate) closed: watch::Receiver<bool>,
}
