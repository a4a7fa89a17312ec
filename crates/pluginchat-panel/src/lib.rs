//! # Plugin Chat Panel
//!
//! The panel lifecycle and the message exchange between a rendering
//! surface and its host-side controller.
//!
//! * [`PanelController`]: owns the one live panel (if any), creates or
//!   reveals it, relays prompts to the generation service and disposes of
//!   the panel's subscriptions when the surface closes.
//! * [`surface`]: the channel pair connecting the controller to whatever
//!   displays the panel ([`SurfaceLink`] on the controller side,
//!   [`SurfaceEndpoint`] on the rendering side).
//! * [`ChatView`]: the rendering state machine turning pushed
//!   [`PanelEvent`](pluginchat_models::PanelEvent)s into an append-only
//!   transcript plus a transient status line.
//! * [`markup`]: escaping and HTML fragments for HTML-based surfaces.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use pluginchat_panel::{PanelController, SurfaceEndpoint, SurfaceHost};
//! use pluginchat_sdk::{BackendConfig, GenerationClient};
//!
//! struct Window;
//!
//! impl SurfaceHost for Window {
//!     fn present(&self, endpoint: SurfaceEndpoint) {
//!         // hand the endpoint to the UI
//!         # drop(endpoint);
//!     }
//! }
//!
//! # async fn run() -> Result<(), pluginchat_sdk::SdkError> {
//! let client = GenerationClient::new(BackendConfig::from_env())?;
//! let controller = PanelController::new(Arc::new(Window), client);
//! controller.open_or_focus();
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod markup;
pub mod surface;
pub mod view;

pub use controller::{PanelController, PanelOpen, SurfaceHost};
pub use surface::{SurfaceEndpoint, SurfaceLink, SurfaceOptions, SurfaceSignal};
pub use view::ChatView;
