#![deny(missing_docs)]

//! # Plugin Chat Models
//!
//! Core data types shared by the chat panel, its hosts and the generation
//! service client.
//!
//! ## Message flow
//!
//! ```text
//! Surface ──SurfaceMessage::SendPrompt──▶ Controller ──GenerationRequest──▶ Service
//! Surface ◀──PanelEvent::ShowStatus────── Controller
//! Surface ◀──PanelEvent::ShowSteps─────── Controller ◀──GenerationResult─── Service
//!         ◀──PanelEvent::ShowError───────            (rejection / transport failure)
//! ```
//!
//! ## Module layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`protocol`] | Surface ↔ controller messages (`SurfaceMessage`, `PanelEvent`) |
//! | [`generation`] | Generation service request / response bodies |
//! | [`transcript`] | Transcript entries, roles and the transient status line |
//! | [`error`] | [`ModelError`] |

pub mod error;
pub mod generation;
pub mod protocol;
pub mod transcript;

// Re-export all public types at crate root for convenience.
pub use error::*;
pub use generation::*;
pub use protocol::*;
pub use transcript::*;
