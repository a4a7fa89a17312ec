//! # Plugin Chat SDK
//!
//! Client for the plugin **generation service**.
//!
//! The SDK provides:
//!
//! * [`GenerationClient`]: sends one prompt per call and decodes the
//!   service's [`GenerationResult`](pluginchat_models::GenerationResult).
//! * [`BackendConfig`]: endpoint and timeout, read from the environment.
//! * [`SdkError`]: unified error type distinguishing a backend rejection
//!   from a transport or decoding failure.
//!
//! # Quick start
//!
//! ```rust,no_run
//! use pluginchat_sdk::{BackendConfig, GenerationClient};
//!
//! # async fn run() -> Result<(), pluginchat_sdk::SdkError> {
//! let client = GenerationClient::new(BackendConfig::from_env())?;
//! let result = client.generate("Convert HL7 ADT messages to FHIR").await?;
//! for step in &result.steps {
//!     println!("{step}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::GenerationClient;
pub use config::BackendConfig;
pub use error::SdkError;
