//! Bake workflows
//!
//! The four CI-facing workflows, each a single linear pipeline
//! composing the NHN clients with the lifecycle poller:
//!
//! - [`provision`]: build instance creation (keypair → create → wait
//!   `ACTIVE` → extract IPv4)
//! - [`capture`]: machine image capture from an instance (name first,
//!   id resolved afterwards by name-filtered listing)
//! - [`replicate`]: cross-region image replication (describe →
//!   streamed download → target record → streamed upload → wait
//!   `active`)
//! - [`validate`]: test instance boot from a captured image
//!
//! No state is shared across workflows: the token and its derived
//! endpoint URLs are passed in explicitly via the per-workflow
//! configuration, validated once at the boundary in [`config`].

pub mod capture;
mod classify;
pub mod config;
pub mod error;
mod names;
pub mod provision;
pub mod replicate;
pub mod resolve;
pub mod validate;

pub use config::{CaptureConfig, ProvisionConfig, ReplicateConfig, ValidateConfig};
pub use error::{PipelineError, Result};
