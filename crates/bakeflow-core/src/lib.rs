//! Bakeflow core primitives
//!
//! Provider-agnostic building blocks shared by the bake workflows:
//!
//! - [`poll`]: terminal-state waiter for asynchronous control-plane
//!   resources (create returns immediately, the caller polls until the
//!   resource settles or a deadline passes)
//! - [`locate`]: resolution of human-given references (name or id) to
//!   canonical identifiers
//! - [`ident`]: resource references whose identifier is assigned at
//!   most once per workflow run
//! - [`output`]: the flat `key=value` result consumed by the CI runner

pub mod error;
pub mod ident;
pub mod locate;
pub mod output;
pub mod poll;

pub use error::{CoreError, Result};
pub use ident::{ResourceKind, ResourceRef};
pub use locate::{Candidate, is_canonical_id, pick};
pub use output::{OutputSink, WorkflowOutput};
pub use poll::{Observation, Poller};
