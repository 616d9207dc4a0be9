//! NHN Cloud control-plane clients
//!
//! Thin typed clients over the NHN Cloud (OpenStack-compatible)
//! management APIs, scoped to what the bake workflows need:
//!
//! - [`auth`]: token issue against the identity service, compute
//!   endpoint selection from the service catalog
//! - [`compute`]: servers, keypairs, flavors, server-image actions
//! - [`image`]: image records, name-filtered listing, streamed
//!   download/upload of image payloads
//! - [`endpoints`]: the provider convention mapping compute endpoints
//!   and region codes to image API base URLs
//!
//! Every request carries the `X-Auth-Token` header. Non-2xx responses
//! (other than an expected 404 on targeted lookups) surface as
//! [`NhnError::Api`] with the status and a bounded body excerpt.

pub mod auth;
pub mod compute;
pub mod endpoints;
pub mod error;
pub mod image;
pub mod transport;

pub use auth::{AuthConfig, Session, issue_token};
pub use compute::{ComputeApi, CreateServer, FlavorInfo, ServerDetail};
pub use endpoints::{EndpointScheme, NhnEndpoints};
pub use error::{NhnError, Result};
pub use image::{CreateImageRecord, ImageApi, ImageDetail, ImageDownload};
pub use transport::new_http_client;
