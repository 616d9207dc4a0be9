//! Workflow configuration
//!
//! Environment-backed configuration for each workflow, validated once
//! at the workflow boundary. Components below this layer never read
//! the environment; a missing required variable fails before any
//! network call is made.

use crate::error::{PipelineError, Result};
use bakeflow_cloud_nhn::auth::AuthConfig;
use bakeflow_cloud_nhn::endpoints::{EndpointScheme, NhnEndpoints};

/// Replication target when `TARGET_REGION` is unset.
pub const DEFAULT_TARGET_REGION: &str = "KR2";

/// Resource name prefix / `app` metadata tag when `BAKE_APP_NAME` is
/// unset.
const DEFAULT_APP_NAME: &str = "bakeflow";

fn required(name: &str) -> Result<String> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(PipelineError::MissingEnv(name.to_string())),
    }
}

fn optional(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn app_name() -> String {
    optional("BAKE_APP_NAME").unwrap_or_else(|| DEFAULT_APP_NAME.to_string())
}

/// Build-instance provisioning inputs.
#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub auth: AuthConfig,
    /// Flavor reference: canonical id or (partial) name.
    pub flavor: String,
    /// Boot image reference: canonical id or (partial) name.
    pub image: String,
    pub network_id: String,
    pub security_group: Option<String>,
    /// Public key material, read from the `SSH_PUBLIC_KEY` path. When
    /// unset, no keypair is registered and the instance boots without
    /// one.
    pub ssh_public_key: Option<String>,
    pub app: String,
}

impl ProvisionConfig {
    pub fn from_env() -> Result<Self> {
        let auth = AuthConfig {
            auth_url: required("NHN_AUTH_URL")?,
            tenant_id: required("NHN_TENANT_ID")?,
            username: required("NHN_USERNAME")?,
            password: required("NHN_PASSWORD")?,
            region: required("NHN_REGION")?,
        };

        let ssh_public_key = match optional("SSH_PUBLIC_KEY") {
            Some(key_path) => Some(std::fs::read_to_string(&key_path)?.trim().to_string()),
            None => None,
        };

        Ok(Self {
            auth,
            flavor: required("NHN_FLAVOR_ID")?,
            image: required("NHN_IMAGE_ID")?,
            network_id: required("NHN_NETWORK_ID")?,
            security_group: optional("NHN_SECURITY_GROUP_ID"),
            ssh_public_key,
            app: app_name(),
        })
    }
}

/// Image-capture inputs. Token and compute URL come from the
/// provisioning stage's output, not from a fresh identity exchange.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    pub token: String,
    pub compute_url: String,
    pub instance_id: String,
    pub git_sha: Option<String>,
    pub app: String,
}

impl CaptureConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: required("TOKEN")?,
            compute_url: required("COMPUTE_URL")?,
            instance_id: required("INSTANCE_ID")?,
            git_sha: optional("GIT_SHA"),
            app: app_name(),
        })
    }
}

/// Cross-region replication inputs.
#[derive(Debug, Clone)]
pub struct ReplicateConfig {
    pub token: String,
    pub source_image_id: String,
    pub source_image_name: String,
    /// Source image API base. Explicit `SOURCE_IMAGE_BASE_URL` wins;
    /// otherwise derived from `COMPUTE_URL`.
    pub source_image_base: String,
    pub target_region: String,
}

impl ReplicateConfig {
    pub fn from_env() -> Result<Self> {
        let source_image_base = match optional("SOURCE_IMAGE_BASE_URL") {
            Some(base) => base,
            None => match optional("COMPUTE_URL") {
                Some(compute_url) => NhnEndpoints.image_base_from_compute(&compute_url),
                None => {
                    return Err(PipelineError::MissingEnv(
                        "SOURCE_IMAGE_BASE_URL or COMPUTE_URL".to_string(),
                    ));
                }
            },
        };

        Ok(Self {
            token: required("TOKEN")?,
            source_image_id: required("SOURCE_IMAGE_ID")?,
            source_image_name: required("SOURCE_IMAGE_NAME")?,
            source_image_base,
            target_region: optional("TARGET_REGION")
                .unwrap_or_else(|| DEFAULT_TARGET_REGION.to_string()),
        })
    }
}

/// Test-instance boot inputs.
#[derive(Debug, Clone)]
pub struct ValidateConfig {
    pub token: String,
    pub compute_url: String,
    pub image_id: String,
    pub network_id: String,
    pub flavor: String,
    pub keypair_name: String,
    pub security_group: Option<String>,
    pub app: String,
}

impl ValidateConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            token: required("TOKEN")?,
            compute_url: required("COMPUTE_URL")?,
            image_id: required("IMAGE_ID")?,
            network_id: required("NHN_NETWORK_ID")?,
            flavor: required("NHN_FLAVOR_ID")?,
            keypair_name: required("KEYPAIR_NAME")?,
            security_group: optional("NHN_SECURITY_GROUP_ID"),
            app: app_name(),
        })
    }
}
