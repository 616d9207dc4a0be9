//! Captured-image validation
//!
//! Boots a test instance from a captured image and waits for it to
//! become usable, reusing the provisioning boot path. Token, compute
//! URL and keypair arrive from earlier stage outputs; no identity
//! exchange and no keypair registration happen here.

use crate::config::ValidateConfig;
use crate::error::Result;
use crate::names;
use crate::provision::{BootSpec, boot_server};
use bakeflow_cloud_nhn::{ComputeApi, new_http_client};
use bakeflow_core::WorkflowOutput;
use std::collections::BTreeMap;

/// Boot a test instance from the captured image.
pub async fn run(config: &ValidateConfig) -> Result<WorkflowOutput> {
    let http = new_http_client()?;
    let compute = ComputeApi::new(http, config.compute_url.clone(), config.token.clone());

    let flavor_id = crate::resolve::flavor(&compute, &config.flavor).await?;
    let instance_name = names::timestamped(&format!("{}-test", config.app));

    let mut metadata = BTreeMap::new();
    metadata.insert("purpose".to_string(), "ci-test".to_string());
    metadata.insert("app".to_string(), config.app.clone());

    let booted = boot_server(
        &compute,
        BootSpec {
            name: instance_name,
            flavor_id,
            image_id: config.image_id.clone(),
            network_id: config.network_id.clone(),
            key_name: Some(config.keypair_name.clone()),
            security_group: config.security_group.clone(),
            metadata,
        },
    )
    .await?;
    tracing::info!(instance_id = %booted.id, ip = %booted.ip, "test instance is ACTIVE");

    let mut output = WorkflowOutput::new();
    output.set("test_instance_id", booted.id);
    output.set("test_instance_ip", booted.ip);
    Ok(output)
}
