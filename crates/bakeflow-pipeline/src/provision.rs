//! Build-instance provisioning
//!
//! Keypair registration (conflict tolerated) → reference resolution →
//! server create → wait for `ACTIVE` → IPv4 extraction. The create
//! call itself is never retried; only the wait phase polls.

use crate::classify;
use crate::config::ProvisionConfig;
use crate::error::{PipelineError, Result};
use crate::{names, resolve};
use bakeflow_cloud_nhn::endpoints::{EndpointScheme, NhnEndpoints};
use bakeflow_cloud_nhn::{
    ComputeApi, CreateServer, ImageApi, NhnError, issue_token, new_http_client,
};
use bakeflow_cloud_nhn::compute::{NetworkRef, SecurityGroupRef};
use bakeflow_core::{Poller, WorkflowOutput};
use std::collections::BTreeMap;
use std::time::Duration;

/// Boot is fast relative to image materialization: poll every 10s,
/// give up after 10 minutes.
pub const INSTANCE_POLL_INTERVAL: Duration = Duration::from_secs(10);
pub const INSTANCE_POLL_TIMEOUT: Duration = Duration::from_secs(600);

/// Inputs for one server boot, shared with the validate workflow.
pub(crate) struct BootSpec {
    pub name: String,
    pub flavor_id: String,
    pub image_id: String,
    pub network_id: String,
    pub key_name: Option<String>,
    pub security_group: Option<String>,
    pub metadata: BTreeMap<String, String>,
}

pub(crate) struct BootedServer {
    pub id: String,
    pub ip: String,
}

/// Create a server and wait until it is usable.
///
/// An `ACTIVE` server without any IPv4 address is a hard failure, not
/// a retry: the resource is terminal, it just is not usable.
pub(crate) async fn boot_server(compute: &ComputeApi, spec: BootSpec) -> Result<BootedServer> {
    let request = CreateServer {
        name: spec.name.clone(),
        flavor_ref: spec.flavor_id,
        image_ref: spec.image_id,
        networks: vec![NetworkRef {
            uuid: spec.network_id,
        }],
        key_name: spec.key_name,
        security_groups: spec
            .security_group
            .map(|name| vec![SecurityGroupRef { name }]),
        metadata: spec.metadata,
    };

    let server_id = compute.create_server(&request).await?;
    tracing::info!(%server_id, name = %spec.name, "server create accepted");

    let poller = Poller::new(
        format!("instance {server_id}"),
        INSTANCE_POLL_INTERVAL,
        INSTANCE_POLL_TIMEOUT,
    );
    let id = server_id.as_str();
    let detail = poller
        .wait_for(move || async move {
            compute
                .get_server(id)
                .await
                .map(classify::server_observation)
        })
        .await?;

    let ip = detail
        .ipv4_address()
        .map(str::to_string)
        .ok_or_else(|| PipelineError::NoIpAddress(server_id.clone()))?;

    Ok(BootedServer { id: server_id, ip })
}

/// Provision a build instance end to end.
pub async fn run(config: &ProvisionConfig) -> Result<WorkflowOutput> {
    let http = new_http_client()?;
    let session = issue_token(&http, &config.auth).await?;
    let compute = ComputeApi::new(http.clone(), session.compute_url.clone(), session.token.clone());

    // 同名キーペアが残っていても再利用できるので 409 は握りつぶす
    let keypair_name = match &config.ssh_public_key {
        Some(public_key) => {
            let name = names::timestamped("bakeflow-ci");
            match compute.create_keypair(&name, public_key).await {
                Ok(()) => tracing::info!(keypair_name = %name, "keypair registered"),
                Err(NhnError::Api { status: 409, .. }) => {
                    tracing::warn!(keypair_name = %name, "keypair already exists, reusing");
                }
                Err(e) => return Err(e.into()),
            }
            Some(name)
        }
        None => None,
    };

    let flavor_id = resolve::flavor(&compute, &config.flavor).await?;
    let images = ImageApi::new(
        http,
        NhnEndpoints.image_base_from_compute(&session.compute_url),
        session.token.clone(),
    );
    let image_id = resolve::image(&images, &config.image).await?;

    let instance_name = names::timestamped(&format!("{}-build", config.app));
    let mut metadata = BTreeMap::new();
    metadata.insert("purpose".to_string(), "ci-build".to_string());
    metadata.insert("app".to_string(), config.app.clone());

    let booted = boot_server(
        &compute,
        BootSpec {
            name: instance_name.clone(),
            flavor_id,
            image_id,
            network_id: config.network_id.clone(),
            key_name: keypair_name.clone(),
            security_group: config.security_group.clone(),
            metadata,
        },
    )
    .await?;
    tracing::info!(instance_id = %booted.id, ip = %booted.ip, "build instance is ACTIVE");

    let mut output = WorkflowOutput::new();
    output.set("instance_id", booted.id);
    output.set("instance_ip", booted.ip);
    output.set("instance_name", instance_name);
    if let Some(keypair_name) = keypair_name {
        output.set("keypair_name", keypair_name);
    }
    // 後続ステージ (capture / validate) が同じセッションを使い回す
    output.set("token", session.token);
    output.set("compute_url", session.compute_url);
    Ok(output)
}
