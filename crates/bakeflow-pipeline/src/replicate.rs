//! Cross-region image replication
//!
//! Describe → open source stream → create target record → streamed
//! upload → wait for activation. The payload is piped from the source
//! download into the target upload as one logical stream with bounded
//! buffering; it is never materialized in memory.
//!
//! Each step is a hard failure point. A failure after the target
//! record exists leaves the partial record in place for operator
//! inspection; a re-run creates a fresh record instead of resuming.

use crate::capture::{IMAGE_POLL_INTERVAL, IMAGE_POLL_TIMEOUT};
use crate::classify;
use crate::config::ReplicateConfig;
use crate::error::Result;
use bakeflow_cloud_nhn::endpoints::{EndpointScheme, NhnEndpoints};
use bakeflow_cloud_nhn::{CreateImageRecord, ImageApi, ImageDetail, new_http_client};
use bakeflow_core::{Poller, ResourceKind, ResourceRef, WorkflowOutput};

const DEFAULT_CONTAINER_FORMAT: &str = "bare";
const DEFAULT_DISK_FORMAT: &str = "raw";

/// Exactly the metadata needed to create a compatible target record.
#[derive(Debug, Clone)]
pub struct TransferDescriptor {
    pub source: ResourceRef,
    pub target_region: String,
    pub container_format: String,
    pub disk_format: String,
}

impl TransferDescriptor {
    /// Formats missing on the source record fall back to the provider
    /// defaults instead of failing the transfer.
    pub fn new(source: ResourceRef, target_region: &str, metadata: &ImageDetail) -> Self {
        Self {
            source,
            target_region: target_region.to_string(),
            container_format: metadata
                .container_format
                .clone()
                .unwrap_or_else(|| DEFAULT_CONTAINER_FORMAT.to_string()),
            disk_format: metadata
                .disk_format
                .clone()
                .unwrap_or_else(|| DEFAULT_DISK_FORMAT.to_string()),
        }
    }
}

/// Replicate a source image into the target region.
pub async fn run(config: &ReplicateConfig) -> Result<WorkflowOutput> {
    let http = new_http_client()?;
    let source_api = ImageApi::new(
        http.clone(),
        config.source_image_base.clone(),
        config.token.clone(),
    );
    let target_api = ImageApi::new(
        http,
        NhnEndpoints.image_base_for_region(&config.target_region),
        config.token.clone(),
    );

    // 1. describe — a missing source is the distinguished NotFound
    let source = ResourceRef::identified(
        ResourceKind::Image,
        config.source_image_name.clone(),
        config.source_image_id.clone(),
    );
    let metadata = source_api.get_image(&config.source_image_id).await?;
    let descriptor = TransferDescriptor::new(source, &config.target_region, &metadata);

    // 2. open the source stream before anything exists remotely
    let download = source_api.open_download(&config.source_image_id).await?;
    let content_length = download.content_length();
    tracing::info!(
        source_id = %config.source_image_id,
        ?content_length,
        "source stream opened"
    );

    // 3. metadata-only target record; failing here is the cheapest
    //    failure point, nothing has moved yet
    let record = CreateImageRecord {
        name: descriptor.source.name.clone(),
        container_format: descriptor.container_format.clone(),
        disk_format: descriptor.disk_format.clone(),
        visibility: "private".to_string(),
    };
    let created = target_api.create_record(&record).await?;
    let mut target = ResourceRef::named(ResourceKind::Image, descriptor.source.name.clone());
    let target_id = target.assign_id(created.id)?.to_string();
    tracing::info!(%target_id, region = %config.target_region, "target record created, uploading");

    // 4. pipe the still-open download straight into the upload
    target_api
        .upload(&target_id, download.into_body(), content_length)
        .await?;

    // 5. wait for activation
    let poller = Poller::new(
        format!("image {} in {}", target_id, config.target_region),
        IMAGE_POLL_INTERVAL,
        IMAGE_POLL_TIMEOUT,
    );
    let api_ref = &target_api;
    let id = target_id.as_str();
    poller
        .wait_for(move || async move {
            api_ref.get_image(id).await.map(classify::image_observation)
        })
        .await?;
    tracing::info!(%target_id, region = %config.target_region, "replica is active");

    let mut output = WorkflowOutput::new();
    output.set("target_image_id", target_id);
    output.set("target_region", config.target_region.clone());
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source_ref() -> ResourceRef {
        ResourceRef::identified(ResourceKind::Image, "app-image", "abc-123")
    }

    fn detail(container_format: Option<&str>, disk_format: Option<&str>) -> ImageDetail {
        ImageDetail {
            id: "abc-123".to_string(),
            name: Some("app-image".to_string()),
            status: "active".to_string(),
            container_format: container_format.map(str::to_string),
            disk_format: disk_format.map(str::to_string),
            created_at: None,
        }
    }

    #[test]
    fn source_formats_are_carried_over() {
        let descriptor =
            TransferDescriptor::new(source_ref(), "kr2", &detail(Some("bare"), Some("qcow2")));

        assert_eq!(descriptor.container_format, "bare");
        assert_eq!(descriptor.disk_format, "qcow2");
        assert_eq!(descriptor.target_region, "kr2");
    }

    #[test]
    fn missing_formats_fall_back_to_defaults() {
        let descriptor = TransferDescriptor::new(source_ref(), "kr2", &detail(None, None));

        assert_eq!(descriptor.container_format, "bare");
        assert_eq!(descriptor.disk_format, "raw");
    }
}
