//! Machine-image capture
//!
//! The create-image server action only acknowledges the request — no
//! image id comes back. The workflow therefore chooses the image name
//! up front and resolves the id afterwards by polling a name-filtered
//! list (at most one match, the name is freshly generated). An empty
//! list is pending, not an error: the record may not be visible yet.

use crate::classify;
use crate::config::CaptureConfig;
use crate::error::Result;
use crate::names;
use bakeflow_cloud_nhn::endpoints::{EndpointScheme, NhnEndpoints};
use bakeflow_cloud_nhn::{ComputeApi, ImageApi, NhnError, new_http_client};
use bakeflow_core::{Observation, Poller, ResourceKind, ResourceRef, WorkflowOutput};
use std::collections::BTreeMap;
use std::time::Duration;

/// Image materialization is slow compared to boot: poll every 15s,
/// give up after 15 minutes.
pub const IMAGE_POLL_INTERVAL: Duration = Duration::from_secs(15);
pub const IMAGE_POLL_TIMEOUT: Duration = Duration::from_secs(900);

/// Capture an image from an instance and wait until it is `active`.
pub async fn run(config: &CaptureConfig) -> Result<WorkflowOutput> {
    let http = new_http_client()?;
    let compute = ComputeApi::new(
        http.clone(),
        config.compute_url.clone(),
        config.token.clone(),
    );

    let image_name = names::timestamped(&config.app);

    let mut metadata = BTreeMap::new();
    metadata.insert("purpose".to_string(), "ci-build".to_string());
    metadata.insert("app".to_string(), config.app.clone());
    if let Some(git_sha) = &config.git_sha {
        metadata.insert("git_sha".to_string(), git_sha.clone());
    }

    compute
        .create_server_image(&config.instance_id, &image_name, &metadata)
        .await?;
    tracing::info!(%image_name, instance_id = %config.instance_id, "image capture requested");

    let images = ImageApi::new(
        http,
        NhnEndpoints.image_base_from_compute(&config.compute_url),
        config.token.clone(),
    );

    let poller = Poller::new(
        format!("image {image_name}"),
        IMAGE_POLL_INTERVAL,
        IMAGE_POLL_TIMEOUT,
    );
    let images_ref = &images;
    let name = image_name.as_str();
    let detail = poller
        .wait_for(move || async move {
            let matches = images_ref.list_images(Some(name)).await?;
            Ok::<_, NhnError>(match matches.into_iter().next() {
                Some(image) => classify::image_observation(image),
                None => Observation::Pending {
                    state: "not yet listed".to_string(),
                },
            })
        })
        .await?;

    let mut image_ref = ResourceRef::named(ResourceKind::Image, image_name.clone());
    let image_id = image_ref.assign_id(detail.id)?.to_string();
    tracing::info!(%image_id, "image is active");

    let mut output = WorkflowOutput::new();
    output.set("image_id", image_id);
    output.set("image_name", image_name);
    Ok(output)
}
