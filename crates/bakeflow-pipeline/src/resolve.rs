//! Reference → identifier resolution
//!
//! Glue between the pure matcher in `bakeflow_core::locate` and the
//! provider list endpoints. A reference that already matches the
//! canonical identifier syntax never touches the network.

use crate::error::Result;
use bakeflow_cloud_nhn::{ComputeApi, ImageApi};
use bakeflow_core::locate::{self, Candidate};

/// Resolve a flavor reference. Flavors report no creation timestamp,
/// so duplicate names fall back to input order.
pub async fn flavor(compute: &ComputeApi, reference: &str) -> Result<String> {
    if locate::is_canonical_id(reference) {
        return Ok(reference.to_string());
    }

    let flavors = compute.list_flavors().await?;
    let candidates: Vec<Candidate> = flavors
        .into_iter()
        .map(|flavor| Candidate {
            id: flavor.id,
            name: flavor.name,
            created_at: None,
        })
        .collect();

    Ok(locate::pick(reference, &candidates)?.id)
}

/// Resolve an image reference against the images visible in the
/// region.
pub async fn image(images: &ImageApi, reference: &str) -> Result<String> {
    if locate::is_canonical_id(reference) {
        return Ok(reference.to_string());
    }

    let list = images.list_images(None).await?;
    let candidates: Vec<Candidate> = list
        .into_iter()
        .map(|image| Candidate {
            id: image.id,
            name: image.name.unwrap_or_default(),
            created_at: image.created_at,
        })
        .collect();

    Ok(locate::pick(reference, &candidates)?.id)
}
