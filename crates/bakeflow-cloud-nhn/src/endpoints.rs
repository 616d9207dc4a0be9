//! Region / endpoint derivation
//!
//! NHN Cloud names its infrastructure endpoints by service infix: the
//! compute API lives on a `…-api-instance-…` host and the image API on
//! the matching `…-api-image-…` host. The derivation is a pure string
//! transform encoding that convention; it sits behind a trait so a
//! different region scheme (or provider) can substitute its own.

/// Maps compute endpoints and region codes to image API base URLs.
pub trait EndpointScheme {
    /// Image API base for the region a compute endpoint belongs to.
    fn image_base_from_compute(&self, compute_url: &str) -> String;

    /// Image API base for a bare region code.
    fn image_base_for_region(&self, region: &str) -> String;
}

/// The NHN Cloud infrastructure endpoint convention.
///
/// ```
/// use bakeflow_cloud_nhn::endpoints::{EndpointScheme, NhnEndpoints};
///
/// let scheme = NhnEndpoints;
/// assert_eq!(
///     scheme.image_base_from_compute(
///         "https://kr1-api-instance-infrastructure.nhncloudservice.com/v2/tenant-id"
///     ),
///     "https://kr1-api-image-infrastructure.nhncloudservice.com"
/// );
/// assert_eq!(
///     scheme.image_base_for_region("KR2"),
///     "https://kr2-api-image-infrastructure.nhncloudservice.com"
/// );
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct NhnEndpoints;

impl EndpointScheme for NhnEndpoints {
    fn image_base_from_compute(&self, compute_url: &str) -> String {
        let base = compute_url
            .split("/v2/")
            .next()
            .unwrap_or(compute_url)
            .trim_end_matches('/');
        base.replace("-instance-", "-image-")
    }

    fn image_base_for_region(&self, region: &str) -> String {
        let region = region.trim().to_lowercase();
        let region = if region.is_empty() {
            "kr1".to_string()
        } else {
            region
        };
        format!("https://{region}-api-image-infrastructure.nhncloudservice.com")
    }
}
