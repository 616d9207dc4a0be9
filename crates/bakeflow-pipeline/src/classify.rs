//! Per-workflow state classification
//!
//! Instances and images speak different status vocabularies, so each
//! workflow supplies its own mapping into the poller's three outcomes.

use bakeflow_cloud_nhn::{ImageDetail, ServerDetail};
use bakeflow_core::Observation;

/// Instance vocabulary: `ACTIVE` succeeds, `ERROR` fails, everything
/// else (`BUILD`, spawning states, …) is pending.
pub(crate) fn server_observation(detail: ServerDetail) -> Observation<ServerDetail> {
    if detail.status == "ACTIVE" {
        Observation::Ready(detail)
    } else if detail.status == "ERROR" {
        Observation::Failed {
            state: detail.status,
        }
    } else {
        Observation::Pending {
            state: detail.status,
        }
    }
}

/// Image vocabulary: `active` succeeds, `killed` and `deleted` fail,
/// everything else (`queued`, `saving`, `uploading`, …) is pending.
pub(crate) fn image_observation(detail: ImageDetail) -> Observation<ImageDetail> {
    if detail.status == "active" {
        Observation::Ready(detail)
    } else if detail.status == "killed" || detail.status == "deleted" {
        Observation::Failed {
            state: detail.status,
        }
    } else {
        Observation::Pending {
            state: detail.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn server(status: &str) -> ServerDetail {
        ServerDetail {
            id: "abc-123".to_string(),
            status: status.to_string(),
            addresses: HashMap::new(),
        }
    }

    fn image(status: &str) -> ImageDetail {
        ImageDetail {
            id: "abc-123".to_string(),
            name: None,
            status: status.to_string(),
            container_format: None,
            disk_format: None,
            created_at: None,
        }
    }

    #[test]
    fn server_vocabulary() {
        assert!(matches!(
            server_observation(server("ACTIVE")),
            Observation::Ready(_)
        ));
        assert!(matches!(
            server_observation(server("ERROR")),
            Observation::Failed { state } if state == "ERROR"
        ));
        assert!(matches!(
            server_observation(server("BUILD")),
            Observation::Pending { state } if state == "BUILD"
        ));
        // Vocabularies are case-sensitive and per-kind.
        assert!(matches!(
            server_observation(server("active")),
            Observation::Pending { .. }
        ));
    }

    #[test]
    fn image_vocabulary() {
        assert!(matches!(
            image_observation(image("active")),
            Observation::Ready(_)
        ));
        assert!(matches!(
            image_observation(image("killed")),
            Observation::Failed { state } if state == "killed"
        ));
        assert!(matches!(
            image_observation(image("deleted")),
            Observation::Failed { .. }
        ));
        assert!(matches!(
            image_observation(image("saving")),
            Observation::Pending { .. }
        ));
    }
}
