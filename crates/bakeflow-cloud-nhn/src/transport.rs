//! Shared request plumbing

use crate::error::{NhnError, Result};
use std::time::Duration;

/// Header carrying the scoped token on every control-plane call.
pub(crate) const AUTH_HEADER: &str = "X-Auth-Token";

/// Longest body excerpt kept when reporting an API error.
pub(crate) const BODY_EXCERPT_LIMIT: usize = 500;

/// Build the HTTP client shared by all API surfaces.
///
/// No total request timeout: image transfers are multi-gigabyte and
/// may legitimately run for up to an hour. Only connection
/// establishment is bounded.
pub fn new_http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(30))
        .build()?;
    Ok(client)
}

/// Pass 2xx responses through; map anything else to [`NhnError::Api`]
/// with the status and a bounded body excerpt.
pub(crate) async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(NhnError::Api {
        status: status.as_u16(),
        body: excerpt(&body),
    })
}

/// Truncate to [`BODY_EXCERPT_LIMIT`] bytes on a char boundary.
pub(crate) fn excerpt(body: &str) -> String {
    if body.len() <= BODY_EXCERPT_LIMIT {
        return body.to_string();
    }
    let mut end = BODY_EXCERPT_LIMIT;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept_verbatim() {
        assert_eq!(excerpt("conflict"), "conflict");
    }

    #[test]
    fn long_body_is_truncated_on_char_boundary() {
        let body = "あ".repeat(400); // 1200 bytes
        let truncated = excerpt(&body);

        assert!(truncated.len() <= BODY_EXCERPT_LIMIT + 3);
        assert!(truncated.ends_with("..."));
        // No broken UTF-8 at the cut.
        assert!(truncated.chars().all(|c| c == 'あ' || c == '.'));
    }
}
