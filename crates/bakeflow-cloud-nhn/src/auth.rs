//! Identity service: token issue and endpoint selection
//!
//! One token per invocation, scoped to the tenant; never persisted,
//! never refreshed. The compute endpoint for the configured region is
//! read from the service catalog returned alongside the token.

use crate::error::{NhnError, Result};
use crate::transport::ensure_success;
use serde::{Deserialize, Serialize};

/// Tenant credentials for the identity exchange.
#[derive(Debug, Clone)]
pub struct AuthConfig {
    pub auth_url: String,
    pub tenant_id: String,
    pub username: String,
    pub password: String,
    pub region: String,
}

/// Scoped token plus the compute endpoint it was resolved against.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub compute_url: String,
}

#[derive(Serialize)]
struct TokenRequest<'a> {
    auth: AuthPayload<'a>,
}

#[derive(Serialize)]
struct AuthPayload<'a> {
    #[serde(rename = "tenantId")]
    tenant_id: &'a str,
    #[serde(rename = "passwordCredentials")]
    password_credentials: PasswordCredentials<'a>,
}

#[derive(Serialize)]
struct PasswordCredentials<'a> {
    username: &'a str,
    password: &'a str,
}

#[derive(Deserialize)]
struct TokenResponse {
    access: Access,
}

#[derive(Deserialize)]
struct Access {
    token: Token,
    #[serde(rename = "serviceCatalog", default)]
    service_catalog: Vec<CatalogService>,
}

#[derive(Deserialize)]
struct Token {
    id: String,
}

#[derive(Deserialize)]
pub(crate) struct CatalogService {
    #[serde(rename = "type", default)]
    service_type: String,
    #[serde(default)]
    endpoints: Vec<CatalogEndpoint>,
}

#[derive(Deserialize)]
pub(crate) struct CatalogEndpoint {
    #[serde(default)]
    region: String,
    #[serde(rename = "publicURL", default)]
    public_url: String,
}

/// Issue a token and resolve the compute endpoint for the region.
pub async fn issue_token(http: &reqwest::Client, config: &AuthConfig) -> Result<Session> {
    let url = format!("{}/tokens", config.auth_url.trim_end_matches('/'));
    let request = TokenRequest {
        auth: AuthPayload {
            tenant_id: &config.tenant_id,
            password_credentials: PasswordCredentials {
                username: &config.username,
                password: &config.password,
            },
        },
    };

    let response = ensure_success(http.post(&url).json(&request).send().await?).await?;
    let token_response: TokenResponse = response.json().await?;

    let compute_url = find_compute_url(&token_response.access.service_catalog, &config.region)
        .ok_or_else(|| NhnError::EndpointNotFound(config.region.clone()))?;

    tracing::debug!(region = %config.region, %compute_url, "issued token");

    Ok(Session {
        token: token_response.access.token.id,
        compute_url,
    })
}

/// Scan the catalog for the compute service's public endpoint in
/// `region`.
fn find_compute_url(catalog: &[CatalogService], region: &str) -> Option<String> {
    catalog
        .iter()
        .find(|service| service.service_type == "compute")?
        .endpoints
        .iter()
        .find(|endpoint| endpoint.region == region)
        .map(|endpoint| endpoint.public_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_catalog() -> Vec<CatalogService> {
        serde_json::from_value(serde_json::json!([
            {
                "type": "image",
                "endpoints": [
                    {"region": "KR1", "publicURL": "https://kr1-api-image-infrastructure.nhncloudservice.com"}
                ]
            },
            {
                "type": "compute",
                "endpoints": [
                    {"region": "KR1", "publicURL": "https://kr1-api-instance-infrastructure.nhncloudservice.com/v2/tenant"},
                    {"region": "KR2", "publicURL": "https://kr2-api-instance-infrastructure.nhncloudservice.com/v2/tenant"}
                ]
            }
        ]))
        .unwrap()
    }

    #[test]
    fn compute_endpoint_is_selected_by_region() {
        let url = find_compute_url(&sample_catalog(), "KR2").unwrap();
        assert_eq!(
            url,
            "https://kr2-api-instance-infrastructure.nhncloudservice.com/v2/tenant"
        );
    }

    #[test]
    fn unknown_region_yields_none() {
        assert!(find_compute_url(&sample_catalog(), "JP1").is_none());
    }

    #[test]
    fn token_response_parses() {
        let response: TokenResponse = serde_json::from_value(serde_json::json!({
            "access": {
                "token": {"id": "tok-123", "expires": "2026-04-01T00:00:00Z"},
                "serviceCatalog": []
            }
        }))
        .unwrap();
        assert_eq!(response.access.token.id, "tok-123");
        assert!(response.access.service_catalog.is_empty());
    }
}
