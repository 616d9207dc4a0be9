//! Compute API client
//!
//! Servers, keypairs, flavors and the create-image server action. All
//! mutating calls are asynchronous on the provider side: they return
//! as soon as the request is accepted, and the caller polls the
//! resource until it settles.

use crate::error::{NhnError, Result};
use crate::transport::{AUTH_HEADER, ensure_success};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Compute API surface, bound to one endpoint and one token.
pub struct ComputeApi {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// Server create request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateServer {
    pub name: String,
    #[serde(rename = "flavorRef")]
    pub flavor_ref: String,
    #[serde(rename = "imageRef")]
    pub image_ref: String,
    pub networks: Vec<NetworkRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub security_groups: Option<Vec<SecurityGroupRef>>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NetworkRef {
    pub uuid: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SecurityGroupRef {
    pub name: String,
}

/// Server detail as read back from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerDetail {
    pub id: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub addresses: HashMap<String, Vec<ServerAddress>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerAddress {
    #[serde(default)]
    pub version: u8,
    #[serde(default)]
    pub addr: String,
}

impl ServerDetail {
    /// First IPv4 address across all attached networks.
    pub fn ipv4_address(&self) -> Option<&str> {
        self.addresses
            .values()
            .flatten()
            .find(|address| address.version == 4)
            .map(|address| address.addr.as_str())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct FlavorInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Serialize)]
struct KeypairRequest<'a> {
    keypair: KeypairPayload<'a>,
}

#[derive(Serialize)]
struct KeypairPayload<'a> {
    name: &'a str,
    public_key: &'a str,
}

#[derive(Serialize)]
struct CreateServerRequest<'a> {
    server: &'a CreateServer,
}

#[derive(Deserialize)]
struct CreateServerResponse {
    server: CreatedServer,
}

#[derive(Deserialize)]
struct CreatedServer {
    id: String,
}

#[derive(Deserialize)]
struct ServerEnvelope {
    server: ServerDetail,
}

#[derive(Deserialize)]
struct FlavorsResponse {
    #[serde(default)]
    flavors: Vec<FlavorInfo>,
}

#[derive(Serialize)]
struct ServerImageAction<'a> {
    #[serde(rename = "createImage")]
    create_image: CreateImagePayload<'a>,
}

#[derive(Serialize)]
struct CreateImagePayload<'a> {
    name: &'a str,
    metadata: &'a BTreeMap<String, String>,
}

impl ComputeApi {
    pub fn new(
        http: reqwest::Client,
        base_url: impl Into<String>,
        token: impl Into<String>,
    ) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            token: token.into(),
        }
    }

    /// Register an SSH keypair. Duplicate names surface as
    /// [`NhnError::Api`] with status 409; the caller decides whether
    /// reuse is acceptable.
    pub async fn create_keypair(&self, name: &str, public_key: &str) -> Result<()> {
        let url = format!("{}/os-keypairs", self.base_url);
        let request = KeypairRequest {
            keypair: KeypairPayload { name, public_key },
        };

        ensure_success(
            self.http
                .post(&url)
                .header(AUTH_HEADER, &self.token)
                .json(&request)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }

    /// Submit a server create request; returns the server id. The
    /// server itself is still building when this returns.
    pub async fn create_server(&self, server: &CreateServer) -> Result<String> {
        let url = format!("{}/servers", self.base_url);
        let response = ensure_success(
            self.http
                .post(&url)
                .header(AUTH_HEADER, &self.token)
                .json(&CreateServerRequest { server })
                .send()
                .await?,
        )
        .await?;

        let created: CreateServerResponse = response.json().await?;
        Ok(created.server.id)
    }

    /// Read a server's current state.
    pub async fn get_server(&self, id: &str) -> Result<ServerDetail> {
        let url = format!("{}/servers/{}", self.base_url, id);
        let response = self
            .http
            .get(&url)
            .header(AUTH_HEADER, &self.token)
            .send()
            .await?;

        if response.status().as_u16() == 404 {
            return Err(NhnError::NotFound(id.to_string()));
        }
        let response = ensure_success(response).await?;
        let envelope: ServerEnvelope = response.json().await?;
        Ok(envelope.server)
    }

    pub async fn list_flavors(&self) -> Result<Vec<FlavorInfo>> {
        let url = format!("{}/flavors", self.base_url);
        let response = ensure_success(
            self.http
                .get(&url)
                .header(AUTH_HEADER, &self.token)
                .send()
                .await?,
        )
        .await?;

        let flavors: FlavorsResponse = response.json().await?;
        Ok(flavors.flavors)
    }

    /// Trigger image creation from a server. The API only acknowledges
    /// the request; the image id must be resolved afterwards by
    /// listing images under the chosen name.
    pub async fn create_server_image(
        &self,
        server_id: &str,
        image_name: &str,
        metadata: &BTreeMap<String, String>,
    ) -> Result<()> {
        let url = format!("{}/servers/{}/action", self.base_url, server_id);
        let action = ServerImageAction {
            create_image: CreateImagePayload {
                name: image_name,
                metadata,
            },
        };

        ensure_success(
            self.http
                .post(&url)
                .header(AUTH_HEADER, &self.token)
                .json(&action)
                .send()
                .await?,
        )
        .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_ipv4_across_networks_is_extracted() {
        let detail: ServerDetail = serde_json::from_value(serde_json::json!({
            "id": "abc-123",
            "status": "ACTIVE",
            "addresses": {
                "private-net": [
                    {"version": 6, "addr": "fd00::4"},
                    {"version": 4, "addr": "10.0.0.4"}
                ]
            }
        }))
        .unwrap();

        assert_eq!(detail.ipv4_address(), Some("10.0.0.4"));
    }

    #[test]
    fn no_ipv4_yields_none() {
        let detail: ServerDetail = serde_json::from_value(serde_json::json!({
            "id": "abc-123",
            "status": "ACTIVE",
            "addresses": {"private-net": [{"version": 6, "addr": "fd00::4"}]}
        }))
        .unwrap();

        assert_eq!(detail.ipv4_address(), None);

        let empty: ServerDetail =
            serde_json::from_value(serde_json::json!({"id": "abc-123", "status": "BUILD"}))
                .unwrap();
        assert_eq!(empty.ipv4_address(), None);
    }

    #[test]
    fn create_server_serializes_provider_field_names() {
        let server = CreateServer {
            name: "app-build".to_string(),
            flavor_ref: "flavor-1".to_string(),
            image_ref: "image-1".to_string(),
            networks: vec![NetworkRef {
                uuid: "net-1".to_string(),
            }],
            key_name: None,
            security_groups: None,
            metadata: BTreeMap::new(),
        };

        let value = serde_json::to_value(&server).unwrap();
        assert_eq!(value["flavorRef"], "flavor-1");
        assert_eq!(value["imageRef"], "image-1");
        assert_eq!(value["networks"][0]["uuid"], "net-1");
        assert!(value.get("key_name").is_none());
        assert!(value.get("security_groups").is_none());
    }
}
