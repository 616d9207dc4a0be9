//! Image API client
//!
//! Image records, name-filtered listing, and the binary payload
//! endpoints. Payload transfer is streaming in both directions: a
//! download is handed to the caller as an unread body, and an upload
//! accepts any [`reqwest::Body`], so a download can be piped straight
//! into an upload without materializing the payload.

use crate::error::{NhnError, Result};
use crate::transport::{AUTH_HEADER, ensure_success};
use serde::{Deserialize, Serialize};

/// Image API surface, bound to one regional endpoint and one token.
pub struct ImageApi {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

/// Image record as read back from the API.
#[derive(Debug, Clone, Deserialize)]
pub struct ImageDetail {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub container_format: Option<String>,
    #[serde(default)]
    pub disk_format: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Metadata-only image record create request.
#[derive(Debug, Clone, Serialize)]
pub struct CreateImageRecord {
    pub name: String,
    pub container_format: String,
    pub disk_format: String,
    pub visibility: String,
}

/// A streamed image payload download. The body has not been read when
/// this is handed out; [`ImageDownload::into_body`] turns it into an
/// upload body without buffering.
pub struct ImageDownload {
    response: reqwest::Response,
}

impl ImageDownload {
    /// `Content-Length` as reported by the source, if any. Forwarded
    /// verbatim on upload so the target can validate completeness.
    pub fn content_length(&self) -> Option<u64> {
        self.response
            .headers()
            .get(reqwest::header::CONTENT_LENGTH)?
            .to_str()
            .ok()?
            .parse()
            .ok()
    }

    pub fn into_body(self) -> reqwest::Body {
        reqwest::Body::wrap_stream(self.response.bytes_stream())
    }
}

#[derive(Deserialize)]
struct ImageListResponse {
    #[serde(default)]
    images: Vec<ImageDetail>,
}

/// Some deployments wrap single-image payloads in an `{"image": ...}`
/// envelope, others return the record flat. Accept both.
fn unwrap_envelope(value: serde_json::Value) -> serde_json::Value {
    match value {
        serde_json::Value::Object(mut map) if map.contains_key("image") => {
            map.remove("image").unwrap_or(serde_json::Value::Null)
        }
        other => other,
    }
}

impl ImageApi {
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

    /// Read an image record. A 404 is the distinguished
    /// [`NhnError::NotFound`], expected on lookups that probe for an
    /// image which may not exist.
    pub async fn get_image(&self, id: &str) -> Result<ImageDetail> {
        let url = format!("{}/v2/images/{}", self.base_url, id);
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
        let value: serde_json::Value = response.json().await?;
        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }

    /// List images, optionally filtered by exact name.
    pub async fn list_images(&self, name: Option<&str>) -> Result<Vec<ImageDetail>> {
        let url = format!("{}/v2/images", self.base_url);
        let mut request = self.http.get(&url).header(AUTH_HEADER, &self.token);
        if let Some(name) = name {
            request = request.query(&[("name", name)]);
        }

        let response = ensure_success(request.send().await?).await?;
        let list: ImageListResponse = response.json().await?;
        Ok(list.images)
    }

    /// Create a metadata-only image record; the payload is uploaded
    /// separately.
    pub async fn create_record(&self, record: &CreateImageRecord) -> Result<ImageDetail> {
        let url = format!("{}/v2/images", self.base_url);
        let response = ensure_success(
            self.http
                .post(&url)
                .header(AUTH_HEADER, &self.token)
                .json(record)
                .send()
                .await?,
        )
        .await?;

        let value: serde_json::Value = response.json().await?;
        Ok(serde_json::from_value(unwrap_envelope(value))?)
    }

    /// Begin a streamed download of an image payload.
    pub async fn open_download(&self, id: &str) -> Result<ImageDownload> {
        let url = format!("{}/v2/images/{}/file", self.base_url, id);
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
        Ok(ImageDownload { response })
    }

    /// Upload an image payload. `content_length`, when known, is
    /// forwarded so the target can validate the transfer size.
    pub async fn upload(
        &self,
        id: &str,
        body: reqwest::Body,
        content_length: Option<u64>,
    ) -> Result<()> {
        let url = format!("{}/v2/images/{}/file", self.base_url, id);
        let mut request = self
            .http
            .put(&url)
            .header(AUTH_HEADER, &self.token)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream");
        if let Some(length) = content_length {
            request = request.header(reqwest::header::CONTENT_LENGTH, length);
        }

        ensure_success(request.body(body).send().await?).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enveloped_and_flat_records_both_parse() {
        let enveloped = serde_json::json!({
            "image": {"id": "abc-123", "status": "active", "disk_format": "qcow2"}
        });
        let flat = serde_json::json!({"id": "abc-123", "status": "active"});

        let from_envelope: ImageDetail =
            serde_json::from_value(unwrap_envelope(enveloped)).unwrap();
        let from_flat: ImageDetail = serde_json::from_value(unwrap_envelope(flat)).unwrap();

        assert_eq!(from_envelope.id, "abc-123");
        assert_eq!(from_envelope.disk_format.as_deref(), Some("qcow2"));
        assert_eq!(from_flat.id, "abc-123");
        assert_eq!(from_flat.disk_format, None);
    }

    #[test]
    fn missing_formats_deserialize_as_none() {
        let detail: ImageDetail = serde_json::from_value(serde_json::json!({
            "id": "abc-123",
            "status": "queued"
        }))
        .unwrap();

        assert_eq!(detail.container_format, None);
        assert_eq!(detail.disk_format, None);
        assert_eq!(detail.status, "queued");
    }

    #[test]
    fn create_record_serializes_flat() {
        let record = CreateImageRecord {
            name: "app-20260401-120000".to_string(),
            container_format: "bare".to_string(),
            disk_format: "qcow2".to_string(),
            visibility: "private".to_string(),
        };

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["name"], "app-20260401-120000");
        assert_eq!(value["visibility"], "private");
        assert!(value.get("image").is_none());
    }
}
