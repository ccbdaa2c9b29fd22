use crate::api::image_id_from_url;

use serde::Deserialize;
use serde_json::Value;

/// Response of an upload submission.
///
/// The vendor does not document this schema, so every field is optional and
/// unknown fields are ignored. Nothing beyond "parses as JSON" is validated.
#[derive(Debug, Clone, Deserialize)]
pub struct UploadResponse {
  pub status_code: Option<u16>,
  pub status_txt: Option<String>,
  pub success: Option<UploadStatus>,
  pub image: Option<UploadedImage>,
  /// Uploader account metadata, shape not guaranteed
  pub user: Option<Value>,
  /// Album metadata, shape not guaranteed
  pub album: Option<Value>,
  /// Request parameters echoed back by the vendor
  pub request: Option<Value>,
}

/// Status block attached to successful uploads
#[derive(Debug, Clone, Deserialize)]
pub struct UploadStatus {
  pub message: Option<String>,
  pub code: Option<u16>,
}

/// Metadata of the uploaded image
#[derive(Debug, Clone, Deserialize)]
pub struct UploadedImage {
  pub id_encoded: Option<String>,
  pub name: Option<String>,
  pub filename: Option<String>,
  pub title: Option<String>,
  pub extension: Option<String>,
  pub mime: Option<String>,
  pub width: Option<JsonNumber>,
  pub height: Option<JsonNumber>,
  pub size: Option<JsonNumber>,
  pub time: Option<JsonNumber>,
  pub expiration: Option<JsonNumber>,
  pub url: Option<String>,
  pub url_viewer: Option<String>,
  pub display_url: Option<String>,
  pub delete_url: Option<String>,
  pub thumb: Option<MediaVariant>,
  pub medium: Option<MediaVariant>,
}

impl UploadedImage {
  /// ID segment of the CDN url, when the vendor returned one.
  pub fn cdn_id(&self) -> Option<String> {
    image_id_from_url(self.url.as_deref()?)
  }
}

/// Thumbnail or medium-size rendition of an uploaded image
#[derive(Debug, Clone, Deserialize)]
pub struct MediaVariant {
  pub filename: Option<String>,
  pub name: Option<String>,
  pub mime: Option<String>,
  pub extension: Option<String>,
  pub url: Option<String>,
}

/// Numeric field the vendor serializes either as a number or as a numeric
/// string depending on the endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum JsonNumber {
  Int(i64),
  Text(String),
}

impl JsonNumber {
  pub fn value(&self) -> Option<i64> {
    match self {
      JsonNumber::Int(n) => Some(*n),
      JsonNumber::Text(s) => s.parse().ok(),
    }
  }
}
