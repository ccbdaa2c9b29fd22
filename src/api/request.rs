use std::fmt;

use crate::api::consts::*;
use crate::api::error::*;

use reqwest::blocking::multipart::Part;

/// Image payload of an upload
pub enum ImageData {
  /// Raw image bytes. A MIME type is looked up from the upload name's extension.
  Bytes(Vec<u8>),
  /// Ready-made multipart part, passed through as-is.
  Part(Part),
}

impl ImageData {
  /// Turn the payload into the multipart `source` part, attaching `name` as
  /// its filename.
  pub(crate) fn into_part(self, name: &str) -> Result<Part, ImgbbError> {
    match self {
      ImageData::Bytes(bytes) => {
        let part = Part::bytes(bytes).file_name(name.to_string());
        match mime_guess::from_path(name).first_raw() {
          Some(mime) => part.mime_str(mime).map_err(|e| ImgbbError::InvalidImage {
            reason: e.to_string(),
          }),
          None => Ok(part),
        }
      }
      ImageData::Part(part) => Ok(part.file_name(name.to_string())),
    }
  }
}

impl fmt::Debug for ImageData {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      ImageData::Bytes(bytes) => write!(f, "ImageData::Bytes({} bytes)", bytes.len()),
      ImageData::Part(_) => write!(f, "ImageData::Part"),
    }
  }
}

impl From<Vec<u8>> for ImageData {
  fn from(bytes: Vec<u8>) -> Self {
    ImageData::Bytes(bytes)
  }
}

impl From<&[u8]> for ImageData {
  fn from(bytes: &[u8]) -> Self {
    ImageData::Bytes(bytes.to_vec())
  }
}

impl From<Part> for ImageData {
  fn from(part: Part) -> Self {
    ImageData::Part(part)
  }
}

/// Parameters of a single upload
#[derive(Debug)]
pub struct UploadRequest {
  /// Image payload to submit
  pub image: ImageData,
  /// Serve the request from this user's subdomain instead of the configured one
  pub username: Option<String>,
  /// Image lifetime. Defaults to `Expiration::SixMonths`.
  pub expiration: Option<Expiration>,
  /// Album to file the image under
  pub album: Option<String>,
  /// Upload name, also used for the MIME lookup. Defaults to "image.png".
  pub name: Option<String>,
}

impl UploadRequest {
  pub fn new(image: impl Into<ImageData>) -> Self {
    Self {
      image: image.into(),
      username: None,
      expiration: None,
      album: None,
      name: None,
    }
  }
}

/// Images to delete: a single ID, or an ordered batch
#[derive(Debug, Clone)]
pub enum DeleteTarget {
  Single(String),
  Batch(Vec<String>),
}

impl From<&str> for DeleteTarget {
  fn from(id: &str) -> Self {
    DeleteTarget::Single(id.to_string())
  }
}

impl From<String> for DeleteTarget {
  fn from(id: String) -> Self {
    DeleteTarget::Single(id)
  }
}

impl From<Vec<String>> for DeleteTarget {
  fn from(ids: Vec<String>) -> Self {
    DeleteTarget::Batch(ids)
  }
}

impl From<Vec<&str>> for DeleteTarget {
  fn from(ids: Vec<&str>) -> Self {
    DeleteTarget::Batch(ids.into_iter().map(String::from).collect())
  }
}

/// Wire fields of a delete submission.
///
/// Batch order is preserved and duplicate IDs are submitted verbatim.
pub(crate) fn delete_fields(target: &DeleteTarget, auth_token: &str) -> Vec<(String, String)> {
  let mut fields = vec![
    ("action".to_string(), "delete".to_string()),
    ("auth_token".to_string(), auth_token.to_string()),
  ];

  match target {
    DeleteTarget::Single(id) => {
      fields.push(("single".to_string(), "true".to_string()));
      fields.push(("delete".to_string(), "image".to_string()));
      fields.push(("deleting[id]".to_string(), id.clone()));
    }
    DeleteTarget::Batch(ids) => {
      fields.push(("from".to_string(), "list".to_string()));
      fields.push(("multiple".to_string(), "true".to_string()));
      fields.push(("delete".to_string(), "images".to_string()));
      for id in ids {
        fields.push(("deleting[ids][]".to_string(), id.clone()));
      }
    }
  }

  fields
}
