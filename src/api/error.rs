use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImgbbError {
  #[error("credentials are not set")]
  CredentialsMissing,

  #[error("api rejected the request (status={status:?}): {message}")]
  ApiFailure { status: StatusCode, message: String },

  #[error("invalid image payload: {reason}")]
  InvalidImage { reason: String },

  #[error("failed to open requested resource: {resource:?}")]
  ResourceNotFound { resource: String },

  #[error("request failed")]
  HttpFailure(#[from] reqwest::Error),
}
