pub mod consts;
pub mod error;
pub mod request;
pub mod response;

use std::env;
use std::path::Path;

use crate::api::consts::*;
use crate::api::error::*;
use crate::api::request::*;
use crate::api::response::*;

use chrono::Utc;
use log::debug;
use reqwest::blocking::multipart::Form;
use reqwest::blocking::Response;
use reqwest::header;
use url::Url;

/// Credential set used to authenticate every operation
#[derive(Debug, Clone)]
pub struct Credentials {
  /// API key, sent as `auth_token` in every form body
  pub key: String,
  /// Logged-in session cookie, sent verbatim in the `cookie` header
  pub cookie: String,
  /// Account name whose subdomain serves the requests
  pub username: String,
}

impl Credentials {
  /// Create a credential set.
  ///
  /// Fields are not validated here; operations check for presence right
  /// before the first network access.
  ///
  /// # Arguments
  ///
  /// * `key` - API key of the account
  /// * `cookie` - Logged-in session cookie
  /// * `username` - Account name
  pub fn new(key: &str, cookie: &str, username: &str) -> Self {
    Self {
      key: key.into(),
      cookie: cookie.into(),
      username: username.into(),
    }
  }

  /// Read the credential set from the `IMGBB_API_KEY`, `IMGBB_COOKIE` and
  /// `IMGBB_USERNAME` environment variables.
  ///
  /// Returns `None` if any of them is unset or empty.
  pub fn from_env() -> Option<Self> {
    let key = env::var(ENV_API_KEY).unwrap_or("".into());
    let cookie = env::var(ENV_COOKIE).unwrap_or("".into());
    let username = env::var(ENV_USERNAME).unwrap_or("".into());

    if key.is_empty() || cookie.is_empty() || username.is_empty() {
      None
    } else {
      Some(Self {
        key,
        cookie,
        username,
      })
    }
  }

  // All three fields are required jointly before any network I/O.
  fn ensure(&self) -> Result<(), ImgbbError> {
    if self.key.is_empty() || self.cookie.is_empty() || self.username.is_empty() {
      Err(ImgbbError::CredentialsMissing)
    } else {
      Ok(())
    }
  }
}

/// Imgbb client instance
pub struct Imgbb {
  /// Credential set read by every operation
  credentials: Credentials,
  /// Overrides the vendor hosts when set (test servers, self-hosted instances)
  base_url: Option<String>,
  // HTTP client reused across operations
  client: reqwest::blocking::Client,
}

impl Imgbb {
  /// Create a new client instance.
  ///
  /// Credentials are immutable for the lifetime of the client; build one
  /// client per credential set.
  ///
  /// # Arguments
  ///
  /// * `credentials` - Credential set to authenticate with
  pub fn new(credentials: Credentials) -> Self {
    Self {
      credentials,
      base_url: None,
      client: reqwest::blocking::Client::new(),
    }
  }

  /// Create a client that sends every request to `base_url` instead of the
  /// vendor hosts.
  ///
  /// # Arguments
  ///
  /// * `credentials` - Credential set to authenticate with
  /// * `base_url` - Scheme and host to target, without a path
  pub fn with_base_url(credentials: Credentials, base_url: &str) -> Self {
    Self {
      credentials,
      base_url: Some(base_url.trim_end_matches('/').to_string()),
      client: reqwest::blocking::Client::new(),
    }
  }

  /// Upload an image.
  ///
  /// Unset request fields fall back to their defaults: the configured
  /// username, a six-month expiration and the upload name "image.png".
  /// The response is decoded as-is; the vendor guarantees nothing about
  /// its shape beyond being JSON.
  ///
  /// # Arguments
  ///
  /// * `request` - Image payload and per-upload parameters
  pub fn upload_image(&self, request: UploadRequest) -> Result<UploadResponse, ImgbbError> {
    self.credentials.ensure()?;

    let name = request.name.unwrap_or(DEFAULT_UPLOAD_NAME.into());
    let expiration = request.expiration.unwrap_or_default();
    let album = request.album.unwrap_or("".into());
    let source = request.image.into_part(&name)?;

    let form = Form::new()
      .text("action", "upload")
      .text("album_id", album)
      .text("auth_token", self.credentials.key.clone())
      .text("expiration", expiration.to_string())
      .part("source", source)
      .text("timestamp", Utc::now().timestamp_millis().to_string())
      .text("type", "file");

    let res = self.api_request(
      form,
      RequestOptions {
        username: request.username,
        ..Default::default()
      },
    )?;

    Ok(res.json::<UploadResponse>()?)
  }

  /// Upload an image file.
  ///
  /// The upload name is taken from the file name, which also drives the
  /// MIME lookup.
  ///
  /// # Arguments
  ///
  /// * `image_path` - Path to the image file to upload
  pub fn upload_file(&self, image_path: &Path) -> Result<UploadResponse, ImgbbError> {
    if !image_path.exists() || !image_path.is_file() {
      return Err(ImgbbError::ResourceNotFound {
        resource: image_path.to_string_lossy().to_string(),
      });
    }

    let bytes = std::fs::read(image_path).map_err(|_| ImgbbError::ResourceNotFound {
      resource: image_path.to_string_lossy().to_string(),
    })?;

    let mut request = UploadRequest::new(bytes);
    request.name = image_path
      .file_name()
      .map(|name| name.to_string_lossy().to_string());

    self.upload_image(request)
  }

  /// Delete uploaded images.
  ///
  /// An empty batch returns `Ok(None)` without touching the network. The
  /// vendor reports no per-ID outcome for batches, so the response is
  /// returned as raw JSON for the caller to interpret.
  ///
  /// # Arguments
  ///
  /// * `target` - ID of the image to delete, or a batch of IDs
  pub fn remove_images(
    &self,
    target: impl Into<DeleteTarget>,
  ) -> Result<Option<serde_json::Value>, ImgbbError> {
    self.credentials.ensure()?;

    let target = target.into();
    if let DeleteTarget::Batch(ids) = &target {
      if ids.is_empty() {
        debug!("empty delete batch, skipping request");
        return Ok(None);
      }
    }

    let form = delete_fields(&target, &self.credentials.key)
      .into_iter()
      .fold(Form::new(), |form, (name, value)| form.text(name, value));

    // Deletion is served from the user's subdomain, unlike upload.
    let res = self.api_request(
      form,
      RequestOptions {
        endpoint_use_origin: true,
        ..Default::default()
      },
    )?;

    Ok(Some(res.json::<serde_json::Value>()?))
  }

  /// Send an authenticated POST carrying `form` to the vendor's JSON
  /// endpoint.
  ///
  /// A non-2xx response becomes `ApiFailure` with the message found in the
  /// error body when there is one.
  fn api_request(&self, form: Form, options: RequestOptions) -> Result<Response, ImgbbError> {
    let username = options
      .username
      .as_deref()
      .unwrap_or(&self.credentials.username);
    let origin = match (options.origin, &self.base_url) {
      (Some(origin), _) => origin,
      (None, Some(base)) => base.clone(),
      (None, None) if !username.is_empty() => format!("https://{}.{}", username, IMGBB_HOST),
      (None, None) => IMGBB_URL_BASE.to_string(),
    };
    let endpoint = match (options.endpoint, &self.base_url) {
      (Some(endpoint), _) => endpoint,
      (None, Some(base)) => format!("{}{}", base, IMGBB_PATH_JSON),
      (None, None) if options.endpoint_use_origin => format!("{}{}", origin, IMGBB_PATH_JSON),
      (None, None) => format!("{}{}", IMGBB_URL_BASE, IMGBB_PATH_JSON),
    };
    let cookie = options.cookie.as_deref().unwrap_or(&self.credentials.cookie);

    debug!("POST {} (origin: {})", endpoint, origin);
    let res = self
      .client
      .post(&endpoint)
      .header(header::COOKIE, cookie)
      .header(header::ORIGIN, origin.as_str())
      .multipart(form)
      .send()?;

    let status = res.status();
    if !status.is_success() {
      let message = res
        .json::<serde_json::Value>()
        .ok()
        .and_then(|body| Some(body.get("error")?.get("message")?.as_str()?.to_string()))
        .unwrap_or(UNKNOWN_ERROR_MESSAGE.to_string());
      return Err(ImgbbError::ApiFailure { status, message });
    }

    Ok(res)
  }
}

/// Per-request overrides for `api_request`
#[derive(Default)]
struct RequestOptions {
  /// Explicit origin override
  origin: Option<String>,
  /// Explicit endpoint override, used as-is
  endpoint: Option<String>,
  /// Derive the endpoint from the origin instead of the default host
  endpoint_use_origin: bool,
  /// Username whose subdomain serves the request
  username: Option<String>,
  /// Cookie header override
  cookie: Option<String>,
}

/// Extract the image ID from a CDN url.
///
/// Uploads are served from `https://i.ibb.co/<id>/<filename>`; this returns
/// the `<id>` segment. Inputs that do not look like a CDN url yield `None`,
/// never an error.
///
/// # Arguments
///
/// * `url` - Url to extract the ID from
pub fn image_id_from_url(url: &str) -> Option<String> {
  let parsed = Url::parse(url).ok()?;
  if parsed.scheme() != "http" && parsed.scheme() != "https" {
    return None;
  }
  if parsed.host_str()? != IMGBB_HOST_CDN {
    return None;
  }

  let id = parsed.path_segments()?.next()?;
  if id.is_empty() {
    None
  } else {
    Some(id.to_string())
  }
}
