use std::fmt;

pub const ENV_API_KEY: &str = "IMGBB_API_KEY";
pub const ENV_COOKIE: &str = "IMGBB_COOKIE";
pub const ENV_USERNAME: &str = "IMGBB_USERNAME";

pub const IMGBB_URL_BASE: &str = "https://imgbb.com";
pub const IMGBB_HOST: &str = "imgbb.com";
pub const IMGBB_PATH_JSON: &str = "/json";
pub const IMGBB_HOST_CDN: &str = "i.ibb.co";

pub const DEFAULT_UPLOAD_NAME: &str = "image.png";
pub const UNKNOWN_ERROR_MESSAGE: &str = "unknown API error";

/// Lifetime of an uploaded image
#[derive(Debug, Clone, Copy)]
pub enum Expiration {
  OneHour,
  SixMonths,
  Never,
}

impl fmt::Display for Expiration {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    // "Never" is the empty string on the wire
    let value = match self {
      Expiration::OneHour => "PT1H",
      Expiration::SixMonths => "P6M",
      Expiration::Never => "",
    };
    write!(f, "{}", value)
  }
}

impl Default for Expiration {
  fn default() -> Self {
    Expiration::SixMonths
  }
}
