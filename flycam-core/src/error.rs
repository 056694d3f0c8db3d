use std::path::PathBuf;

use thiserror::Error;

/// Failures while loading or validating a camera configuration.
///
/// The camera itself never fails; every input is clamped.
#[derive(Debug, Error)]
pub enum ConfigError
{
  #[error("failed to read camera config {}: {source}", .path.display())]
  Io
  {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed camera config: {0}")]
  Parse(#[from] serde_json::Error),

  #[error("invalid camera config: {0}")]
  Invalid(String),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
