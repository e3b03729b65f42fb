use std::io;

use thiserror::Error;

/// Error type for loading render options.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("Configuration error: {0}")]
  Config(String),

  #[error("I/O error: {0}")]
  Io(#[from] io::Error),

  #[error("Serde error: {0}")]
  Serde(#[from] serde_json::Error),

  #[error("TOML error: {0}")]
  Toml(#[from] toml::de::Error),
}

/// Reasons a link href is refused when sanitization is enabled.
///
/// These never leave the renderer: a refused link renders as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SanitizeError {
  #[error("Malformed percent escape at byte {0}")]
  MalformedEscape(usize),

  #[error("Percent-decoded href is not valid UTF-8")]
  InvalidUtf8,

  #[error("Blocked protocol '{0}'")]
  BlockedProtocol(&'static str),
}
