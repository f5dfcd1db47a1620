/*! Error types for Chimera operations. */

use super::WindowId;

/// Errors that can occur during Chimera operations.
///
/// User-facing mistakes (bad terminal commands, unknown window names) are
/// never errors: they surface as terminal lines or are ignored.
#[derive(Debug, thiserror::Error)]
pub enum ChimeraError {
  #[error("Window not found: {0}")]
  WindowNotFound(WindowId),

  #[error("Invalid configuration: {0}")]
  InvalidConfig(String),

  #[error("Internal error: {0}")]
  Internal(String),
}

/// Result type for Chimera operations.
pub type ChimeraResult<T> = Result<T, ChimeraError>;
