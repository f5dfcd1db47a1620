/*! Branded ID types for type-safe window references. */

use derive_more::{Display, From, Into};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Prefix shared by every window id (`window-terminal`, `window-about`, ...).
pub(crate) const WINDOW_ID_PREFIX: &str = "window-";

/// Window identifier, e.g. `window-terminal`.
///
/// Windows are declared up front, so ids are plain strings that match the
/// renderer's element ids rather than generated counters.
#[derive(
  Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, TS, Display, From, Into,
)]
#[ts(export)]
pub struct WindowId(pub String);

impl WindowId {
  /// Build the id for a short window name: `terminal` -> `window-terminal`.
  pub fn from_name(name: &str) -> Self {
    Self(format!("{WINDOW_ID_PREFIX}{name}"))
  }

  /// Short name without the `window-` prefix. Ids without the prefix are returned whole.
  pub fn name(&self) -> &str {
    self.0.strip_prefix(WINDOW_ID_PREFIX).unwrap_or(&self.0)
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for WindowId {
  fn from(id: &str) -> Self {
    Self(id.to_owned())
  }
}
