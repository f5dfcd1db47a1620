/*! Window type representing one desktop "application" panel. */

use super::{Bounds, WindowId};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Display state of a window.
///
/// `Opening` and `Closing` are the short CSS transitions between the two
/// resting states. A window is visible in every state except `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum WindowState {
  #[default]
  Closed,
  Opening,
  Open,
  Closing,
}

impl WindowState {
  /// Whether the window is in the visual tree.
  pub const fn is_visible(self) -> bool {
    !matches!(self, Self::Closed)
  }

  /// Open or on its way to open. `open` is a no-op in these states.
  pub const fn is_open(self) -> bool {
    matches!(self, Self::Opening | Self::Open)
  }

  /// Whether the window can take focus.
  pub const fn is_focusable(self) -> bool {
    self.is_open()
  }
}

/// A desktop window as seen by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Window {
  pub id: WindowId,
  pub title: String,
  pub state: WindowState,
  pub active: bool,
  /// Stacking order: higher values are drawn in front.
  pub z_index: u32,
  pub bounds: Bounds,
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn only_closed_is_hidden() {
    assert!(!WindowState::Closed.is_visible());
    assert!(WindowState::Opening.is_visible());
    assert!(WindowState::Open.is_visible());
    assert!(WindowState::Closing.is_visible());
  }

  #[test]
  fn closing_is_not_focusable() {
    assert!(WindowState::Opening.is_focusable());
    assert!(WindowState::Open.is_focusable());
    assert!(!WindowState::Closing.is_focusable());
    assert!(!WindowState::Closed.is_focusable());
  }
}
