/*! Input events forwarded by the renderer. */

use super::WindowId;
use serde::Deserialize;
use ts_rs::TS;

/// Everything the page can tell the desktop.
///
/// Each variant has exactly one handler in `Desktop::dispatch`.
#[derive(Debug, Clone, PartialEq, Deserialize, TS)]
#[serde(tag = "input", content = "data", rename_all = "snake_case")]
#[ts(export)]
pub enum Input {
  /// Any click on the page body. The first one starts the ambience track.
  BodyClick,
  PointerMove { x: f64, y: f64 },
  PointerDown,
  PointerUp,

  /// Click on a dock icon.
  DockClick { window_id: WindowId },
  /// Pointer moved over the dock; `x` is relative to the dock's left edge.
  DockPointerMove { x: f64 },
  DockPointerLeave,

  /// Mouse down anywhere inside a window (capture phase).
  WindowMouseDown { window_id: WindowId },
  /// Click on a window's close button.
  CloseButton { window_id: WindowId },
  WindowDrag { window_id: WindowId, dx: f64, dy: f64 },
  WindowDragEnd { window_id: WindowId },
  WindowResize { window_id: WindowId, w: f64, h: f64 },
  ViewportResized { w: f64, h: f64 },

  ThemeSwitcherClick,

  /// Key pressed in the terminal prompt; `value` is the prompt contents.
  TerminalKey { key: String, value: String },
}
