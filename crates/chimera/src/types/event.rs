/*! Event types for state changes and synchronization. */

use super::{Point, SoundCue, TerminalLine, Window, WindowId};
use serde::Serialize;
use ts_rs::TS;

/// Dock item state. `active` mirrors "the window is open".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct DockEntry {
  pub window_id: WindowId,
  pub active: bool,
}

/// Magnification applied to one dock item.
#[derive(Debug, Clone, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct DockItemScale {
  pub window_id: WindowId,
  pub scale: f64,
  /// Upward translation in pixels.
  pub lift: f64,
}

/// Decorative cursor positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, TS)]
#[ts(export)]
pub struct CursorState {
  pub dot: Point,
  pub circle: Point,
  /// Circle scale: shrinks while a button is held.
  pub scale: f64,
}

/// Progress of the boot splash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[serde(tag = "phase", rename_all = "snake_case")]
#[ts(export)]
pub enum BootPhase {
  /// Splash visible. `text` is the latest splash line, if any was shown yet.
  Booting { text: Option<String> },
  /// Splash hidden.
  Complete,
}

/// Initial state sent on connection and after a reboot.
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export)]
pub struct Snapshot {
  pub windows: Vec<Window>,
  pub active_window: Option<WindowId>,
  pub dock: Vec<DockEntry>,
  pub theme: String,
  /// Theme banner shown above the terminal log.
  pub banner: String,
  pub terminal: Vec<TerminalLine>,
  pub boot: BootPhase,
  /// Milliseconds since the last (re)boot.
  pub uptime_ms: u64,
  pub cursor: Option<CursorState>,
  pub clock: Option<String>,
}

/// Events emitted when state changes.
#[derive(Debug, Clone, Serialize, TS)]
#[serde(tag = "event", content = "data")]
#[ts(export)]
pub enum Event {
  // Initial sync (on connection, after reboot)
  #[serde(rename = "sync:init")]
  SyncInit(Box<Snapshot>),

  // Full reset requested by `reboot`; a fresh `sync:init` follows
  #[serde(rename = "system:reload")]
  Reload,

  // Boot splash
  #[serde(rename = "boot:step")]
  BootStep { text: String },
  #[serde(rename = "boot:complete")]
  BootComplete,

  // Window lifecycle
  #[serde(rename = "window:changed")]
  WindowChanged { window: Window },
  #[serde(rename = "focus:window")]
  FocusWindow { window_id: Option<WindowId> },

  // Dock
  #[serde(rename = "dock:changed")]
  DockChanged { entry: DockEntry },
  #[serde(rename = "dock:magnified")]
  DockMagnified { items: Vec<DockItemScale> },

  // Theme
  #[serde(rename = "theme:changed")]
  ThemeChanged { theme: String },

  // Terminal
  #[serde(rename = "terminal:banner")]
  BannerRendered { art: String },
  #[serde(rename = "terminal:line")]
  TerminalLine { line: TerminalLine },
  #[serde(rename = "terminal:cleared")]
  TerminalCleared,

  // Ambient
  #[serde(rename = "sound:play")]
  Sound(SoundCue),
  #[serde(rename = "cursor:moved")]
  Cursor(CursorState),
  #[serde(rename = "clock:tick")]
  Clock { time: String },
}

impl Event {
  /// Wire name, as found in the `event` field.
  pub const fn name(&self) -> &'static str {
    match self {
      Self::SyncInit(_) => "sync:init",
      Self::Reload => "system:reload",
      Self::BootStep { .. } => "boot:step",
      Self::BootComplete => "boot:complete",
      Self::WindowChanged { .. } => "window:changed",
      Self::FocusWindow { .. } => "focus:window",
      Self::DockChanged { .. } => "dock:changed",
      Self::DockMagnified { .. } => "dock:magnified",
      Self::ThemeChanged { .. } => "theme:changed",
      Self::BannerRendered { .. } => "terminal:banner",
      Self::TerminalLine { .. } => "terminal:line",
      Self::TerminalCleared => "terminal:cleared",
      Self::Sound(_) => "sound:play",
      Self::Cursor(_) => "cursor:moved",
      Self::Clock { .. } => "clock:tick",
    }
  }
}
