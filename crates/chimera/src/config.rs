/*!
Configuration for Chimera.

All values have sensible defaults matching the stock desktop. Override
individual fields from JSON; missing fields keep their defaults:

```
use chimera::Config;

let config = Config::from_json(r#"{ "close_delay_ms": 500 }"#).unwrap();
assert_eq!(config.close_delay_ms, 500);
assert_eq!(config.open_delay_ms, 10);
```
*/

use crate::types::{ChimeraError, ChimeraResult, WindowId};
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

/// One line of the boot splash, shown `at_ms` after boot starts.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BootStep {
  /// Delay from boot start.
  pub at_ms: u64,
  /// Splash text, shown verbatim.
  pub text: String,
}

impl BootStep {
  fn new(at_ms: u64, text: &str) -> Self {
    Self {
      at_ms,
      text: text.to_owned(),
    }
  }
}

/// Chimera configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
  /// Short names of the declared windows, in dock order.
  /// Default: about, terminal, projects.
  pub windows: Vec<String>,

  /// Windows opened when boot completes, in order (the last one ends up on top).
  /// Default: about, terminal.
  pub boot_windows: Vec<String>,

  /// Splash lines. Default: the four kernel messages at 1.5s intervals.
  pub boot_steps: Vec<BootStep>,

  /// When the splash hides and boot windows open.
  /// Default: 7500ms.
  pub boot_complete_ms: u64,

  /// Opening -> Open transition. Default: 10ms.
  pub open_delay_ms: u64,

  /// Closing -> Closed transition, matching the CSS close animation. Default: 300ms.
  pub close_delay_ms: u64,

  /// Delay between `reboot` and the reset. Default: 1000ms.
  pub reboot_delay_ms: u64,

  /// Initial window size. Default: 600x400.
  pub window_width: f64,
  pub window_height: f64,

  /// Minimum window size when resizing. Default: 300x200.
  pub min_window_width: f64,
  pub min_window_height: f64,

  /// Desktop size until the renderer reports its viewport. Default: 1280x800.
  pub viewport_width: f64,
  pub viewport_height: f64,

  /// Dock layout used to locate icon centers. Default: 50px icons, 10px gap.
  pub dock_item_width: f64,
  pub dock_item_gap: f64,

  /// How often the ticker advances the clock.
  /// Default: 8ms (~120Hz).
  pub tick_interval_ms: u64,

  /// Capacity of the event broadcast channel.
  /// Default: 1000 events.
  pub event_channel_capacity: usize,
}

impl Default for Config {
  fn default() -> Self {
    Self {
      windows: vec!["about".into(), "terminal".into(), "projects".into()],
      boot_windows: vec!["about".into(), "terminal".into()],
      boot_steps: vec![
        BootStep::new(1500, "> Chimera Kernel Initializing..."),
        BootStep::new(3000, "> Mounting virtual filesystem..."),
        BootStep::new(4500, "> Starting hybrid interface..."),
        BootStep::new(6000, "> System Ready. Welcome, User."),
      ],
      boot_complete_ms: 7500,
      open_delay_ms: 10,
      close_delay_ms: 300,
      reboot_delay_ms: 1000,
      window_width: 600.0,
      window_height: 400.0,
      min_window_width: 300.0,
      min_window_height: 200.0,
      viewport_width: 1280.0,
      viewport_height: 800.0,
      dock_item_width: 50.0,
      dock_item_gap: 10.0,
      tick_interval_ms: 8,
      event_channel_capacity: 1000,
    }
  }
}

impl Config {
  /// Create a new config with default values.
  pub fn new() -> Self {
    Self::default()
  }

  /// Parse a (possibly partial) JSON config and validate it.
  pub fn from_json(json: &str) -> ChimeraResult<Self> {
    let config: Self =
      serde_json::from_str(json).map_err(|e| ChimeraError::InvalidConfig(e.to_string()))?;
    config.validate()?;
    Ok(config)
  }

  /// Check cross-field invariants.
  pub fn validate(&self) -> ChimeraResult<()> {
    if self.windows.is_empty() {
      return Err(ChimeraError::InvalidConfig("no windows declared".into()));
    }

    let mut seen = HashSet::new();
    for name in &self.windows {
      if name.is_empty() || name.chars().any(char::is_whitespace) {
        return Err(ChimeraError::InvalidConfig(format!(
          "invalid window name {name:?}"
        )));
      }
      if !seen.insert(name.as_str()) {
        return Err(ChimeraError::InvalidConfig(format!(
          "window {name:?} declared twice"
        )));
      }
    }

    if let Some(missing) = self.boot_windows.iter().find(|n| !seen.contains(n.as_str())) {
      return Err(ChimeraError::InvalidConfig(format!(
        "boot window {missing:?} is not declared"
      )));
    }

    if self.min_window_width <= 0.0 || self.min_window_height <= 0.0 {
      return Err(ChimeraError::InvalidConfig(
        "minimum window size must be positive".into(),
      ));
    }

    if self.tick_interval_ms == 0 || self.event_channel_capacity == 0 {
      return Err(ChimeraError::InvalidConfig(
        "tick interval and event capacity must be non-zero".into(),
      ));
    }

    Ok(())
  }

  /// Declared window ids, in dock order.
  pub fn window_ids(&self) -> impl Iterator<Item = WindowId> + '_ {
    self.windows.iter().map(|name| WindowId::from_name(name))
  }

  pub(crate) const fn open_delay(&self) -> Duration {
    Duration::from_millis(self.open_delay_ms)
  }

  pub(crate) const fn close_delay(&self) -> Duration {
    Duration::from_millis(self.close_delay_ms)
  }

  pub(crate) const fn reboot_delay(&self) -> Duration {
    Duration::from_millis(self.reboot_delay_ms)
  }

  pub(crate) const fn tick_interval(&self) -> Duration {
    Duration::from_millis(self.tick_interval_ms)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_is_valid() {
    assert!(Config::default().validate().is_ok());
  }

  #[test]
  fn partial_json_keeps_defaults() {
    let config = Config::from_json(r#"{ "windows": ["about", "terminal"] }"#).unwrap();
    assert_eq!(config.windows, vec!["about", "terminal"]);
    assert_eq!(config.close_delay_ms, 300);
    assert_eq!(config.boot_steps.len(), 4);
  }

  #[test]
  fn rejects_duplicate_windows() {
    let err = Config::from_json(r#"{ "windows": ["about", "about", "terminal"] }"#);
    assert!(matches!(err, Err(ChimeraError::InvalidConfig(_))));
  }

  #[test]
  fn rejects_undeclared_boot_window() {
    let config = Config {
      boot_windows: vec!["browser".into()],
      ..Config::default()
    };
    assert!(config.validate().is_err());
  }

  #[test]
  fn rejects_malformed_json() {
    assert!(Config::from_json("{ windows: ").is_err());
  }

  #[test]
  fn window_ids_are_prefixed() {
    let ids: Vec<_> = Config::default().window_ids().collect();
    assert_eq!(ids[1], WindowId::from("window-terminal"));
  }
}
