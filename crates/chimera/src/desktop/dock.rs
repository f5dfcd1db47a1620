/*!
Dock - a mirror of which windows are open, plus icon magnification.
*/

use super::Desktop;
use crate::types::{DockEntry, DockItemScale, Event, WindowId};

/// Scale of an icon directly under the pointer.
const MAX_SCALE: f64 = 1.8;
/// Pixels of distance per unit of scale lost.
const FALLOFF_PX: f64 = 70.0;
/// Pixels an icon rises per unit of extra scale.
const LIFT_PX: f64 = 20.0;

/// Scale for an icon centered at `center_x` with the pointer at `pointer_x`.
pub(crate) fn magnification(pointer_x: f64, center_x: f64) -> f64 {
  (MAX_SCALE - (pointer_x - center_x).abs() / FALLOFF_PX).max(1.0)
}

fn item_scale(window_id: WindowId, scale: f64) -> DockItemScale {
  DockItemScale {
    window_id,
    scale,
    lift: (scale - 1.0) * LIFT_PX,
  }
}

impl Desktop {
  /// Dock entries in declaration order.
  pub(crate) fn dock(&self) -> Vec<DockEntry> {
    self
      .windows
      .iter()
      .map(|w| DockEntry {
        window_id: w.id.clone(),
        active: w.state.is_open(),
      })
      .collect()
  }

  pub(crate) fn emit_dock_changed(&self, id: &WindowId) {
    if let Some(entry) = self.dock().into_iter().find(|e| e.window_id == *id) {
      self.emit(Event::DockChanged { entry });
    }
  }

  /// Dock icon click: focus the window if open, open it otherwise.
  pub(crate) fn dock_click(&mut self, id: &WindowId) {
    match self.window_state(id) {
      None => log::debug!("dock: no window {id}"),
      Some(state) if state.is_open() => self.focus(id),
      Some(_) => self.open(id),
    }
  }

  /// Scale every icon by its distance from the pointer (`x` relative to the dock).
  pub(crate) fn magnify_dock(&self, x: f64) {
    let width = self.config.dock_item_width;
    let stride = width + self.config.dock_item_gap;

    let mut left = 0.0;
    let mut items = Vec::with_capacity(self.windows.len());
    for window in &self.windows {
      let center = left + width / 2.0;
      items.push(item_scale(window.id.clone(), magnification(x, center)));
      left += stride;
    }

    self.emit(Event::DockMagnified { items });
  }

  /// Pointer left the dock: every icon back to neutral.
  pub(crate) fn reset_dock_magnification(&self) {
    let items = self
      .windows
      .iter()
      .map(|w| item_scale(w.id.clone(), 1.0))
      .collect();
    self.emit(Event::DockMagnified { items });
  }
}
