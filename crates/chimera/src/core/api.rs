/*!
Public operations on a Chimera instance.

Each call takes the write lock once, runs to completion, and emits its
events before returning.
*/

use super::Chimera;
use crate::types::{
  BootPhase, ChimeraError, ChimeraResult, Input, Snapshot, Window, WindowId,
};
use std::time::Duration;

impl Chimera {
  /// Route an input from the renderer to its handler.
  pub fn dispatch(&self, input: Input) {
    self.write(|d| d.dispatch(input));
  }

  /// Open a window. Unknown ids and already-open windows are ignored.
  pub fn open(&self, id: &WindowId) {
    self.write(|d| d.open(id));
  }

  /// Close a window. Unknown ids and already-closed windows are ignored.
  pub fn close(&self, id: &WindowId) {
    self.write(|d| d.close(id));
  }

  /// Bring a window to front and make it active. Ignored for closed windows.
  pub fn focus(&self, id: &WindowId) {
    self.write(|d| d.focus(id));
  }

  /// Submit a line to the terminal, as if typed and followed by Enter.
  pub fn submit(&self, line: &str) {
    self.write(|d| d.submit(line));
  }

  /// Switch to the next theme.
  pub fn cycle_theme(&self) {
    self.write(|d| d.cycle_theme());
  }

  /// Switch to a known theme. Returns false (and changes nothing) for unknown names.
  pub fn set_theme(&self, name: &str) -> bool {
    self.write(|d| d.set_theme(name))
  }

  /// Move virtual time forward, firing any timers that come due.
  pub fn advance(&self, by: Duration) {
    self.write(|d| {
      let target = d.now() + by;
      d.advance_to(target);
    });
  }

  /// Full state snapshot.
  pub fn snapshot(&self) -> Snapshot {
    self.read(|d| d.snapshot())
  }

  /// Get a window by id.
  pub fn window(&self, id: &WindowId) -> ChimeraResult<Window> {
    self
      .read(|d| d.window(id))
      .ok_or_else(|| ChimeraError::WindowNotFound(id.clone()))
  }

  /// All declared windows, in dock order.
  pub fn windows(&self) -> Vec<Window> {
    self.read(|d| d.windows())
  }

  pub fn active_window(&self) -> Option<WindowId> {
    self.read(|d| d.active_window())
  }

  pub fn theme(&self) -> &'static str {
    self.read(|d| d.theme())
  }

  pub fn boot_phase(&self) -> BootPhase {
    self.read(|d| d.boot_phase().clone())
  }

  /// Time since the last (re)boot.
  pub fn uptime(&self) -> Duration {
    self.read(|d| d.uptime())
  }
}
