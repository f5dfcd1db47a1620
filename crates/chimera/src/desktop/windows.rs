/*!
Window operations for the Desktop.

Lifecycle: `open`, `close`, `focus`, plus the timer callbacks that finish
the Opening/Closing transitions.
Geometry: `drag`, `end_drag`, `resize`, `set_viewport`.

## Transitions

Each window holds at most one in-flight transition token. Starting a new
transition cancels the previous one, so a close during Opening takes effect
immediately and a reopen during Closing keeps the window on screen.
*/

use std::time::Duration;

use super::timers::{Task, TimerToken};
use super::Desktop;
use crate::types::{Bounds, Event, Sound, Window, WindowId, WindowState};

/// Per-window state.
#[derive(Debug, Clone)]
pub(crate) struct WindowRecord {
  pub(crate) id: WindowId,
  pub(crate) state: WindowState,
  pub(crate) active: bool,
  pub(crate) z_index: u32,
  pub(crate) bounds: Bounds,
  /// Pending Opening/Closing completion, if any.
  pub(crate) transition: Option<TimerToken>,
}

impl WindowRecord {
  pub(crate) const fn new(id: WindowId, bounds: Bounds) -> Self {
    Self {
      id,
      state: WindowState::Closed,
      active: false,
      z_index: 0,
      bounds,
      transition: None,
    }
  }

  pub(crate) fn info(&self) -> Window {
    Window {
      id: self.id.clone(),
      title: self.id.name().to_owned(),
      state: self.state,
      active: self.active,
      z_index: self.z_index,
      bounds: self.bounds,
    }
  }
}

impl Desktop {
  fn record(&self, id: &WindowId) -> Option<&WindowRecord> {
    self.windows.iter().find(|w| w.id == *id)
  }

  fn record_mut(&mut self, id: &WindowId) -> Option<&mut WindowRecord> {
    self.windows.iter_mut().find(|w| w.id == *id)
  }

  /// Get a window by id.
  pub(crate) fn window(&self, id: &WindowId) -> Option<Window> {
    self.record(id).map(WindowRecord::info)
  }

  /// All declared windows, in declaration order.
  pub(crate) fn windows(&self) -> Vec<Window> {
    self.windows.iter().map(WindowRecord::info).collect()
  }

  pub(crate) fn window_state(&self, id: &WindowId) -> Option<WindowState> {
    self.record(id).map(|w| w.state)
  }

  pub(crate) fn active_window(&self) -> Option<WindowId> {
    self.windows.iter().find(|w| w.active).map(|w| w.id.clone())
  }

  fn emit_window_changed(&self, id: &WindowId) {
    if let Some(window) = self.window(id) {
      self.emit(Event::WindowChanged { window });
    }
  }

  /// Move a window into a transitional state and queue its completion.
  /// Any transition already in flight for the window is cancelled.
  fn begin_transition(&mut self, id: &WindowId, state: WindowState, delay: Duration, task: Task) {
    let token = self.timers.schedule(delay, task);
    let previous = self.record_mut(id).and_then(|w| {
      w.state = state;
      w.transition.replace(token)
    });
    if let Some(previous) = previous {
      self.timers.cancel(previous);
    }
  }

  /// Open a window. No-op if it is already open (or opening) or the id is unknown.
  pub(crate) fn open(&mut self, id: &WindowId) {
    let Some(state) = self.window_state(id) else {
      log::debug!("open: unknown window {id}, ignoring");
      return;
    };
    if state.is_open() {
      return;
    }

    let delay = self.config.open_delay();
    self.begin_transition(id, WindowState::Opening, delay, Task::FinishOpening(id.clone()));
    self.focus(id);
    self.emit_dock_changed(id);
    self.play(Sound::Click);
  }

  /// Close a window. No-op if it is already closed (or closing) or the id is unknown.
  pub(crate) fn close(&mut self, id: &WindowId) {
    let Some(state) = self.window_state(id) else {
      log::debug!("close: unknown window {id}, ignoring");
      return;
    };
    if !state.is_open() {
      return;
    }

    let delay = self.config.close_delay();
    self.begin_transition(id, WindowState::Closing, delay, Task::FinishClosing(id.clone()));

    // A closing window gives up focus; nothing else takes it.
    let was_active = self.record_mut(id).is_some_and(|w| std::mem::take(&mut w.active));
    if was_active {
      self.emit(Event::FocusWindow { window_id: None });
    }

    self.emit_window_changed(id);
    self.emit_dock_changed(id);
    self.play(Sound::Click);
  }

  /// Make a window the single active window and raise it above all others.
  ///
  /// Ignored for unknown ids and for windows that are closed or closing.
  pub(crate) fn focus(&mut self, id: &WindowId) {
    match self.window_state(id) {
      None => {
        log::debug!("focus: unknown window {id}, ignoring");
        return;
      }
      Some(state) if !state.is_focusable() => return,
      Some(_) => {}
    }

    let mut top = self.top_z_index();
    if top == u32::MAX {
      self.compact_stacking();
      top = self.top_z_index();
    }

    let mut previous = None;
    for window in &mut self.windows {
      if window.active && window.id != *id {
        window.active = false;
        previous = Some(window.id.clone());
      }
    }

    let was_active = self.record_mut(id).is_some_and(|w| {
      let was_active = w.active;
      w.active = true;
      w.z_index = top + 1;
      was_active
    });

    if let Some(previous) = previous {
      self.emit_window_changed(&previous);
    }
    self.emit_window_changed(id);
    if !was_active {
      self.emit(Event::FocusWindow {
        window_id: Some(id.clone()),
      });
    }
  }

  fn top_z_index(&self) -> u32 {
    self.windows.iter().map(|w| w.z_index).max().unwrap_or(0)
  }

  /// Renumber raised windows 1..=n, keeping their relative order.
  /// Windows that were never raised stay at 0.
  fn compact_stacking(&mut self) {
    let mut raised: Vec<&mut WindowRecord> =
      self.windows.iter_mut().filter(|w| w.z_index > 0).collect();
    raised.sort_by_key(|w| w.z_index);
    let changed: Vec<WindowId> = (1..)
      .zip(raised)
      .filter_map(|(rank, w)| {
        let moved = w.z_index != rank;
        w.z_index = rank;
        moved.then(|| w.id.clone())
      })
      .collect();

    log::debug!("Stacking order compacted, {} windows renumbered", changed.len());
    for id in &changed {
      self.emit_window_changed(id);
    }
  }

  /// Timer callback: Opening -> Open.
  pub(super) fn finish_opening(&mut self, id: &WindowId, token: TimerToken) {
    self.finish_transition(id, token, WindowState::Opening, WindowState::Open);
  }

  /// Timer callback: Closing -> Closed (removed from the visual tree).
  pub(super) fn finish_closing(&mut self, id: &WindowId, token: TimerToken) {
    self.finish_transition(id, token, WindowState::Closing, WindowState::Closed);
  }

  fn finish_transition(
    &mut self,
    id: &WindowId,
    token: TimerToken,
    from: WindowState,
    to: WindowState,
  ) {
    let finished = self.record_mut(id).is_some_and(|w| {
      if w.transition != Some(token) || w.state != from {
        return false;
      }
      w.transition = None;
      w.state = to;
      true
    });

    if finished {
      self.emit_window_changed(id);
    } else {
      log::debug!("Stale transition for {id} ignored");
    }
  }

  /// Translate a visible window by a drag delta.
  pub(crate) fn drag(&mut self, id: &WindowId, dx: f64, dy: f64) {
    let moved = self.record_mut(id).is_some_and(|w| {
      if !w.state.is_visible() {
        return false;
      }
      w.bounds = w.bounds.translated(dx, dy);
      true
    });
    if moved {
      self.emit_window_changed(id);
    }
  }

  /// End of a drag: pull the window back inside the desktop if it was dropped outside.
  pub(crate) fn end_drag(&mut self, id: &WindowId) {
    let viewport = self.viewport;
    let moved = self.record_mut(id).is_some_and(|w| {
      let clamped = w.bounds.clamped_within(viewport);
      let moved = clamped != w.bounds;
      w.bounds = clamped;
      moved
    });
    if moved {
      self.emit_window_changed(id);
    }
  }

  /// Resize a visible window, never below the configured minimum size.
  pub(crate) fn resize(&mut self, id: &WindowId, w: f64, h: f64) {
    let (min_w, min_h) = (self.config.min_window_width, self.config.min_window_height);
    let resized = self.record_mut(id).is_some_and(|window| {
      if !window.state.is_visible() {
        return false;
      }
      window.bounds = window.bounds.resized(w, h, min_w, min_h);
      true
    });
    if resized {
      self.emit_window_changed(id);
    }
  }

  /// Record the desktop size used to restrict dragged windows.
  pub(crate) fn set_viewport(&mut self, w: f64, h: f64) {
    self.viewport = Bounds::sized(w.max(0.0), h.max(0.0));
  }
}
