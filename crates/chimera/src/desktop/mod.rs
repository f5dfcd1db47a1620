/*!
Desktop - the single source of truth for the faux desktop.

All fields are private. Mutations go through methods that maintain invariants
and emit events. This guarantees:
- At most one window is active
- The focused window always has the highest stacking value
- The theme selector is always a valid index
- Every state change reaches subscribers

## Module Structure

- `mod.rs` - Desktop struct, clock, input dispatch table, snapshot
- `windows.rs` - window records, open/close/focus, drag and resize
- `dock.rs` - dock mirror, click routing, magnification
- `theme.rs` - theme list, selector, banner art
- `terminal.rs` - terminal log and command dispatcher
- `boot.rs` - boot splash and reboot
- `cursor.rs` - cursor mirror, ambience, clock
- `timers.rs` - virtual clock and cancellable timers
*/

mod boot;
mod cursor;
mod dock;
mod terminal;
mod theme;
mod timers;
mod windows;

pub(crate) use cursor::clock_text;
pub use terminal::Command;
pub use theme::THEMES;

use async_broadcast::{Sender, TrySendError};
use std::time::Duration;

use crate::config::Config;
use crate::types::{Bounds, BootPhase, Event, Input, Point, Snapshot, Sound, SoundCue};
use cursor::Cursor;
use terminal::Terminal;
use theme::ThemeManager;
use timers::{Scheduler, Task, TimerToken};
use windows::WindowRecord;

/// Desktop state with automatic event emission.
pub(crate) struct Desktop {
  config: Config,
  events_tx: Sender<Event>,

  // Time
  timers: Scheduler,
  booted_at: Duration,
  boot: BootPhase,

  // Windows, in declaration (dock) order
  windows: Vec<WindowRecord>,
  viewport: Bounds,

  theme: ThemeManager,
  terminal: Terminal,

  // Ambient
  cursor: Cursor,
  ambient_started: bool,
  clock: Option<String>,
}

impl std::fmt::Debug for Desktop {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Desktop")
      .field("now", &self.timers.now())
      .field("boot", &self.boot)
      .field("theme", &self.theme.current())
      .finish_non_exhaustive()
  }
}

impl Desktop {
  /// Fresh desktop at time zero with the boot sequence queued.
  pub(crate) fn new(config: Config, events_tx: Sender<Event>) -> Self {
    Self::boot_at(config, events_tx, Duration::ZERO)
  }

  /// Initial state as of a page load happening at `now`.
  fn boot_at(config: Config, events_tx: Sender<Event>, now: Duration) -> Self {
    let size = Bounds::sized(config.window_width, config.window_height);
    let windows = config
      .window_ids()
      .map(|id| WindowRecord::new(id, size))
      .collect();
    let viewport = Bounds::sized(config.viewport_width, config.viewport_height);
    let themes = ThemeManager::default();

    let mut desktop = Self {
      config,
      events_tx,
      timers: Scheduler::starting_at(now),
      booted_at: now,
      boot: BootPhase::Booting { text: None },
      windows,
      viewport,
      theme: themes,
      terminal: Terminal::new(theme::banner_for(themes.current())),
      cursor: Cursor::default(),
      ambient_started: false,
      clock: None,
    };
    desktop.init_terminal();
    desktop.start_boot();
    desktop
  }

  /// Emit an event.
  ///
  /// The channel overflows by evicting its oldest event. Evictions are logged;
  /// having no active subscriber is not an error.
  pub(crate) fn emit(&self, event: Event) {
    match self.events_tx.try_broadcast(event) {
      Ok(None) => {}
      Ok(Some(evicted)) => log::warn!(
        "Event channel overflow - dropped oldest event {}. \
         Consider increasing event_channel_capacity or processing events faster.",
        evicted.name()
      ),
      Err(TrySendError::Inactive(_)) => {}
      Err(TrySendError::Closed(event)) => log::error!("Event channel closed, {} lost", event.name()),
      Err(TrySendError::Full(event)) => log::error!("Event channel full, {} lost", event.name()),
    }
  }

  /// Emit a one-shot sound cue.
  pub(crate) fn play(&self, sound: Sound) {
    self.emit(Event::Sound(SoundCue::once(sound)));
  }

  /// Virtual time since the desktop was created.
  pub(crate) const fn now(&self) -> Duration {
    self.timers.now()
  }

  /// Time since the last (re)boot.
  pub(crate) fn uptime(&self) -> Duration {
    self.now().saturating_sub(self.booted_at)
  }

  /// Run every timer due at or before `now`, in order, then move the clock to `now`.
  pub(crate) fn advance_to(&mut self, now: Duration) {
    while let Some((token, task)) = self.timers.pop_due(now) {
      self.run_task(token, task);
    }
    self.timers.set_now(now);
  }

  fn run_task(&mut self, token: TimerToken, task: Task) {
    match task {
      Task::FinishOpening(id) => self.finish_opening(&id, token),
      Task::FinishClosing(id) => self.finish_closing(&id, token),
      Task::BootStep(index) => self.show_boot_step(index),
      Task::BootComplete => self.complete_boot(),
      Task::Reboot => self.reboot_now(),
    }
  }

  /// Route one input to its handler.
  pub(crate) fn dispatch(&mut self, input: Input) {
    match input {
      Input::BodyClick => self.start_ambient(),
      Input::PointerMove { x, y } => self.move_cursor(Point::new(x, y)),
      Input::PointerDown => self.press_cursor(true),
      Input::PointerUp => self.press_cursor(false),

      Input::DockClick { window_id } => self.dock_click(&window_id),
      Input::DockPointerMove { x } => self.magnify_dock(x),
      Input::DockPointerLeave => self.reset_dock_magnification(),

      Input::WindowMouseDown { window_id } => self.focus(&window_id),
      Input::CloseButton { window_id } => self.close(&window_id),
      Input::WindowDrag { window_id, dx, dy } => self.drag(&window_id, dx, dy),
      Input::WindowDragEnd { window_id } => self.end_drag(&window_id),
      Input::WindowResize { window_id, w, h } => self.resize(&window_id, w, h),
      Input::ViewportResized { w, h } => self.set_viewport(w, h),

      Input::ThemeSwitcherClick => {
        self.cycle_theme();
        self.play(Sound::Click);
      }

      Input::TerminalKey { key, value } => self.terminal_key(&key, &value),
    }
  }

  /// Full state, as sent on connection.
  pub(crate) fn snapshot(&self) -> Snapshot {
    Snapshot {
      windows: self.windows(),
      active_window: self.active_window(),
      dock: self.dock(),
      theme: self.theme.current().to_owned(),
      banner: self.terminal.banner().to_owned(),
      terminal: self.terminal.lines().to_vec(),
      boot: self.boot.clone(),
      uptime_ms: u64::try_from(self.uptime().as_millis()).unwrap_or(u64::MAX),
      cursor: self.cursor.state(),
      clock: self.clock.clone(),
    }
  }
}
