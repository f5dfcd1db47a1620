/*!
Boot splash and reboot.

Boot steps and completion are ordinary timers, so a reboot (which swaps in
a fresh scheduler) drops anything still pending from the previous session.
*/

use std::time::Duration;

use super::timers::Task;
use super::Desktop;
use crate::types::{BootPhase, Event, WindowId};

impl Desktop {
  /// Queue every splash step and the boot completion, relative to now.
  pub(super) fn start_boot(&mut self) {
    for (index, step) in self.config.boot_steps.iter().enumerate() {
      self
        .timers
        .schedule(Duration::from_millis(step.at_ms), Task::BootStep(index));
    }
    self.timers.schedule(
      Duration::from_millis(self.config.boot_complete_ms),
      Task::BootComplete,
    );
  }

  pub(crate) const fn boot_phase(&self) -> &BootPhase {
    &self.boot
  }

  pub(super) fn show_boot_step(&mut self, index: usize) {
    let Some(text) = self.config.boot_steps.get(index).map(|s| s.text.clone()) else {
      return;
    };
    self.boot = BootPhase::Booting {
      text: Some(text.clone()),
    };
    self.emit(Event::BootStep { text });
  }

  /// Hide the splash and open the boot windows in order.
  pub(super) fn complete_boot(&mut self) {
    if self.boot == BootPhase::Complete {
      return;
    }
    self.boot = BootPhase::Complete;
    self.emit(Event::BootComplete);

    let names = self.config.boot_windows.clone();
    for name in &names {
      self.open(&WindowId::from_name(name));
    }
  }

  /// Queue a full reset after the configured delay.
  pub(crate) fn schedule_reboot(&mut self) {
    let delay = self.config.reboot_delay();
    self.timers.schedule(delay, Task::Reboot);
  }

  /// Throw away all state and boot again, as a page reload would.
  pub(super) fn reboot_now(&mut self) {
    log::info!("Rebooting desktop");
    self.emit(Event::Reload);

    let now = self.now();
    let fresh = Self::boot_at(self.config.clone(), self.events_tx.clone(), now);
    *self = fresh;

    self.emit(Event::SyncInit(Box::new(self.snapshot())));
  }
}
