/*!
Virtual clock and cancellable timers.

Every delayed transition (window open/close animations, boot steps, reboot)
is a `Task` queued at a due time. Firing order is by due time, then by
scheduling order. Cancelling a token removes its task before it can fire.
*/

use crate::types::WindowId;
use std::collections::BTreeMap;
use std::time::Duration;

/// Handle to a scheduled task. Tokens are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub(crate) struct TimerToken(u64);

/// Work to run when a timer fires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Task {
  FinishOpening(WindowId),
  FinishClosing(WindowId),
  BootStep(usize),
  BootComplete,
  Reboot,
}

#[derive(Debug, Default)]
pub(crate) struct Scheduler {
  now: Duration,
  next_token: u64,
  pending: BTreeMap<(Duration, TimerToken), Task>,
}

impl Scheduler {
  /// Scheduler whose clock starts at `now`.
  pub(crate) fn starting_at(now: Duration) -> Self {
    Self {
      now,
      ..Self::default()
    }
  }

  pub(crate) const fn now(&self) -> Duration {
    self.now
  }

  /// Queue `task` to fire `delay` after the current time.
  pub(crate) fn schedule(&mut self, delay: Duration, task: Task) -> TimerToken {
    let token = TimerToken(self.next_token);
    self.next_token += 1;
    self.pending.insert((self.now + delay, token), task);
    token
  }

  /// Drop a pending task. Returns false if it already fired or was cancelled.
  pub(crate) fn cancel(&mut self, token: TimerToken) -> bool {
    let key = self.pending.keys().find(|(_, t)| *t == token).copied();
    key.is_some_and(|key| self.pending.remove(&key).is_some())
  }

  /// Take the earliest task due at or before `until`, moving the clock to its due time.
  pub(crate) fn pop_due(&mut self, until: Duration) -> Option<(TimerToken, Task)> {
    let (&(due, token), _) = self.pending.first_key_value()?;
    if due > until {
      return None;
    }
    let task = self.pending.remove(&(due, token))?;
    self.now = self.now.max(due);
    Some((token, task))
  }

  /// Move the clock forward. The clock never goes backwards.
  pub(crate) fn set_now(&mut self, now: Duration) {
    self.now = self.now.max(now);
  }

  #[cfg(test)]
  pub(crate) fn len(&self) -> usize {
    self.pending.len()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
  }

  #[test]
  fn fires_in_due_order() {
    let mut s = Scheduler::default();
    s.schedule(ms(300), Task::BootComplete);
    s.schedule(ms(10), Task::Reboot);

    assert_eq!(s.pop_due(ms(1000)).map(|(_, t)| t), Some(Task::Reboot));
    assert_eq!(s.now(), ms(10));
    assert_eq!(s.pop_due(ms(1000)).map(|(_, t)| t), Some(Task::BootComplete));
    assert_eq!(s.pop_due(ms(1000)), None);
  }

  #[test]
  fn equal_due_times_fire_in_schedule_order() {
    let mut s = Scheduler::default();
    s.schedule(ms(5), Task::BootStep(0));
    s.schedule(ms(5), Task::BootStep(1));

    assert_eq!(s.pop_due(ms(5)).map(|(_, t)| t), Some(Task::BootStep(0)));
    assert_eq!(s.pop_due(ms(5)).map(|(_, t)| t), Some(Task::BootStep(1)));
  }

  #[test]
  fn nothing_fires_early() {
    let mut s = Scheduler::default();
    s.schedule(ms(100), Task::BootComplete);
    assert_eq!(s.pop_due(ms(99)), None);
    assert_eq!(s.len(), 1);
  }

  #[test]
  fn cancelled_tasks_never_fire() {
    let mut s = Scheduler::default();
    let token = s.schedule(ms(10), Task::FinishOpening(WindowId::from_name("about")));

    assert!(s.cancel(token));
    assert!(!s.cancel(token));
    assert_eq!(s.pop_due(ms(100)), None);
  }

  #[test]
  fn delays_are_relative_to_current_time() {
    let mut s = Scheduler::starting_at(ms(1000));
    s.schedule(ms(10), Task::Reboot);
    assert_eq!(s.pop_due(ms(1009)), None);
    assert!(s.pop_due(ms(1010)).is_some());
  }

  #[test]
  fn clock_is_monotonic() {
    let mut s = Scheduler::starting_at(ms(50));
    s.set_now(ms(20));
    assert_eq!(s.now(), ms(50));
  }
}
