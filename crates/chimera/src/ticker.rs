/*!
Internal ticker implementation.

Advances the desktop's virtual clock from wall time and keeps the menu-bar
clock on local time. Consumers don't interact with this directly - the
ticker is owned by `Chimera`.
*/

use crate::desktop::{clock_text, Desktop};
use chrono::Local;
use parking_lot::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

/// Handle to control ticker lifetime. Stops on drop.
pub(crate) struct TickerHandle {
  stop_signal: Arc<AtomicBool>,
  thread: Option<JoinHandle<()>>,
}

impl std::fmt::Debug for TickerHandle {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("TickerHandle").finish_non_exhaustive()
  }
}

impl Drop for TickerHandle {
  fn drop(&mut self) {
    self.stop_signal.store(true, Ordering::SeqCst);
    if let Some(t) = self.thread.take() {
      drop(t.join());
    }
  }
}

/// Start ticking. The thread holds only a weak reference, so it exits once
/// every `Chimera` clone is gone even if the handle is leaked.
pub(crate) fn start_ticker(state: Weak<RwLock<Desktop>>, interval: Duration) -> TickerHandle {
  let stop_signal = Arc::new(AtomicBool::new(false));
  let stop = Arc::clone(&stop_signal);

  let thread = thread::Builder::new()
    .name("chimera-ticker".into())
    .spawn(move || {
      let started = Instant::now();
      while !stop.load(Ordering::SeqCst) {
        thread::sleep(interval);

        let Some(state) = state.upgrade() else {
          break;
        };
        let mut desktop = state.write();
        desktop.advance_to(started.elapsed());
        desktop.set_clock(clock_text(&Local::now()));
      }
      log::debug!("Ticker stopped");
    });

  let thread = match thread {
    Ok(t) => Some(t),
    Err(e) => {
      log::error!("Failed to spawn ticker thread: {e}");
      None
    }
  };

  TickerHandle {
    stop_signal,
    thread,
  }
}
