/*!
Core Chimera instance - owns desktop state and event broadcasting.

# Module Structure

- `mod.rs` - Chimera struct, construction, events, read/write access
- `api.rs` - public operations (window lifecycle, terminal, theme, queries)

# Example

```
use chimera::{Chimera, Input, WindowId};
use std::time::Duration;

let chimera = Chimera::builder().manual_clock().build()?;
let mut events = chimera.subscribe();

chimera.advance(Duration::from_secs(8));
chimera.submit("open projects");
chimera.dispatch(Input::DockClick { window_id: WindowId::from_name("about") });

assert_eq!(chimera.active_window(), Some(WindowId::from_name("about")));
assert!(events.try_recv().is_ok());
# Ok::<(), chimera::ChimeraError>(())
```
*/

mod api;

use crate::config::Config;
use crate::desktop::Desktop;
use crate::ticker::{self, TickerHandle};
use crate::types::{ChimeraResult, Event};
use async_broadcast::InactiveReceiver;
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;

/// Main Chimera instance - owns state, event broadcasting, and the ticker.
///
/// The ticker starts automatically when created and stops when the last clone is dropped.
/// Clone is cheap (Arc bumps) - share freely across threads.
pub struct Chimera {
  pub(crate) state: Arc<RwLock<Desktop>>,
  events_keepalive: InactiveReceiver<Event>,
  ticker: Arc<Mutex<Option<TickerHandle>>>,
}

impl Clone for Chimera {
  fn clone(&self) -> Self {
    Self {
      state: Arc::clone(&self.state),
      events_keepalive: self.events_keepalive.clone(),
      ticker: Arc::clone(&self.ticker),
    }
  }
}

impl std::fmt::Debug for Chimera {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Chimera").finish_non_exhaustive()
  }
}

/// Builder for configuring a Chimera instance.
///
/// # Example
///
/// ```
/// use chimera::{Chimera, Config};
///
/// let chimera = Chimera::builder()
///     .config(Config { close_delay_ms: 500, ..Config::default() })
///     .manual_clock()
///     .build()?;
/// # Ok::<(), chimera::ChimeraError>(())
/// ```
#[derive(Debug, Clone)]
#[must_use = "Builder does nothing until .build() is called"]
pub struct ChimeraBuilder {
  config: Config,
  manual_clock: bool,
}

impl Default for ChimeraBuilder {
  fn default() -> Self {
    Self {
      config: Config::default(),
      manual_clock: false,
    }
  }
}

impl ChimeraBuilder {
  /// Replace the whole configuration.
  pub fn config(mut self, config: Config) -> Self {
    self.config = config;
    self
  }

  /// Don't start the ticker thread. Time only moves through [`Chimera::advance`].
  ///
  /// Useful for tests and for hosts that drive their own frame loop.
  pub const fn manual_clock(mut self) -> Self {
    self.manual_clock = true;
    self
  }

  /// Build the Chimera instance. Boot starts immediately.
  ///
  /// Returns an error if the configuration is invalid.
  #[must_use = "Chimera instance must be stored to keep the ticker running"]
  pub fn build(self) -> ChimeraResult<Chimera> {
    Chimera::create(self.config, self.manual_clock)
  }
}

impl Chimera {
  /// Create a new Chimera instance with default options and a running ticker.
  ///
  /// For custom configuration, use [`Chimera::builder()`].
  #[must_use = "Chimera instance must be stored to keep the ticker running"]
  pub fn new() -> ChimeraResult<Self> {
    Self::builder().build()
  }

  /// Create a builder for configuring a new Chimera instance.
  pub fn builder() -> ChimeraBuilder {
    ChimeraBuilder::default()
  }

  fn create(config: Config, manual_clock: bool) -> ChimeraResult<Self> {
    config.validate()?;

    let (mut tx, rx) = async_broadcast::broadcast(config.event_channel_capacity);
    tx.set_overflow(true); // Drop oldest messages when full

    let tick_interval = config.tick_interval();
    let chimera = Chimera {
      state: Arc::new(RwLock::new(Desktop::new(config, tx))),
      events_keepalive: rx.deactivate(),
      ticker: Arc::new(Mutex::new(None)),
    };

    if !manual_clock {
      let handle = ticker::start_ticker(Arc::downgrade(&chimera.state), tick_interval);
      *chimera.ticker.lock() = Some(handle);
    }

    Ok(chimera)
  }

  /// Subscribe to events from this instance.
  pub fn subscribe(&self) -> async_broadcast::Receiver<Event> {
    self.events_keepalive.activate_cloned()
  }

  /// Read state.
  #[inline]
  pub(crate) fn read<R>(&self, f: impl FnOnce(&Desktop) -> R) -> R {
    f(&self.state.read())
  }

  /// Write state.
  #[inline]
  pub(crate) fn write<R>(&self, f: impl FnOnce(&mut Desktop) -> R) -> R {
    f(&mut self.state.write())
  }
}
