/*!
Chimera - state core for a faux desktop rendered in a browser tab

```
use chimera::{Chimera, Input, WindowId};
use std::time::Duration;

// Create instance (pass `.manual_clock()` to drive time yourself)
let chimera = Chimera::builder().manual_clock().build()?;
let mut events = chimera.subscribe();

// Boot splash runs, then the default windows open
chimera.advance(Duration::from_secs(8));

// Inputs from the page go through one dispatch table
chimera.dispatch(Input::TerminalKey { key: "Enter".into(), value: "open projects".into() });
chimera.dispatch(Input::ThemeSwitcherClick);

// Query state
let projects = chimera.window(&WindowId::from_name("projects"))?;
assert!(projects.active);
assert_eq!(chimera.theme(), "matrix");

// Every change is broadcast for the renderer
while let Ok(event) = events.try_recv() {
    let _json = serde_json::to_string(&event);
}
# Ok::<(), chimera::ChimeraError>(())
```
*/

mod config;
mod core;
mod desktop;
mod ticker;

mod types;
pub use types::*;

pub use crate::config::{BootStep, Config};
pub use crate::core::{Chimera, ChimeraBuilder};
pub use crate::desktop::{Command, THEMES};
