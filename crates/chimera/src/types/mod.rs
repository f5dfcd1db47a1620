/*! Core types for Chimera.

Regenerate TypeScript types: `cargo test -p chimera export_bindings`
*/

#![allow(missing_docs)]

mod error;
mod event;
mod geometry;
mod ids;
mod input;
mod sound;
mod terminal;
mod window;

pub use error::{ChimeraError, ChimeraResult};
pub use event::{BootPhase, CursorState, DockEntry, DockItemScale, Event, Snapshot};
pub use geometry::{Bounds, Point};
pub use ids::WindowId;
pub use input::Input;
pub use sound::{Sound, SoundCue};
pub use terminal::{LineKind, TerminalLine};
pub use window::{Window, WindowState};
