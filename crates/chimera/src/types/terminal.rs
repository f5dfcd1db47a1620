/*! Terminal log lines. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Styling category of a terminal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum LineKind {
  #[default]
  Output,
  /// Echo of a submitted command.
  Command,
  Error,
  /// Easter-egg styling.
  Special,
}

/// One immutable line of terminal output. `text` may contain newlines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TerminalLine {
  pub text: String,
  pub kind: LineKind,
}

impl TerminalLine {
  pub fn new(text: impl Into<String>, kind: LineKind) -> Self {
    Self {
      text: text.into(),
      kind,
    }
  }

  pub fn output(text: impl Into<String>) -> Self {
    Self::new(text, LineKind::Output)
  }

  pub fn error(text: impl Into<String>) -> Self {
    Self::new(text, LineKind::Error)
  }
}
