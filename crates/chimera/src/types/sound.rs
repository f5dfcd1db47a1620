/*! Sound cues. Playback itself happens in the renderer. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Short clips plus the looping ambience track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum Sound {
  Click,
  Type,
  Error,
  Ambient,
}

/// Volume the ambience track plays at.
pub(crate) const AMBIENT_VOLUME: f32 = 0.05;

/// Request to play a sound. Fire-and-forget: nothing reports back.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SoundCue {
  pub sound: Sound,
  /// Restart from the beginning and loop forever.
  pub looping: bool,
  /// Volume override (0.0-1.0). None keeps the clip's own volume.
  pub volume: Option<f32>,
}

impl SoundCue {
  /// One-shot cue, rewound before playing.
  pub const fn once(sound: Sound) -> Self {
    Self {
      sound,
      looping: false,
      volume: None,
    }
  }

  pub const fn ambient() -> Self {
    Self {
      sound: Sound::Ambient,
      looping: true,
      volume: Some(AMBIENT_VOLUME),
    }
  }
}
