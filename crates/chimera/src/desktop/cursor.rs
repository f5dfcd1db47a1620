/*!
Ambient layer: decorative cursor, ambience track and the menu-bar clock.
*/

use chrono::{DateTime, TimeZone};
use std::fmt::Display;

use super::Desktop;
use crate::types::{CursorState, Event, Point, SoundCue};

/// The cursor circle is drawn centered on the pointer.
const CIRCLE_OFFSET: f64 = 15.0;
const PRESSED_SCALE: f64 = 0.5;

#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct Cursor {
  position: Option<Point>,
  pressed: bool,
}

impl Cursor {
  pub(crate) fn state(&self) -> Option<CursorState> {
    let position = self.position?;
    Some(CursorState {
      dot: position,
      circle: position.offset(-CIRCLE_OFFSET, -CIRCLE_OFFSET),
      scale: if self.pressed { PRESSED_SCALE } else { 1.0 },
    })
  }

  /// Returns whether the pointer moved at least a pixel.
  fn move_to(&mut self, position: Point) -> bool {
    let moved = self
      .position
      .is_none_or(|last| position.moved_from(last, 1.0));
    if moved {
      self.position = Some(position);
    }
    moved
  }

  fn set_pressed(&mut self, pressed: bool) -> bool {
    let changed = self.pressed != pressed;
    self.pressed = pressed;
    changed
  }
}

/// Menu-bar clock text, `HH:MM:SS` in the time zone of `now`.
pub(crate) fn clock_text<Tz>(now: &DateTime<Tz>) -> String
where
  Tz: TimeZone,
  Tz::Offset: Display,
{
  now.format("%H:%M:%S").to_string()
}

impl Desktop {
  pub(crate) fn move_cursor(&mut self, position: Point) {
    if self.cursor.move_to(position) {
      self.emit_cursor();
    }
  }

  pub(crate) fn press_cursor(&mut self, pressed: bool) {
    if self.cursor.set_pressed(pressed) {
      self.emit_cursor();
    }
  }

  fn emit_cursor(&self) {
    if let Some(state) = self.cursor.state() {
      self.emit(Event::Cursor(state));
    }
  }

  /// Start the looping ambience on the first click. Later clicks do nothing.
  pub(crate) fn start_ambient(&mut self) {
    if std::mem::replace(&mut self.ambient_started, true) {
      return;
    }
    self.emit(Event::Sound(SoundCue::ambient()));
  }

  /// Update the clock text. Emits only when the displayed text changes.
  pub(crate) fn set_clock(&mut self, text: String) {
    if self.clock.as_ref() == Some(&text) {
      return;
    }
    self.clock = Some(text.clone());
    self.emit(Event::Clock { time: text });
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::*;
  use super::*;
  use crate::types::Sound;
  use chrono::{FixedOffset, Local, Utc};

  #[test]
  fn clock_uses_the_local_offset() {
    let tokyo = FixedOffset::east_opt(9 * 3600).unwrap();
    let now = tokyo.timestamp_opt(1_792_206_000, 0).unwrap();
    assert_eq!(clock_text(&now), "12:00:00");

    let utc = Utc.timestamp_opt(1_792_206_000 + 7 * 60 + 9, 0).unwrap();
    assert_eq!(clock_text(&utc), "03:07:09");
  }

  #[test]
  fn clock_follows_local_time() {
    let now = Local::now();
    assert_eq!(clock_text(&now), now.format("%H:%M:%S").to_string());
  }

  #[test]
  fn clock_emits_once_per_second() {
    let (mut desktop, mut rx) = booted();
    desktop.set_clock("10:00:00".into());
    desktop.set_clock("10:00:00".into());
    desktop.set_clock("10:00:01".into());

    let ticks = drain(&mut rx)
      .into_iter()
      .filter(|e| matches!(e, Event::Clock { .. }))
      .count();
    assert_eq!(ticks, 2);
  }

  #[test]
  fn circle_trails_dot() {
    let (mut desktop, mut rx) = booted();
    desktop.move_cursor(Point::new(100.0, 50.0));

    let events = drain(&mut rx);
    let Some(Event::Cursor(state)) = events.last() else {
      panic!("expected cursor event, got {events:?}");
    };
    assert_eq!(state.dot, Point::new(100.0, 50.0));
    assert_eq!(state.circle, Point::new(85.0, 35.0));
    assert_eq!(state.scale, 1.0);
  }

  #[test]
  fn press_shrinks_circle() {
    let (mut desktop, _rx) = booted();
    desktop.move_cursor(Point::new(10.0, 10.0));
    desktop.press_cursor(true);
    assert_eq!(desktop.cursor.state().unwrap().scale, 0.5);
    desktop.press_cursor(false);
    assert_eq!(desktop.cursor.state().unwrap().scale, 1.0);
  }

  #[test]
  fn sub_pixel_moves_are_dropped() {
    let (mut desktop, mut rx) = booted();
    desktop.move_cursor(Point::new(10.0, 10.0));
    desktop.move_cursor(Point::new(10.4, 10.2));
    assert_eq!(drain(&mut rx).len(), 1);
  }

  #[test]
  fn ambient_starts_once() {
    let (mut desktop, mut rx) = booted();
    desktop.start_ambient();
    desktop.start_ambient();

    let cues: Vec<_> = drain(&mut rx)
      .into_iter()
      .filter_map(|e| match e {
        Event::Sound(cue) => Some(cue),
        _ => None,
      })
      .collect();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].sound, Sound::Ambient);
    assert!(cues[0].looping);
  }
}
