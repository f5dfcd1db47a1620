/*!
Theme selection and the terminal banner art that goes with each theme.
*/

use super::Desktop;
use crate::types::Event;

/// The fixed, ordered theme list. The switcher button walks it in order.
pub const THEMES: [&str; 7] = [
  "cyberpunk",
  "matrix",
  "vaporwave",
  "pipboy",
  "arcade",
  "solaris",
  "blood-dragon",
];

/// Current theme selector. Always a valid index into [`THEMES`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct ThemeManager {
  index: usize,
}

impl ThemeManager {
  #[cfg(test)]
  pub(crate) const fn index(self) -> usize {
    self.index
  }

  pub(crate) fn current(self) -> &'static str {
    THEMES.get(self.index).copied().unwrap_or("cyberpunk")
  }

  /// Advance to the next theme, wrapping around.
  pub(crate) fn cycle(&mut self) -> &'static str {
    self.index = (self.index + 1) % THEMES.len();
    self.current()
  }

  /// Select `name` if it is a known theme. Unknown names leave the selector untouched.
  pub(crate) fn set(&mut self, name: &str) -> bool {
    match THEMES.iter().position(|t| *t == name) {
      Some(index) => {
        self.index = index;
        true
      }
      None => false,
    }
  }
}

/// Banner art for a theme. Themes without their own art use the default banner.
pub(crate) fn banner_for(theme: &str) -> &'static str {
  match theme {
    "cyberpunk" => CYBERPUNK_BANNER,
    "matrix" => MATRIX_BANNER,
    "pipboy" => PIPBOY_BANNER,
    _ => DEFAULT_BANNER,
  }
}

const CYBERPUNK_BANNER: &str = concat!(
  "  _______   __   __  _______  __    _  ___   __   __  _______ \n",
  " |       | |  | |  ||   _   ||  |  | ||   | |  | |  ||       |\n",
  " |  _    | |  |_|  ||  |_|  ||   |_| ||   | |  |_|  ||    ___|\n",
  " | | |   | |       ||       ||       ||   | |       ||   |___ \n",
  " | |_|   | |       ||       ||  _    ||   | |       ||    ___|\n",
  " |       |  |     | |   _   || | |   ||   |  |     | |   |___ \n",
  " |_______|   |___|  |__| |__||_|  |__||___|   |___|  |_______|",
);

const MATRIX_BANNER: &str = concat!(
  " __ __   ___   __ __  _      __      __    \n",
  "|  |  |.'   \\ |  |  || |    |  |    |  |   \n",
  "|  |  ||     ||  |  || |    |  |    |  |   \n",
  "|  _  ||  O  ||  |  || |  _ |  |___ |  |___ \n",
  "|  |  ||     ||  |  || |.' ||  |  ||  |  |\n",
  "|  |  ||___/ |  :  ||  /  ||  |  ||  |  |\n",
  "|__|__|      '\\___.' |__\\__||__|__||__|__|",
);

const PIPBOY_BANNER: &str = concat!(
  " __ __  ___      ___ ___  __  _ \n",
  "|  |  ||   |    |   |   ||  |/ ]\n",
  "|  |  || _ |    | _   _ | |  ' / \n",
  "|  _  ||  _||_  |  _|_  | |    \\ \n",
  "|  |  ||  _||_ |  _|_  | |     \\\n",
  "|  |  ||   ||_ |  | |  | |  .  |\n",
  "|__|__||___|   |__| |__| |__|_|",
);

const DEFAULT_BANNER: &str = concat!(
  " __ __  _     _    _      ___   __  \n",
  "|  |  || |   | |  | |    |   | /  ] \n",
  "|  |  || |   | |  | |    | _ |/  /  \n",
  "|  _  || |__ | |  | |    |  _ |  /   \n",
  "|  |  ||    || |  | |    |  _ | /    \n",
  "|  |  ||    || |  | |___ |  _ |/     \n",
  "|__|__||____||____|____||__| /      ",
);

impl Desktop {
  pub(crate) fn theme(&self) -> &'static str {
    self.theme.current()
  }

  /// Theme switcher: next theme in the list.
  pub(crate) fn cycle_theme(&mut self) {
    self.theme.cycle();
    self.apply_theme();
  }

  /// Switch to `name` if it is a known theme. Returns whether it was applied.
  pub(crate) fn set_theme(&mut self, name: &str) -> bool {
    let found = self.theme.set(name);
    if found {
      self.apply_theme();
    } else {
      log::debug!("Unknown theme {name:?}, keeping {}", self.theme.current());
    }
    found
  }

  fn apply_theme(&mut self) {
    self.emit(Event::ThemeChanged {
      theme: self.theme.current().to_owned(),
    });
    self.render_banner();
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn starts_on_first_theme() {
    assert_eq!(ThemeManager::default().current(), "cyberpunk");
  }

  #[test]
  fn cycle_wraps_around() {
    let mut themes = ThemeManager::default();
    themes.set("blood-dragon");
    assert_eq!(themes.cycle(), "cyberpunk");
  }

  #[test]
  fn set_unknown_keeps_selector() {
    let mut themes = ThemeManager::default();
    themes.set("matrix");
    assert!(!themes.set("doesnotexist"));
    assert_eq!(themes.current(), "matrix");
  }

  #[test]
  fn set_is_case_sensitive() {
    let mut themes = ThemeManager::default();
    assert!(!themes.set("Matrix"));
    assert_eq!(themes.index(), 0);
  }

  #[test]
  fn desktop_cycle_rerenders_banner() {
    let (mut desktop, mut rx) = crate::desktop::test_support::booted();
    desktop.cycle_theme();

    let events = crate::desktop::test_support::drain(&mut rx);
    assert!(matches!(&events[0], Event::ThemeChanged { theme } if theme == "matrix"));
    assert!(matches!(&events[1], Event::BannerRendered { art } if *art == MATRIX_BANNER));
  }

  #[test]
  fn desktop_unknown_theme_changes_nothing() {
    let (mut desktop, mut rx) = crate::desktop::test_support::booted();
    assert!(!desktop.set_theme("doesnotexist"));
    assert_eq!(desktop.theme(), "cyberpunk");
    assert!(crate::desktop::test_support::drain(&mut rx).is_empty());
  }

  #[test]
  fn banner_lines_keep_padding() {
    assert!(CYBERPUNK_BANNER.lines().next().unwrap().ends_with("_______ "));
    assert_eq!(DEFAULT_BANNER.lines().count(), 7);
    assert!(DEFAULT_BANNER.ends_with("|__| /      "));
  }

  #[test]
  fn banner_falls_back_to_default() {
    assert_eq!(banner_for("vaporwave"), DEFAULT_BANNER);
    assert_eq!(banner_for("not-a-theme"), DEFAULT_BANNER);
    assert_ne!(banner_for("matrix"), DEFAULT_BANNER);
  }
}
