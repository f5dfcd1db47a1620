/*!
Terminal - append-only log plus the command dispatcher.

Every submitted line is echoed after the prompt, then lowercased, split on
whitespace and dispatched. Mistakes are never errors: they print a styled
line and play the error cue.
*/

use super::theme::{banner_for, THEMES};
use super::Desktop;
use crate::types::{Event, LineKind, Sound, TerminalLine, WindowId};

pub(crate) const PROMPT: &str = "user@chimera:~$";

const WELCOME: &str = "Chimera OS [vFINAL]. Type \"help\" for a list of commands.";
const HELP: &str = "Commands: help, open, close, theme, themes, neofetch, clear, reboot";
const MISSING_ARGUMENT: &str = "Error: Missing argument.";
const MISSING_THEME: &str = "Error: Missing theme name.";
const NEOFETCH_HOST: &str = "Szilard2011@CHIMERA";

/// A parsed terminal command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
  /// `help`
  Help,
  /// `open <name>`; the argument is missing if `None`.
  Open(Option<String>),
  /// `close <name>`
  Close(Option<String>),
  /// `themes`
  Themes,
  /// `theme <name>`
  Theme(Option<String>),
  /// `neofetch`
  Neofetch,
  /// `reboot`
  Reboot,
  /// `clear`
  Clear,
  /// `fnaf`
  Fnaf,
  /// Anything else, by name.
  Unknown(String),
}

impl Command {
  /// Parse a submitted line. Returns `None` for blank input.
  ///
  /// The whole line is lowercased, so arguments are case-insensitive too.
  /// Arguments past the first are ignored.
  ///
  /// ```
  /// use chimera::Command;
  ///
  /// assert_eq!(Command::parse("OPEN Terminal"), Some(Command::Open(Some("terminal".into()))));
  /// assert_eq!(Command::parse("close"), Some(Command::Close(None)));
  /// assert_eq!(Command::parse("   "), None);
  /// ```
  pub fn parse(line: &str) -> Option<Self> {
    let line = line.to_lowercase();
    let mut words = line.split_whitespace();
    let name = words.next()?;
    let arg = words.next().map(str::to_owned);

    Some(match name {
      "help" => Self::Help,
      "open" => Self::Open(arg),
      "close" => Self::Close(arg),
      "themes" => Self::Themes,
      "theme" => Self::Theme(arg),
      "neofetch" => Self::Neofetch,
      "reboot" => Self::Reboot,
      "clear" => Self::Clear,
      "fnaf" => Self::Fnaf,
      other => Self::Unknown(other.to_owned()),
    })
  }
}

/// Terminal log with the theme banner pinned on top.
#[derive(Debug, Clone)]
pub(crate) struct Terminal {
  banner: &'static str,
  lines: Vec<TerminalLine>,
}

impl Terminal {
  pub(crate) const fn new(banner: &'static str) -> Self {
    Self {
      banner,
      lines: Vec::new(),
    }
  }

  pub(crate) const fn banner(&self) -> &'static str {
    self.banner
  }

  pub(crate) fn lines(&self) -> &[TerminalLine] {
    &self.lines
  }
}

impl Desktop {
  /// Startup output: banner, then the welcome line.
  pub(super) fn init_terminal(&mut self) {
    self.render_banner();
    self.print(TerminalLine::output(WELCOME));
  }

  /// Replace the banner with the art for the current theme.
  pub(crate) fn render_banner(&mut self) {
    let art = banner_for(self.theme.current());
    self.terminal.banner = art;
    self.emit(Event::BannerRendered {
      art: art.to_owned(),
    });
  }

  fn print(&mut self, line: TerminalLine) {
    self.terminal.lines.push(line.clone());
    self.emit(Event::TerminalLine { line });
  }

  fn print_error(&mut self, text: &str) {
    self.print(TerminalLine::error(text));
    self.play(Sound::Error);
  }

  /// Key press in the prompt. Every key clicks; Enter submits `value`.
  pub(crate) fn terminal_key(&mut self, key: &str, value: &str) {
    self.play(Sound::Type);
    if key == "Enter" {
      self.submit(value);
    }
  }

  /// Echo and run one line of input. Blank lines are dropped silently.
  pub(crate) fn submit(&mut self, line: &str) {
    let line = line.trim();
    let Some(command) = Command::parse(line) else {
      return;
    };
    self.print(TerminalLine::new(format!("{PROMPT} {line}"), LineKind::Command));
    self.run_command(command);
  }

  pub(crate) fn run_command(&mut self, command: Command) {
    match command {
      Command::Help => self.print(TerminalLine::output(HELP)),

      Command::Open(Some(name)) => self.open(&WindowId::from_name(&name)),
      Command::Close(Some(name)) => self.close(&WindowId::from_name(&name)),
      Command::Open(None) | Command::Close(None) => self.print_error(MISSING_ARGUMENT),

      Command::Themes => {
        let text = format!("Available: {}", THEMES.join(", "));
        self.print(TerminalLine::output(text));
      }

      // Unknown names are reported as set even though nothing changes.
      Command::Theme(Some(name)) => {
        self.set_theme(&name);
        self.print(TerminalLine::output(format!("Theme set to: {name}")));
      }
      Command::Theme(None) => self.print_error(MISSING_THEME),

      Command::Neofetch => {
        let text = self.neofetch();
        self.print(TerminalLine::output(text));
      }

      Command::Reboot => {
        self.print(TerminalLine::output("System rebooting..."));
        self.schedule_reboot();
      }

      Command::Clear => {
        self.terminal.lines.clear();
        self.emit(Event::TerminalCleared);
        self.render_banner();
      }

      Command::Fnaf => self.print(TerminalLine::new(
        "WAS THAT THE BITE OF '87?!",
        LineKind::Special,
      )),

      Command::Unknown(name) => self.print_error(&format!("Command not found: {name}")),
    }
  }

  fn neofetch(&self) -> String {
    format!(
      "{NEOFETCH_HOST}\nOS: Chimera OS vFINAL\nKernel: JS DOM vFINAL\nUptime: {}s\nTheme: {}",
      self.uptime().as_secs(),
      self.theme.current(),
    )
  }
}

#[cfg(test)]
mod tests {
  use super::super::test_support::*;
  use super::*;
  use crate::types::WindowState;

  fn lines(desktop: &Desktop) -> Vec<TerminalLine> {
    desktop.terminal.lines().to_vec()
  }

  fn sounds(events: &[Event]) -> Vec<Sound> {
    events
      .iter()
      .filter_map(|e| match e {
        Event::Sound(cue) => Some(cue.sound),
        _ => None,
      })
      .collect()
  }

  #[test]
  fn parse_splits_on_any_whitespace() {
    assert_eq!(
      Command::parse("  theme \t Matrix  extra"),
      Some(Command::Theme(Some("matrix".into())))
    );
  }

  #[test]
  fn parse_unknown_keeps_lowercased_name() {
    assert_eq!(Command::parse("LS -la"), Some(Command::Unknown("ls".into())));
  }

  #[test]
  fn echo_precedes_output() {
    let (mut desktop, _rx) = booted();
    desktop.submit("help");

    let lines = lines(&desktop);
    let n = lines.len();
    assert_eq!(lines[n - 2], TerminalLine::new("user@chimera:~$ help", LineKind::Command));
    assert_eq!(lines[n - 1], TerminalLine::output(HELP));
  }

  #[test]
  fn echo_keeps_original_case() {
    let (mut desktop, _rx) = booted();
    desktop.submit("  Fnaf ");
    let lines = lines(&desktop);
    assert_eq!(lines[lines.len() - 2].text, "user@chimera:~$ Fnaf");
  }

  #[test]
  fn blank_input_prints_nothing() {
    let (mut desktop, _rx) = booted();
    let before = lines(&desktop).len();
    desktop.submit("   ");
    assert_eq!(lines(&desktop).len(), before);
  }

  #[test]
  fn open_terminal_from_fresh_state() {
    let (mut desktop, _rx) = desktop();
    desktop.submit("open terminal");

    let lines = lines(&desktop);
    assert_eq!(lines.last().unwrap().kind, LineKind::Command);
    assert!(lines.iter().all(|l| l.kind != LineKind::Error));
    assert_eq!(
      desktop.window_state(&WindowId::from_name("terminal")),
      Some(WindowState::Opening)
    );
  }

  #[test]
  fn open_unknown_window_is_silent() {
    let (mut desktop, _rx) = booted();
    desktop.submit("open browser");
    assert_eq!(lines(&desktop).last().unwrap().kind, LineKind::Command);
  }

  #[test]
  fn close_without_argument_errors() {
    let (mut desktop, mut rx) = booted();
    let before = desktop.windows();

    desktop.submit("close");

    assert_eq!(desktop.windows(), before);
    assert_eq!(lines(&desktop).last().unwrap(), &TerminalLine::error(MISSING_ARGUMENT));
    assert_eq!(sounds(&drain(&mut rx)), vec![Sound::Error]);
  }

  #[test]
  fn close_by_name() {
    let (mut desktop, _rx) = booted();
    desktop.submit("close about");
    assert_eq!(
      desktop.window_state(&WindowId::from_name("about")),
      Some(WindowState::Closing)
    );
  }

  #[test]
  fn theme_sets_known_theme() {
    let (mut desktop, _rx) = booted();
    desktop.submit("theme Pipboy");
    assert_eq!(desktop.theme(), "pipboy");
    assert_eq!(lines(&desktop).last().unwrap().text, "Theme set to: pipboy");
  }

  #[test]
  fn theme_unknown_keeps_prior_theme() {
    let (mut desktop, _rx) = booted();
    desktop.submit("theme vaporwave");
    let banner = desktop.terminal.banner();

    desktop.submit("theme doesnotexist");

    assert_eq!(desktop.theme(), "vaporwave");
    assert_eq!(desktop.terminal.banner(), banner);
    assert_eq!(lines(&desktop).last().unwrap().text, "Theme set to: doesnotexist");
  }

  #[test]
  fn theme_without_argument_errors() {
    let (mut desktop, _rx) = booted();
    desktop.submit("theme");
    assert_eq!(lines(&desktop).last().unwrap(), &TerminalLine::error(MISSING_THEME));
  }

  #[test]
  fn themes_lists_every_theme() {
    let (mut desktop, _rx) = booted();
    desktop.submit("themes");
    assert_eq!(
      lines(&desktop).last().unwrap().text,
      "Available: cyberpunk, matrix, vaporwave, pipboy, arcade, solaris, blood-dragon"
    );
  }

  #[test]
  fn neofetch_reports_uptime_and_theme() {
    let (mut desktop, _rx) = booted();
    desktop.submit("neofetch");
    let text = lines(&desktop).last().unwrap().text.clone();
    assert!(
      text.starts_with("Szilard2011@CHIMERA\nOS: Chimera OS vFINAL\nKernel: JS DOM vFINAL\n"),
      "{text}"
    );
    assert!(text.contains("Uptime: 10s"), "{text}");
    assert!(text.ends_with("Theme: cyberpunk"), "{text}");
  }

  #[test]
  fn clear_leaves_only_banner() {
    let (mut desktop, mut rx) = booted();
    desktop.submit("help");
    desktop.submit("fnaf");

    desktop.submit("clear");

    assert!(lines(&desktop).is_empty());
    assert_eq!(desktop.terminal.banner(), banner_for("cyberpunk"));
    let events = drain(&mut rx);
    let cleared = events.iter().position(|e| matches!(e, Event::TerminalCleared));
    let banner = events.iter().rposition(|e| matches!(e, Event::BannerRendered { .. }));
    assert!(cleared.is_some() && cleared < banner);
  }

  #[test]
  fn unknown_command_errors_with_sound() {
    let (mut desktop, mut rx) = booted();
    desktop.submit("sudo rm -rf /");

    assert_eq!(
      lines(&desktop).last().unwrap(),
      &TerminalLine::error("Command not found: sudo")
    );
    assert_eq!(sounds(&drain(&mut rx)), vec![Sound::Error]);
  }

  #[test]
  fn every_key_plays_type() {
    let (mut desktop, mut rx) = booted();
    desktop.terminal_key("h", "h");
    desktop.terminal_key("i", "hi");
    assert_eq!(sounds(&drain(&mut rx)), vec![Sound::Type, Sound::Type]);
    assert_eq!(lines(&desktop).len(), 1);
  }

  #[test]
  fn reboot_prints_then_resets_later() {
    let (mut desktop, _rx) = booted();
    desktop.submit("reboot");
    assert_eq!(lines(&desktop).last().unwrap().text, "System rebooting...");

    desktop.advance_to(desktop.now() + ms(1000));
    assert_eq!(lines(&desktop).len(), 1);
  }
}
