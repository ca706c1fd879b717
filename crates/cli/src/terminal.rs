//! Terminal rendering of status lines.
//!
//! Colours come from an explicit [`Theme`] handed to [`TerminalStatus`] when it
//! is built; switching theme means building the sink with another theme.

use std::io::Write;

use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use log::{debug, warn};
use microgen_core::settings::Settings;
use microgen_core::status::{Status, StatusKind, StatusSink};

pub const SUCCESS_COLOR: Color = Color::Rgb { r: 0, g: 160, b: 0 };
pub const FAILURE_COLOR: Color = Color::Rgb { r: 160, g: 0, b: 0 };

const DARK: Color = Color::Rgb { r: 30, g: 30, b: 30 };
const LIGHT: Color = Color::Rgb {
    r: 222,
    g: 222,
    b: 222,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub foreground: Color,
    pub background: Color,
}

impl Theme {
    #[must_use]
    pub fn dark() -> Self {
        Self {
            foreground: LIGHT,
            background: DARK,
        }
    }

    #[must_use]
    pub fn light() -> Self {
        Self {
            foreground: DARK,
            background: LIGHT,
        }
    }

    #[must_use]
    pub fn from_settings(settings: &Settings) -> Self {
        if settings.dark_theme {
            Self::dark()
        } else {
            Self::light()
        }
    }

    #[must_use]
    pub fn color_for(&self, kind: StatusKind) -> Color {
        match kind {
            StatusKind::Success => SUCCESS_COLOR,
            StatusKind::Failure => FAILURE_COLOR,
            StatusKind::Neutral | StatusKind::Progress => self.foreground,
        }
    }
}

/// [`StatusSink`] printing one coloured line per status.
pub struct TerminalStatus<W: Write> {
    output: W,
    theme: Theme,
    controls_enabled: bool,
}

impl<W: Write> TerminalStatus<W> {
    pub fn new(output: W, theme: Theme) -> Self {
        Self {
            output,
            theme,
            controls_enabled: true,
        }
    }

    #[must_use]
    pub fn controls_enabled(&self) -> bool {
        self.controls_enabled
    }

    fn write_status(&mut self, status: &Status) -> std::io::Result<()> {
        queue!(
            self.output,
            SetForegroundColor(self.theme.color_for(status.kind)),
            SetBackgroundColor(self.theme.background),
            Print(&status.text),
            ResetColor,
            Print("\n")
        )?;
        self.output.flush()
    }
}

impl<W: Write> StatusSink for TerminalStatus<W> {
    fn show_status(&mut self, status: &Status) {
        if let Err(e) = self.write_status(status) {
            warn!("Could not print status `{status}`: {e}");
        }
    }

    fn set_controls_enabled(&mut self, enabled: bool) {
        debug!("Controls {}", if enabled { "enabled" } else { "disabled" });
        self.controls_enabled = enabled;
    }
}
