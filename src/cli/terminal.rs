//! Terminal capability detection and colouring

use owo_colors::{OwoColorize, colors::css};

/// Whether stdout accepts ANSI colours
pub fn supports_color() -> bool {
    supports_color::on(supports_color::Stream::Stdout).is_some()
}

/// Terminal width in columns, if stdout is a terminal
pub fn terminal_width() -> Option<u16> {
    terminal_size::terminal_size().map(|(width, _)| width.0)
}

/// Narrow terminals (< 60 columns) get single-column cards
pub fn is_narrow() -> bool {
    terminal_width().is_some_and(|width| width < 60)
}

fn paint(text: &str, style: impl FnOnce(&str) -> String) -> String {
    if supports_color() {
        style(text)
    } else {
        text.to_string()
    }
}

/// Extension trait for the directory's colour palette
pub trait Colorize {
    /// Green, for available and online masters
    fn success(&self) -> String;
    /// Orange, for busy masters and warnings
    fn warning(&self) -> String;
    /// Gold, for filled rating stars
    fn star(&self) -> String;
    /// Bold blue, for prices and active filters
    fn accent(&self) -> String;
    /// Dimmed, for secondary text
    fn dim(&self) -> String;
}

impl<T: AsRef<str> + ?Sized> Colorize for T {
    fn success(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Green>().to_string())
    }

    fn warning(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Orange>().to_string())
    }

    fn star(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::Gold>().to_string())
    }

    fn accent(&self) -> String {
        paint(self.as_ref(), |s| s.fg::<css::DodgerBlue>().bold().to_string())
    }

    fn dim(&self) -> String {
        paint(self.as_ref(), |s| s.dimmed().to_string())
    }
}
