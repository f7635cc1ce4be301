#![cfg(feature = "cli")]

use crossterm::style::{Attribute, Color, ResetColor, SetAttribute, SetForegroundColor};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Success,
    Info,
    Warning,
    Watch,
    Debug,
    Action,
}

/// Terminal logger. Colors are only emitted when stdout is a terminal.
#[derive(Debug, Clone)]
pub struct Logger {
    colored: bool,
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger {
    pub fn new() -> Self {
        Self {
            colored: atty::is(atty::Stream::Stdout),
        }
    }

    /// A logger that never emits escape sequences.
    pub fn plain() -> Self {
        Self { colored: false }
    }

    pub fn log(&self, level: LogLevel, message: impl AsRef<str>) {
        let line = self.render_line(level, message.as_ref());
        match level {
            LogLevel::Warning => eprintln!("{}", line),
            _ => println!("{}", line),
        }
    }

    pub fn success(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Success, message);
    }

    pub fn info(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Info, message);
    }

    pub fn warn(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Warning, message);
    }

    pub fn watch(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Watch, message);
    }

    pub fn debug(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Debug, message);
    }

    pub fn action(&self, message: impl AsRef<str>) {
        self.log(LogLevel::Action, message);
    }

    pub(crate) fn render_line(&self, level: LogLevel, message: &str) -> String {
        if !self.colored {
            return format!("[{}] {}", level.as_label(), message);
        }

        let (emoji, color) = level.visuals();
        format!(
            "{} {} {} {}",
            emoji,
            self.render_signature(),
            self.render_status(level, color),
            message
        )
    }

    fn render_signature(&self) -> String {
        format!(
            "{}[{}{}olca{}{}]{}",
            SetForegroundColor(Color::Grey),
            SetForegroundColor(Color::Rgb {
                r: 36,
                g: 199,
                b: 181,
            }),
            SetAttribute(Attribute::Bold),
            SetAttribute(Attribute::Reset),
            SetForegroundColor(Color::Grey),
            ResetColor
        )
    }

    fn render_status(&self, level: LogLevel, color: Color) -> String {
        format!(
            "{}{}[{}]{}{}",
            SetForegroundColor(color),
            SetAttribute(Attribute::Bold),
            level.as_label(),
            SetAttribute(Attribute::Reset),
            ResetColor
        )
    }
}

impl LogLevel {
    fn as_label(self) -> &'static str {
        match self {
            LogLevel::Success => "SUCCESS",
            LogLevel::Info => "INFO",
            LogLevel::Warning => "WARN",
            LogLevel::Watch => "WATCH",
            LogLevel::Debug => "DEBUG",
            LogLevel::Action => "ACTION",
        }
    }

    fn visuals(self) -> (&'static str, Color) {
        match self {
            LogLevel::Success => (
                "✅",
                Color::Rgb {
                    r: 76,
                    g: 175,
                    b: 80,
                },
            ),
            LogLevel::Info => (
                "ℹ️ ",
                Color::Rgb {
                    r: 33,
                    g: 150,
                    b: 243,
                },
            ),
            LogLevel::Warning => (
                "⚠️",
                Color::Rgb {
                    r: 255,
                    g: 152,
                    b: 0,
                },
            ),
            LogLevel::Watch => (
                "⏱️",
                Color::Rgb {
                    r: 171,
                    g: 71,
                    b: 188,
                },
            ),
            LogLevel::Debug => (
                "🛠️",
                Color::Rgb {
                    r: 121,
                    g: 134,
                    b: 203,
                },
            ),
            LogLevel::Action => (
                "📦",
                Color::Rgb {
                    r: 0,
                    g: 188,
                    b: 212,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_line_has_label() {
        let logger = Logger::plain();
        assert_eq!(
            logger.render_line(LogLevel::Success, "Synced 2 files"),
            "[SUCCESS] Synced 2 files"
        );
        assert_eq!(logger.render_line(LogLevel::Warning, "x"), "[WARN] x");
    }

    #[test]
    fn test_colored_line_keeps_message() {
        let logger = Logger { colored: true };
        let line = logger.render_line(LogLevel::Warning, "dist is empty");
        assert!(line.contains("[WARN]"));
        assert!(line.contains("olca"));
        assert!(line.ends_with("dist is empty"));
    }
}
