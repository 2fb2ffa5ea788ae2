use std::fmt;
use std::str::FromStr;

use ratatui::style::Color;

use crate::error::ConfigError;

/// How important a toast is. Picks the accent color and the icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warn,
    Error,
}

impl Severity {
    pub const ALL: [Severity; 4] = [
        Severity::Info,
        Severity::Success,
        Severity::Warn,
        Severity::Error,
    ];

    /// Looks up the fixed color/icon pair for this severity.
    pub fn style(self) -> ToastStyle {
        match self {
            Severity::Info => ToastStyle {
                color: ColorRole::Info,
                icon: IconName::Information,
            },
            Severity::Success => ToastStyle {
                color: ColorRole::Success,
                icon: IconName::Checkmark,
            },
            Severity::Warn => ToastStyle {
                color: ColorRole::Warn,
                icon: IconName::Warning,
            },
            Severity::Error => ToastStyle {
                color: ColorRole::Error,
                icon: IconName::Alert,
            },
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Info => write!(f, "info"),
            Severity::Success => write!(f, "success"),
            Severity::Warn => write!(f, "warn"),
            Severity::Error => write!(f, "error"),
        }
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Severity::Info),
            "success" => Ok(Severity::Success),
            "warn" | "warning" => Ok(Severity::Warn),
            "error" => Ok(Severity::Error),
            _ => Err(ConfigError::UnknownSeverity(s.to_string())),
        }
    }
}

/// Semantic accent colors. `Default` is what a controller shows before the
/// first toast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ColorRole {
    #[default]
    Default,
    Info,
    Success,
    Warn,
    Error,
}

impl ColorRole {
    pub fn color(self) -> Color {
        match self {
            ColorRole::Default | ColorRole::Info => Color::Rgb(0x34, 0x98, 0xdb),
            ColorRole::Success => Color::Rgb(0x07, 0xbc, 0x0c),
            ColorRole::Warn => Color::Rgb(0xf1, 0xc4, 0x0f),
            ColorRole::Error => Color::Rgb(0xe7, 0x4c, 0x3c),
        }
    }
}

/// Named glyphs understood by the icon renderer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IconName {
    Information,
    #[default]
    Checkmark,
    Warning,
    Alert,
    Close,
}

impl IconName {
    pub fn name(self) -> &'static str {
        match self {
            IconName::Information => "information",
            IconName::Checkmark => "checkmark",
            IconName::Warning => "warning",
            IconName::Alert => "alert",
            IconName::Close => "close",
        }
    }
}

impl fmt::Display for IconName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accent color and icon derived from a [`Severity`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ToastStyle {
    pub color: ColorRole,
    pub icon: IconName,
}
