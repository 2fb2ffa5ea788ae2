use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use std::time::Duration;

use ratatui::style::{Color, Modifier, Style};
use serde::{Deserialize, Deserializer};

use crate::animation::{AnimationKind, AnimationStyle};
use crate::error::ConfigError;

/// Smallest toast that still fits a border, one text row and the bar.
pub const MIN_WIDTH: u16 = 12;
pub const MIN_HEIGHT: u16 = 4;

/// Settings of a toast controller. Every key is optional in TOML.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToastConfig {
    /// Overrides the entry animation picked by `animation_style`.
    pub animation_in: Option<AnimationKind>,
    /// Overrides the exit animation picked by `animation_style`.
    pub animation_out: Option<AnimationKind>,
    pub animation_style: AnimationStyle,
    /// Milliseconds.
    pub animation_in_timing: u64,
    pub animation_out_timing: u64,
    pub backdrop_transition_in_timing: u64,
    pub backdrop_transition_out_timing: u64,
    #[serde(deserialize_with = "deserialize_color")]
    pub backdrop_color: Color,
    pub backdrop_opacity: f32,
    pub has_backdrop: bool,
    pub duration: ToastDuration,
    /// Where toasts go unless a call overrides it. Unset means bottom.
    pub position: Option<Position>,
    /// Rows between the toast and the top (or bottom) edge.
    pub position_value: u16,
    pub width: u16,
    pub height: u16,
    pub theme: Theme,
    pub style: Option<StyleOverride>,
}

impl Default for ToastConfig {
    fn default() -> Self {
        Self {
            animation_in: None,
            animation_out: None,
            animation_style: AnimationStyle::default(),
            animation_in_timing: 300,
            animation_out_timing: 300,
            backdrop_transition_in_timing: 300,
            backdrop_transition_out_timing: 300,
            backdrop_color: Color::Black,
            backdrop_opacity: 0.2,
            has_backdrop: false,
            duration: ToastDuration::After(Duration::from_millis(3000)),
            position: None,
            position_value: 2,
            width: 40,
            height: 4,
            theme: Theme::default(),
            style: None,
        }
    }
}

impl ToastConfig {
    /// Reads and validates a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: ToastConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0..=1.0).contains(&self.backdrop_opacity) {
            return Err(ConfigError::InvalidOpacity(self.backdrop_opacity));
        }
        if self.width < MIN_WIDTH || self.height < MIN_HEIGHT {
            return Err(ConfigError::InvalidSize {
                width: self.width,
                height: self.height,
                min_width: MIN_WIDTH,
                min_height: MIN_HEIGHT,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn with_duration(mut self, duration: ToastDuration) -> Self {
        self.duration = duration;
        self
    }

    #[must_use]
    pub fn with_position(mut self, position: Option<Position>) -> Self {
        self.position = position;
        self
    }

    #[must_use]
    pub fn with_animation_style(mut self, style: AnimationStyle) -> Self {
        self.animation_style = style;
        self
    }

    #[must_use]
    pub fn with_backdrop(mut self, color: Color, opacity: f32) -> Self {
        self.has_backdrop = true;
        self.backdrop_color = color;
        self.backdrop_opacity = opacity;
        self
    }

    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Entry animation: the explicit one, else the preset's.
    pub fn animation_in(&self) -> AnimationKind {
        self.animation_in
            .unwrap_or_else(|| self.animation_style.pair().0)
    }

    pub fn animation_out(&self) -> AnimationKind {
        self.animation_out
            .unwrap_or_else(|| self.animation_style.pair().1)
    }

    pub fn animation_in_timing(&self) -> Duration {
        Duration::from_millis(self.animation_in_timing)
    }

    pub fn animation_out_timing(&self) -> Duration {
        Duration::from_millis(self.animation_out_timing)
    }

    pub fn backdrop_transition_in_timing(&self) -> Duration {
        Duration::from_millis(self.backdrop_transition_in_timing)
    }

    pub fn backdrop_transition_out_timing(&self) -> Duration {
        Duration::from_millis(self.backdrop_transition_out_timing)
    }

    /// Top row of a resting toast on a screen `screen_height` rows tall.
    pub fn resolve_position(&self, position: Option<Position>, screen_height: u16) -> u16 {
        match position {
            Some(Position::Top) => self.position_value,
            Some(Position::Center) => (screen_height / 2).saturating_sub(self.height / 2),
            Some(Position::Bottom) | None => screen_height
                .saturating_sub(self.position_value)
                .saturating_sub(self.height),
        }
    }
}

/// How long a toast stays up. `0` in TOML means [`ToastDuration::Persist`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(from = "u64")]
pub enum ToastDuration {
    Persist,
    After(Duration),
}

impl From<u64> for ToastDuration {
    fn from(millis: u64) -> Self {
        if millis == 0 {
            ToastDuration::Persist
        } else {
            ToastDuration::After(Duration::from_millis(millis))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum Position {
    Top,
    Center,
    Bottom,
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Top => write!(f, "top"),
            Position::Center => write!(f, "center"),
            Position::Bottom => write!(f, "bottom"),
        }
    }
}

impl FromStr for Position {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "top" => Ok(Position::Top),
            "center" | "centre" => Ok(Position::Center),
            "bottom" => Ok(Position::Bottom),
            _ => Err(ConfigError::UnknownPosition(s.to_string())),
        }
    }
}

impl TryFrom<String> for Position {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

/// Background and text colors of a theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub back: Color,
    pub text: Color,
}

impl Theme {
    pub fn palette(self) -> Palette {
        match self {
            Theme::Light => Palette {
                back: Color::Rgb(0xff, 0xff, 0xff),
                text: Color::Rgb(0x36, 0x36, 0x36),
            },
            Theme::Dark => Palette {
                back: Color::Rgb(0x12, 0x12, 0x12),
                text: Color::Rgb(0xff, 0xff, 0xff),
            },
        }
    }
}

impl FromStr for Theme {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ConfigError::UnknownTheme(s.to_string())),
        }
    }
}

impl TryFrom<String> for Theme {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Free-form tweaks patched over the themed toast body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StyleOverride {
    #[serde(deserialize_with = "deserialize_optional_color")]
    pub fg: Option<Color>,
    #[serde(deserialize_with = "deserialize_optional_color")]
    pub bg: Option<Color>,
    pub bold: bool,
    pub italic: bool,
}

impl StyleOverride {
    pub fn to_style(&self) -> Style {
        let mut style = Style::default();
        if let Some(fg) = self.fg {
            style = style.fg(fg);
        }
        if let Some(bg) = self.bg {
            style = style.bg(bg);
        }
        if self.bold {
            style = style.add_modifier(Modifier::BOLD);
        }
        if self.italic {
            style = style.add_modifier(Modifier::ITALIC);
        }
        style
    }
}

fn parse_color(raw: &str) -> Result<Color, ConfigError> {
    Color::from_str(raw).map_err(|_| ConfigError::UnknownColor(raw.to_string()))
}

fn deserialize_color<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_color(&raw).map_err(serde::de::Error::custom)
}

fn deserialize_optional_color<'de, D>(deserializer: D) -> Result<Option<Color>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_color(&raw).map(Some).map_err(serde::de::Error::custom)
}
