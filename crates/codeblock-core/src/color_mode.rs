//! Ambient light/dark display preference.
//!
//! The mode only ever changes presentation (bar colors, highlight theme).
//! It is resolved once at startup and handed to render functions explicitly.

use serde::{Deserialize, Serialize};

/// Environment variable set by many terminals as `fg;bg` (e.g. `15;0`).
pub const COLORFGBG_ENV: &str = "COLORFGBG";

/// Resolved color mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    Light,
    #[default]
    Dark,
}

impl ColorMode {
    /// Returns the other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            ColorMode::Light => ColorMode::Dark,
            ColorMode::Dark => ColorMode::Light,
        }
    }

    pub fn is_dark(self) -> bool {
        matches!(self, ColorMode::Dark)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Light => "light",
            ColorMode::Dark => "dark",
        }
    }

    /// Guesses the mode from a `COLORFGBG` value.
    ///
    /// The last field is the background palette index. Indexes 7 and 9-15
    /// are light backgrounds; everything else in 0-15 is dark.
    pub fn from_colorfgbg(value: &str) -> Option<Self> {
        let bg: u8 = value.rsplit(';').next()?.trim().parse().ok()?;
        match bg {
            7 | 9..=15 => Some(ColorMode::Light),
            0..=6 | 8 => Some(ColorMode::Dark),
            _ => None,
        }
    }

    /// Guesses the mode from the process environment.
    pub fn detect() -> Option<Self> {
        std::env::var(COLORFGBG_ENV)
            .ok()
            .and_then(|value| Self::from_colorfgbg(&value))
    }
}

impl std::fmt::Display for ColorMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Configured preference: a fixed mode or terminal detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ColorModePreference {
    #[default]
    Auto,
    Light,
    Dark,
}

impl ColorModePreference {
    /// Resolves the preference, using `detected` for `Auto`.
    ///
    /// Falls back to dark when nothing could be detected.
    pub fn resolve(self, detected: Option<ColorMode>) -> ColorMode {
        match self {
            ColorModePreference::Light => ColorMode::Light,
            ColorModePreference::Dark => ColorMode::Dark,
            ColorModePreference::Auto => detected.unwrap_or_default(),
        }
    }
}

/// Picks the mode for this run.
///
/// Order: explicit override, then the configured preference, then detection.
pub fn resolve_color_mode(
    override_mode: Option<ColorMode>,
    preference: ColorModePreference,
    detected: Option<ColorMode>,
) -> ColorMode {
    override_mode.unwrap_or_else(|| preference.resolve(detected))
}
