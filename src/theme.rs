use clap::ValueEnum;
use palette::{Hsl, IntoColor, Srgb};
use ratatui::style::Color;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Explicit light/dark palette threaded into every render call. Rendering
/// is a function of (angle, settings, theme); there is no ambient mode flag.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, Default, ValueEnum, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl FromStr for Theme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dark" => Ok(Self::Dark),
            "light" => Ok(Self::Light),
            _ => Err(format!("Unknown theme: {}", s)),
        }
    }
}

impl Theme {
    pub fn name(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn next(&self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    pub fn background(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(15, 23, 42),
            Theme::Light => Color::Rgb(248, 250, 252),
        }
    }

    pub fn panel_border(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(51, 65, 85),
            Theme::Light => Color::Rgb(203, 213, 225),
        }
    }

    pub fn text(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(226, 232, 240),
            Theme::Light => Color::Rgb(30, 41, 59),
        }
    }

    pub fn muted(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(148, 163, 184),
            Theme::Light => Color::Rgb(100, 116, 139),
        }
    }

    pub fn axis(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(71, 85, 105),
            Theme::Light => Color::Rgb(148, 163, 184),
        }
    }

    pub fn circle(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(100, 116, 139),
            Theme::Light => Color::Rgb(100, 116, 139),
        }
    }

    /// Cosine guide and degree field accents.
    pub fn cosine(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(56, 189, 248),
            Theme::Light => Color::Rgb(2, 132, 199),
        }
    }

    /// Sine guide accents.
    pub fn sine(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(244, 114, 182),
            Theme::Light => Color::Rgb(219, 39, 119),
        }
    }

    pub fn handle(&self) -> Color {
        Color::Rgb(239, 68, 68)
    }

    pub fn reference(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(192, 132, 252),
            Theme::Light => Color::Rgb(147, 51, 234),
        }
    }

    pub fn symmetry(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(74, 222, 128),
            Theme::Light => Color::Rgb(22, 163, 74),
        }
    }

    pub fn arc_value(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(74, 222, 128),
            Theme::Light => Color::Rgb(22, 163, 74),
        }
    }

    pub fn sector_value(&self) -> Color {
        match self {
            Theme::Dark => Color::Rgb(192, 132, 252),
            Theme::Light => Color::Rgb(147, 51, 234),
        }
    }

    /// Accent color keyed on a position around the circle (0.0 to 1.0) and
    /// an intensity. Used to tint the swept sector so the hue tracks the
    /// angle's fraction of the full turn.
    pub fn accent(&self, position: f32, intensity: f32) -> Color {
        let lightness = match self {
            Theme::Dark => 0.45 + intensity * 0.2,
            Theme::Light => 0.35 + intensity * 0.15,
        };
        let hue = 40.0 + position * 280.0;
        let hsl = Hsl::new(hue, 0.85, lightness);
        let rgb: Srgb = hsl.into_color();
        Color::Rgb(
            (rgb.red * 255.0) as u8,
            (rgb.green * 255.0) as u8,
            (rgb.blue * 255.0) as u8,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_names() {
        assert_eq!("dark".parse::<Theme>(), Ok(Theme::Dark));
        assert_eq!("Light".parse::<Theme>(), Ok(Theme::Light));
        assert!("solarized".parse::<Theme>().is_err());
    }

    #[test]
    fn next_cycles_both_ways() {
        assert_eq!(Theme::Dark.next(), Theme::Light);
        assert_eq!(Theme::Light.next().next(), Theme::Light);
    }
}
