// 🎨 Theme - Light/dark palettes for the TUI
//
// "system" follows the terminal: COLORFGBG ("fg;bg") with a dark background
// index (0-6, 8) resolves to dark, anything else to light.

use anyhow::{bail, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    #[default]
    System,
    Light,
    Dark,
}

impl ThemeMode {
    pub fn parse(value: &str) -> Result<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "system" => Ok(ThemeMode::System),
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => bail!("Unknown theme '{}' (expected system, light or dark)", other),
        }
    }

    /// Resolve `System` against a COLORFGBG value; explicit modes pass through
    pub fn resolve(self, colorfgbg: Option<&str>) -> Theme {
        match self {
            ThemeMode::Light => Theme::Light,
            ThemeMode::Dark => Theme::Dark,
            ThemeMode::System => {
                let background = colorfgbg
                    .and_then(|v| v.rsplit(';').next())
                    .and_then(|bg| bg.trim().parse::<u8>().ok());
                match background {
                    Some(bg) if bg <= 6 || bg == 8 => Theme::Dark,
                    Some(_) => Theme::Light,
                    None => Theme::Dark,
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Theme {
    Light,
    Dark,
}

impl Theme {
    pub fn toggle(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }
}

#[cfg(feature = "tui")]
pub use palette::Palette;

#[cfg(feature = "tui")]
mod palette {
    use super::Theme;
    use ratatui::style::Color;

    /// Colors the renderer pulls from
    #[derive(Debug, Clone, Copy)]
    pub struct Palette {
        pub background: Color,
        pub text: Color,
        pub muted: Color,
        pub accent: Color,
        pub accent_alt: Color,
        pub border: Color,
        pub highlight: Color,
        pub gauge: Color,
        pub danger: Color,
    }

    impl Theme {
        pub fn palette(&self) -> Palette {
            match self {
                Theme::Dark => Palette {
                    background: Color::Black,
                    text: Color::White,
                    muted: Color::DarkGray,
                    accent: Color::Magenta,
                    accent_alt: Color::LightMagenta,
                    border: Color::Gray,
                    highlight: Color::DarkGray,
                    gauge: Color::Cyan,
                    danger: Color::Red,
                },
                Theme::Light => Palette {
                    background: Color::White,
                    text: Color::Black,
                    muted: Color::Gray,
                    accent: Color::Magenta,
                    accent_alt: Color::Red,
                    border: Color::DarkGray,
                    highlight: Color::Gray,
                    gauge: Color::Blue,
                    danger: Color::Red,
                },
            }
        }
    }
}
