#[cfg(test)]
#[path = "palette_test.rs"]
mod tests;

use ratatui::style::Color;
use strum::EnumIter;
use strum::EnumVariantNames;
use strum::IntoEnumIterator;

#[derive(Clone, Copy, Debug, PartialEq, Eq, EnumIter, EnumVariantNames, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum ThemeName {
    Gaia,
    Shinra,
}

impl ThemeName {
    pub fn parse(text: &str) -> Option<ThemeName> {
        return ThemeName::iter().find(|e| return e.to_string() == text);
    }

    pub fn toggle(&self) -> ThemeName {
        match self {
            ThemeName::Gaia => return ThemeName::Shinra,
            ThemeName::Shinra => return ThemeName::Gaia,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub title: &'static str,
    pub background: Color,
    pub primary_accent: Color,
    pub secondary_accent: Color,
    pub highlight: Color,
    pub text_main: Color,
    pub text_muted: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Palette {
    pub fn get(name: ThemeName) -> Palette {
        match name {
            ThemeName::Gaia => {
                return Palette {
                    title: "Gaia Elegance",
                    background: Color::Rgb(0xF4, 0xF4, 0xF9),
                    primary_accent: Color::Rgb(0x50, 0x66, 0x80),
                    secondary_accent: Color::Rgb(0x8F, 0xA8, 0xC8),
                    highlight: Color::Rgb(0xDA, 0xA4, 0x9A),
                    text_main: Color::Rgb(0x2E, 0x2E, 0x2E),
                    text_muted: Color::Rgb(0x6E, 0x6E, 0x6E),
                    success: Color::Rgb(0x2E, 0x7D, 0x32),
                    warning: Color::Rgb(0xE0, 0x8A, 0x00),
                    error: Color::Rgb(0xC6, 0x28, 0x28),
                };
            }
            ThemeName::Shinra => {
                return Palette {
                    title: "Shinra Executive",
                    background: Color::Rgb(0xF2, 0xF5, 0xF7),
                    primary_accent: Color::Rgb(0x1F, 0x2A, 0x44),
                    secondary_accent: Color::Rgb(0x6C, 0x7A, 0x89),
                    highlight: Color::Rgb(0xB1, 0xA7, 0xF2),
                    text_main: Color::Rgb(0x1C, 0x1C, 0x1C),
                    text_muted: Color::Rgb(0x5E, 0x5E, 0x5E),
                    success: Color::Rgb(0x2E, 0x7D, 0x32),
                    warning: Color::Rgb(0xE0, 0x8A, 0x00),
                    error: Color::Rgb(0xC6, 0x28, 0x28),
                };
            }
        }
    }
}
