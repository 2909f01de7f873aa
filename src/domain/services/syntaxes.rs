use once_cell::sync::Lazy;
use ratatui::style::Color;
use syntect::highlighting::Theme;
use syntect::highlighting::ThemeSet;
use syntect::parsing::SyntaxReference;
use syntect::parsing::SyntaxSet;

pub static SYNTAX_SET: Lazy<SyntaxSet> = Lazy::new(SyntaxSet::load_defaults_newlines);
static THEME_SET: Lazy<ThemeSet> = Lazy::new(ThemeSet::load_defaults);

/// Both palettes sit on a light background, so code blocks use a light theme.
const CODE_THEME: &str = "InspiredGitHub";

pub struct Syntaxes {}

impl Syntaxes {
    pub fn get(name: &str) -> &'static SyntaxReference {
        let mut lang = name.trim().to_lowercase();
        if lang == "typescript" || lang == "ts" {
            lang = "js".to_string();
        }

        if let Some(syntax) = SYNTAX_SET.find_syntax_by_token(&lang) {
            return syntax;
        }

        return SYNTAX_SET.find_syntax_plain_text();
    }

    pub fn theme() -> &'static Theme {
        if let Some(theme) = THEME_SET.themes.get(CODE_THEME) {
            return theme;
        }

        return &THEME_SET.themes["base16-ocean.light"];
    }

    pub fn translate_colour(syntect_color: syntect::highlighting::Color) -> Option<Color> {
        match syntect_color {
            syntect::highlighting::Color { r, g, b, a } if a > 0 => {
                return Some(Color::Rgb(r, g, b))
            }
            _ => return None,
        }
    }
}
