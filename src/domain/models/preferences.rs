use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::ThemeName;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    #[serde(rename = "soundEnabled", default = "default_sound_enabled")]
    pub sound_enabled: bool,
    #[serde(rename = "selectedTheme", default = "default_theme")]
    pub selected_theme: String,
}

fn default_sound_enabled() -> bool {
    return true;
}

fn default_theme() -> String {
    return ThemeName::Gaia.to_string();
}

impl Default for Preferences {
    fn default() -> Preferences {
        return Preferences {
            sound_enabled: default_sound_enabled(),
            selected_theme: default_theme(),
        };
    }
}

impl Preferences {
    pub fn theme(&self) -> ThemeName {
        return ThemeName::parse(&self.selected_theme).unwrap_or(ThemeName::Gaia);
    }
}
