use serde::{Deserialize, Serialize};

use crate::enums::Theme;

/// Profile fields on the account settings screen.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AccountSettings {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub bio: String,
    #[serde(default)]
    pub company: String,
}

/// Appearance preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AppearanceSettings {
    #[serde(default)]
    pub theme: Theme,
    #[serde(default = "default_accent")]
    pub accent_color: String,
    #[serde(default)]
    pub compact_mode: bool,
    #[serde(default = "default_font_size")]
    pub font_size: u8,
}

fn default_accent() -> String {
    "#6366f1".to_string()
}

const fn default_font_size() -> u8 {
    14
}

impl Default for AppearanceSettings {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            accent_color: default_accent(),
            compact_mode: false,
            font_size: default_font_size(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn appearance_fills_missing_fields() {
        let settings: AppearanceSettings = serde_json::from_str(r#"{"theme":"dark"}"#).unwrap();
        assert_eq!(settings.theme, Theme::Dark);
        assert_eq!(settings.accent_color, "#6366f1");
        assert_eq!(settings.font_size, 14);
        assert!(!settings.compact_mode);
    }
}
