use std::fs;
use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

/// Boot-time configuration read from `settings.json` in the app data
/// directory. Absent or malformed files fall back to defaults so a bad
/// edit can never keep the app from starting.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub ocr_language: String,
    pub classification_categories: Vec<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            ocr_language: "spa".to_string(),
            classification_categories: vec![
                "Finance".to_string(),
                "HR".to_string(),
                "Sales".to_string(),
                "Legal".to_string(),
                "Technology".to_string(),
            ],
        }
    }
}

impl Settings {
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => serde_json::from_str(&contents).unwrap_or_else(|err| {
                warn!("Ignoring malformed settings at {}: {err}", path.display());
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/settings.json"));
        assert_eq!(settings.ocr_language, "spa");
        assert_eq!(settings.classification_categories.len(), 5);
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_fields() {
        let dir = std::env::temp_dir().join("docudesk_test_settings_partial");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, r#"{"ocr_language":"eng"}"#).unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.ocr_language, "eng");
        assert!(!settings.classification_categories.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn malformed_file_falls_back_to_defaults() {
        let dir = std::env::temp_dir().join("docudesk_test_settings_malformed");
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.json");
        std::fs::write(&path, "{not json").unwrap();

        let settings = Settings::load(&path);
        assert_eq!(settings.ocr_language, "spa");

        let _ = std::fs::remove_dir_all(&dir);
    }
}
