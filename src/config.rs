use std::{
    fs,
    path::PathBuf,
    sync::OnceLock,
};

use regex::Regex;
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    core::TangochoError,
    quiz::FilterSelection,
};

const APP_NAME: &str = "tangocho";
const SETTINGS_FILE: &str = "settings.json";

pub fn app_data_dir() -> PathBuf {
    if let Some(data_dir) = dirs::data_local_dir() {
        let app_dir = data_dir.join(APP_NAME);
        let _ = fs::create_dir_all(&app_dir);
        app_dir
    } else {
        PathBuf::from(".")
    }
}

pub fn settings_path() -> PathBuf {
    app_data_dir().join(SETTINGS_FILE)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub api_key: String,
    pub database_id: String,
    pub filters: FilterSelection,
    pub countdown_secs: Option<u64>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            database_id: String::new(),
            filters: FilterSelection::default(),
            countdown_secs: None,
        }
    }
}

impl Settings {
    /// Reads the settings file, writing a fresh scaffold on first run so the
    /// user has something to fill in.
    pub fn load_or_create() -> Result<Self, TangochoError> {
        let path = settings_path();

        if !path.exists() {
            println!("No settings file found, writing defaults to: {}", path.display());
            let defaults = Settings::default();
            defaults.save()?;
            return Ok(defaults);
        }

        let json = fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&json)?)
    }

    pub fn save(&self) -> Result<(), TangochoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(settings_path(), json)?;
        Ok(())
    }

    /// The collection id with any pasted-URL wrapping stripped.
    pub fn resolved_database_id(&self) -> Option<String> {
        extract_database_id(&self.database_id)
    }

    /// Whether data loading can go ahead.
    pub fn is_complete(&self) -> bool {
        !self.api_key.trim().is_empty() && self.resolved_database_id().is_some()
    }
}

/// Pulls the 32-hex-digit collection id out of a raw id or a pasted Notion
/// URL.
pub fn extract_database_id(input: &str) -> Option<String> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let pattern =
        PATTERN.get_or_init(|| Regex::new("[0-9a-f]{32}").expect("valid database id pattern"));

    if let Some(found) = pattern.find(input) {
        return Some(found.as_str().to_string());
    }

    // Dashed UUID form, as copied from the API or share dialogs
    let undashed = input.replace('-', "");
    pattern.find(&undashed).map(|found| found.as_str().to_string())
}
