use crate::settings::{Keymap, Labels, Settings};
use eyre::Result;
use serde_json::{Map, Value};
use std::{fs, path::PathBuf};

const CONFIG_FILE_NAME: &str = "configuration.json";

#[derive(Debug, Clone)]
pub struct Config {
    pub settings: Settings,
    pub keymap: Keymap,
    filepath: PathBuf,
}

impl Config {
    /// Load the configuration from the application data directory, writing
    /// the defaults there on first run.
    pub fn new() -> Result<Self> {
        let prefix = get_app_data_prefix()?;
        let filepath = prefix.join(CONFIG_FILE_NAME);

        if !filepath.exists() {
            let config = Self {
                settings: Settings::default(),
                keymap: Keymap::default(),
                filepath,
            };
            config.save()?;
            return Ok(config);
        }

        Self::load_from(filepath)
    }

    /// Load configuration from a custom path. A missing file yields defaults.
    pub fn load_from(filepath: PathBuf) -> Result<Self> {
        let mut settings = Settings::default();
        let mut keymap = Keymap::default();

        if filepath.exists() {
            let config_str = fs::read_to_string(&filepath)?;
            match serde_json::from_str::<Value>(&config_str) {
                Ok(user_config) => {
                    if let Some(map) = user_config.get("Setting").and_then(|v| v.as_object()) {
                        apply_settings(&mut settings, map);
                    }
                    if let Some(map) = user_config.get("Keymap").and_then(|v| v.as_object()) {
                        apply_keymap(&mut keymap, map);
                    }
                }
                Err(err) => {
                    log::warn!(
                        "Ignoring unreadable configuration {}: {}",
                        filepath.display(),
                        err
                    );
                }
            }
        }

        Ok(Self {
            settings,
            keymap,
            filepath,
        })
    }

    /// Get the configuration file path
    pub fn filepath(&self) -> &PathBuf {
        &self.filepath
    }

    /// Save current configuration to file
    pub fn save(&self) -> Result<()> {
        let config_json = serde_json::json!({
            "Setting": self.settings,
            "Keymap": self.keymap,
        });

        let config_str = serde_json::to_string_pretty(&config_json)?;

        if let Some(parent) = self.filepath.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(&self.filepath, config_str)?;
        Ok(())
    }
}

impl Default for Config {
    /// Built-in settings, not backed by any file on disk yet.
    fn default() -> Self {
        Self {
            settings: Settings::default(),
            keymap: Keymap::default(),
            filepath: PathBuf::from(CONFIG_FILE_NAME),
        }
    }
}

fn apply_settings(settings: &mut Settings, map: &Map<String, Value>) {
    if let Some(val) = map.get("base_url").and_then(|v| v.as_str()) {
        settings.base_url = val.to_string();
    }
    if let Some(val) = map.get("request_timeout_secs").and_then(|v| v.as_u64()) {
        settings.request_timeout_secs = val;
    }
    if let Some(val) = map.get("show_transliteration").and_then(|v| v.as_bool()) {
        settings.show_transliteration = val;
    }
    if let Some(val) = map.get("text_width").and_then(|v| v.as_u64()) {
        settings.text_width = val as usize;
    }
    if let Some(val) = map.get("labels") {
        match serde_json::from_value::<Labels>(val.clone()) {
            Ok(labels) => settings.labels = labels,
            Err(err) => log::warn!("Ignoring malformed labels: {}", err),
        }
    }
}

fn apply_keymap(keymap: &mut Keymap, map: &Map<String, Value>) {
    let bindings: [(&str, &mut String); 6] = [
        ("next_chapter", &mut keymap.next_chapter),
        ("prev_chapter", &mut keymap.prev_chapter),
        ("scroll_up", &mut keymap.scroll_up),
        ("scroll_down", &mut keymap.scroll_down),
        ("help", &mut keymap.help),
        ("quit", &mut keymap.quit),
    ];
    for (name, slot) in bindings {
        if let Some(val) = map.get(name).and_then(|v| v.as_str()) {
            *slot = val.to_string();
        }
    }
}

/// Directory holding the configuration file and the log.
pub fn get_app_data_prefix() -> Result<PathBuf> {
    let var = |key: &str| std::env::var_os(key).map(PathBuf::from);

    if let Some(config_home) = var("XDG_CONFIG_HOME") {
        return Ok(config_home.join("surah"));
    }
    if let Some(home) = var("HOME") {
        let xdg_default = home.join(".config").join("surah");
        return Ok(if xdg_default.exists() {
            xdg_default
        } else {
            home.join(".surah")
        });
    }
    var("USERPROFILE")
        .map(|profile| profile.join(".surah"))
        .ok_or_else(|| eyre::eyre!("Could not determine application data directory"))
}
