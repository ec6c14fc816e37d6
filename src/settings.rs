use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::catalog::DEFAULT_BASE_URL;

/// Strings shown in place of data that is missing or still on its way.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labels {
    pub loading: String,
    pub chapter_not_found: String,
    pub verses_not_found: String,
    pub long_name_not_found: String,
    pub translation_not_found: String,
    pub transliteration_not_found: String,
}

impl Default for Labels {
    fn default() -> Self {
        Self {
            loading: "Loading ...".to_string(),
            chapter_not_found: "Chapter not found".to_string(),
            verses_not_found: "No verses found!".to_string(),
            long_name_not_found: "long name not found!".to_string(),
            translation_not_found: "translation not found".to_string(),
            transliteration_not_found: "transliteration not found".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub base_url: String,
    pub request_timeout_secs: u64,
    pub show_transliteration: bool,
    pub text_width: usize,
    pub labels: Labels,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout_secs: 10,
            show_transliteration: true,
            text_width: 80,
            labels: Labels::default(),
        }
    }
}

/// Longest request timeout honoured, whatever the configuration says.
pub const MAX_REQUEST_TIMEOUT_SECS: u64 = 300;

impl Settings {
    /// The configured timeout, clamped to `1..=MAX_REQUEST_TIMEOUT_SECS`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.clamp(1, MAX_REQUEST_TIMEOUT_SECS))
    }
}

/// Single-character key bindings. Arrow keys are always bound as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Keymap {
    pub next_chapter: String,
    pub prev_chapter: String,
    pub scroll_up: String,
    pub scroll_down: String,
    pub help: String,
    pub quit: String,
}

impl Default for Keymap {
    fn default() -> Self {
        Self {
            next_chapter: "l".to_string(),
            prev_chapter: "h".to_string(),
            scroll_up: "k".to_string(),
            scroll_down: "j".to_string(),
            help: "?".to_string(),
            quit: "q".to_string(),
        }
    }
}

impl Keymap {
    /// `true` when `c` is the key bound by `binding`.
    pub fn matches(binding: &str, c: char) -> bool {
        let mut chars = binding.chars();
        chars.next() == Some(c) && chars.next().is_none()
    }
}
