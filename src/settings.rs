//! Game settings
//!
//! Read-only configuration. On the web it comes from an optional
//! `<script id="game-settings" type="application/json">` block in the page;
//! natively from the `HEARTSTRING_SETTINGS` environment variable. Nothing is
//! ever written back.

use serde::{Deserialize, Serialize};

use crate::consts::DEFAULT_MAX_HITS;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Hits needed to trigger the ending
    pub max_hits: u32,
    /// Fixed RNG seed; `None` seeds from the clock
    pub seed: Option<u64>,

    // === HUD ===
    /// Show the "MOVE / SHOOT" hint line
    pub show_controls_hint: bool,

    // === Accessibility ===
    /// Reduced motion (keeps the thread still)
    pub reduced_motion: bool,

    // === Diagnostics ===
    /// `log` level name: error, warn, info, debug, trace
    pub log_level: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_hits: DEFAULT_MAX_HITS,
            seed: None,

            // HUD
            show_controls_hint: true,

            // Accessibility
            reduced_motion: false,

            log_level: "info".to_string(),
        }
    }
}

impl Settings {
    /// DOM id of the optional inline settings block
    pub const ELEMENT_ID: &'static str = "game-settings";
    /// Environment variable read by native builds
    pub const ENV_VAR: &'static str = "HEARTSTRING_SETTINGS";

    /// Parse settings JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<Settings>(json).map(Settings::validated)
    }

    /// Fix up values the game cannot run with
    pub fn validated(mut self) -> Self {
        if self.max_hits == 0 {
            log::warn!("max_hits must be at least 1, using 1");
            self.max_hits = 1;
        }
        self
    }

    /// Parsed log level, falling back to Info
    pub fn level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Parse `json` if present, otherwise (or on error) use defaults
    fn from_optional_json(json: Option<String>) -> Self {
        match json {
            Some(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings ({e}), using defaults");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Load settings from the page (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());
        Self::from_optional_json(json)
    }

    /// Load settings from the environment (native)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::from_optional_json(std::env::var(Self::ENV_VAR).ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!(s.max_hits, 3);
        assert_eq!(s.seed, None);
        assert!(s.show_controls_hint);
        assert!(!s.reduced_motion);
        assert_eq!(s.level(), log::Level::Info);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "seed": 42, "reduced_motion": true }"#).unwrap();
        assert_eq!(s.seed, Some(42));
        assert!(s.reduced_motion);
        assert_eq!(s.max_hits, 3);
        assert!(s.show_controls_hint);
    }

    #[test]
    fn test_zero_hits_is_fixed_up() {
        let s = Settings::from_json(r#"{ "max_hits": 0 }"#).unwrap();
        assert_eq!(s.max_hits, 1);
    }

    #[test]
    fn test_bad_json_falls_back() {
        assert!(Settings::from_json("{ nope").is_err());
        let s = Settings::from_optional_json(Some("{ nope".to_string()));
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn test_log_level_parse() {
        let s = Settings {
            log_level: "debug".to_string(),
            ..Default::default()
        };
        assert_eq!(s.level(), log::Level::Debug);
        let s = Settings {
            log_level: "loud".to_string(),
            ..Default::default()
        };
        assert_eq!(s.level(), log::Level::Info);
    }
}
