use log::Level;
use serde::Deserialize;
use web_sys::Document;

use crate::error::Result;

/// Id of the optional `<script type="application/json">` block holding overrides.
pub const CONFIG_ELEMENT_ID: &str = "page-effects-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug  // Verbose while running locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub particle_count: usize,
    pub particle_fill: String,
    pub reveal_threshold: f64,
    pub counter_threshold: f64,
    /// Divisor of the counter target; roughly the number of steps per count-up.
    pub counter_speed: f64,
    pub counter_step_ms: u32,
    pub carousel_interval_ms: u32,
    pub scroll_top_threshold: f64,
    /// Height of the fixed nav bar, added to scrollY when picking the active section.
    pub nav_offset: f64,
    pub mobile_breakpoint: f64,
    pub form_ack_message: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            particle_count: 80,
            particle_fill: "rgba(0, 194, 168, 0.4)".to_string(),
            reveal_threshold: 0.1,
            counter_threshold: 0.5,
            counter_speed: 200.0,
            counter_step_ms: 20,
            carousel_interval_ms: 6000,
            scroll_top_threshold: 500.0,
            nav_offset: 120.0,
            mobile_breakpoint: 768.0,
            form_ack_message: "Thank you for your message! We will get back to you soon.".to_string(),
        }
    }
}

impl Config {
    pub fn from_json(raw: &str) -> Result<Self> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_json::from_str(raw)?)
    }

    /// Reads overrides from the page. Falls back to defaults when the block
    /// is missing or unreadable.
    pub fn from_document(document: &Document) -> Self {
        let Some(raw) = document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        else {
            return Self::default();
        };

        match Self::from_json(&raw) {
            Ok(config) => {
                log::debug!("Loaded page config overrides: {:?}", config);
                config
            }
            Err(e) => {
                log::warn!("Ignoring #{}: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}
