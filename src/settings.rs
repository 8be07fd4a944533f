//! Game settings
//!
//! The browser shell reads these from an optional inline JSON element on the
//! page; nothing is ever written back.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::sim::Layout;

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Fixed RNG seed; `None` picks one from the clock
    pub seed: Option<u64>,

    // === Headless layout ===
    /// Play-area width used when no DOM measurement is available
    pub area_width: f32,
    /// Play-area height used when no DOM measurement is available
    pub area_height: f32,
    /// Catcher width
    pub catcher_width: f32,
    /// Catcher height
    pub catcher_height: f32,

    // === Diagnostics ===
    /// Log filter for the browser console ("error", "warn", "info", "debug", "trace")
    pub log_level: String,
    /// Start with the autopilot steering the catcher
    pub autopilot: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            area_width: 400.0,
            area_height: 400.0,
            catcher_width: 80.0,
            catcher_height: 64.0,

            log_level: "info".to_string(),
            autopilot: false,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        let dims = [
            ("area_width", self.area_width),
            ("area_height", self.area_height),
            ("catcher_width", self.catcher_width),
            ("catcher_height", self.catcher_height),
        ];
        for (field, value) in dims {
            if !value.is_finite() || value <= 0.0 {
                return Err(Error::InvalidDimension { field, value });
            }
        }
        Ok(())
    }

    /// Layout with the catcher resting on the floor
    pub fn layout(&self) -> Layout {
        Layout::new(
            Vec2::new(self.area_width, self.area_height),
            Vec2::new(self.catcher_width, self.catcher_height),
        )
    }

    /// Parsed log filter, falling back to Info
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// DOM element id holding inline settings JSON
    #[allow(dead_code)]
    const ELEMENT_ID: &'static str = "catcher-settings";

    /// Load settings from the page (WASM only)
    ///
    /// A page without a settings element gets the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self> {
        let text = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(Self::ELEMENT_ID))
            .and_then(|el| el.text_content());

        match text {
            Some(json) => Self::from_json(&json),
            None => Ok(Self::default()),
        }
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self> {
        Ok(Self::default())
    }
}
