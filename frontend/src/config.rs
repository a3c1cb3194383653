use log::{error, info};
use serde::Deserialize;

use crate::error::MotionError;
use crate::motion::ticker::TickerVariant;
use crate::surface::Surface;

/// Inline `<script type="application/json">` block that may override the defaults.
pub const CONFIG_SELECTOR: &str = "#motion-config";

const PRESETS: [[&str; 4]; 12] = [
    ["Students", "who", "organize", "projects"],
    ["Students", "who", "share", "ideas"],
    ["Students", "to", "plan", "goals"],
    ["Teams", "who", "track", "tasks"],
    ["Teams", "to", "connect", "ideas"],
    ["Teams", "who", "create", "solutions"],
    ["Makers", "who", "organize", "ideas"],
    ["Makers", "to", "share", "creations"],
    ["Makers", "who", "learn", "projects"],
    ["Thinkers", "who", "plan", "goals"],
    ["Thinkers", "who", "create", "solutions"],
    ["Thinkers", "to", "organize", "notes"],
];

const CLASSIC_PRESETS: [&str; 7] = ["organize", "share", "plan", "track", "connect", "create", "learn"];

const PALETTE: [&str; 7] = [
    "rgba(102, 126, 234, 1)",
    "rgba(240, 147, 251, 1)",
    "rgba(79, 172, 254, 1)",
    "rgba(67, 233, 123, 1)",
    "rgba(250, 112, 154, 1)",
    "rgba(255, 154, 86, 1)",
    "rgba(161, 140, 209, 1)",
];

#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct MotionConfig {
    pub ticker: TickerConfig,
    pub popups: PopupConfig,
    pub pillars: PillarConfig,
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct TickerConfig {
    /// One word per layer of the four-layer ticker.
    pub presets: Vec<Vec<String>>,
    /// Single-word presets for the one-layer ticker.
    pub classic_presets: Vec<Vec<String>>,
    /// Pixels per frame, by layer. Missing entries fall back to the last one.
    pub speeds: Vec<f64>,
    pub center_threshold_px: f64,
    pub highlight_ms: f64,
    pub release_stagger_ms: f64,
    pub cooldown_ms: f64,
    pub start_delay_ms: u32,
}

impl Default for TickerConfig {
    fn default() -> Self {
        Self {
            presets: PRESETS
                .iter()
                .map(|phrase| phrase.iter().map(|w| w.to_string()).collect())
                .collect(),
            classic_presets: CLASSIC_PRESETS.iter().map(|w| vec![w.to_string()]).collect(),
            speeds: vec![50.0, 50.0, 50.0, 50.0],
            center_threshold_px: 100.0,
            highlight_ms: 2000.0,
            release_stagger_ms: 250.0,
            cooldown_ms: 2000.0,
            start_delay_ms: 500,
        }
    }
}

impl TickerConfig {
    pub fn presets_for(&self, variant: TickerVariant) -> &[Vec<String>] {
        match variant {
            TickerVariant::Layered => &self.presets,
            TickerVariant::Classic => &self.classic_presets,
        }
    }

    pub fn speed(&self, layer: usize) -> f64 {
        self.speeds
            .get(layer)
            .or(self.speeds.last())
            .copied()
            .unwrap_or(50.0)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct PopupSelectors {
    pub button: String,
    pub popup: String,
}

impl PopupSelectors {
    fn named(name: &str) -> Self {
        Self {
            button: format!(".{}-button", name),
            popup: format!(".{}-popup", name),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PopupConfig {
    pub pairs: Vec<PopupSelectors>,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            pairs: ["community", "explore", "resources"]
                .into_iter()
                .map(PopupSelectors::named)
                .collect(),
        }
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct PillarConfig {
    /// Travel of the timeline indicator, in rem.
    pub line_height_rem: f64,
    pub palette: Vec<String>,
}

impl Default for PillarConfig {
    fn default() -> Self {
        Self {
            line_height_rem: 20.0,
            palette: PALETTE.iter().map(|c| c.to_string()).collect(),
        }
    }
}

pub fn parse(text: &str) -> Result<MotionConfig, MotionError> {
    Ok(serde_json::from_str(text)?)
}

/// Defaults, overridden by the page's config block when it has one.
pub fn load<S: Surface>(surface: &S) -> MotionConfig {
    let Some(text) = surface
        .query(CONFIG_SELECTOR)
        .and_then(|node| surface.text(&node))
    else {
        return MotionConfig::default();
    };

    match parse(&text) {
        Ok(config) => {
            info!("Loaded motion config from {}", CONFIG_SELECTOR);
            config
        }
        Err(e) => {
            error!("{}, falling back to defaults", e);
            MotionConfig::default()
        }
    }
}
