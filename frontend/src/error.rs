use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum MotionError {
    #[error("required element `{selector}` not found")]
    MissingElement { selector: String },

    #[error("ticker layer {layer} has no scroller items")]
    EmptyLayer { layer: usize },

    #[error("ticker needs at least one preset with exactly {layers} word(s)")]
    NoPresets { layers: usize },

    #[error("dom call failed: {0}")]
    Dom(String),

    #[error("invalid motion config: {0}")]
    Config(#[from] serde_json::Error),
}

impl MotionError {
    pub fn missing(selector: impl Into<String>) -> Self {
        MotionError::MissingElement { selector: selector.into() }
    }
}

// JsValue is !Send and only printable through Debug, so keep the rendered text.
impl From<JsValue> for MotionError {
    fn from(value: JsValue) -> Self {
        MotionError::Dom(format!("{:?}", value))
    }
}
