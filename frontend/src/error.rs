use wasm_bindgen::JsValue;

/// Result alias used by every effect initializer.
pub type Result<T> = std::result::Result<T, EffectError>;

#[derive(Debug, thiserror::Error)]
pub enum EffectError {
    /// A required element is not on this page. The effect is skipped.
    #[error("no element matching `{0}`")]
    Missing(&'static str),
    /// A browser call threw.
    #[error("browser call failed: {0}")]
    Js(String),
    #[error("invalid page config: {0}")]
    Config(#[from] serde_json::Error),
}

impl From<JsValue> for EffectError {
    fn from(value: JsValue) -> Self {
        match value.as_string() {
            Some(message) => Self::Js(message),
            None => Self::Js(format!("{:?}", value)),
        }
    }
}
