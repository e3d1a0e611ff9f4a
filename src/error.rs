use thiserror::Error;

/// Failures that can only happen while wiring the game to its host.
/// Once a session is running, nothing in a tick can fail.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
  #[error("invalid game config: {0}")]
  InvalidConfig(String),
  #[error("no global window available")]
  MissingWindow,
  #[error("window has no document")]
  MissingDocument,
  #[error("no element with id `{0}`")]
  MissingElement(String),
  #[error("element `{0}` is not a canvas")]
  NotACanvas(String),
  #[error("canvas has no 2d rendering context")]
  ContextUnavailable,
  #[error("tick timer failed: {0}")]
  Timer(String),
}

impl From<SetupError> for wasm_bindgen::JsValue {
  fn from(err:SetupError) -> Self {
    wasm_bindgen::JsValue::from_str(&err.to_string())
  }
}
