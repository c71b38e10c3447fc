use derive_more::{Display, From};

/// Root error type for the status page
#[derive(Debug, Clone, PartialEq, Display, From)]
pub enum AppError {
    #[display(fmt = "Fetch failed: {}", _0)]
    Fetch(FetchFailure),
    #[display(fmt = "Invalid timeline: {}", _0)]
    Timeline(TimelineError),
    #[display(fmt = "UI error: {}", _0)]
    Ui(UiError),
    #[display(fmt = "Configuration error: {}", _0)]
    Config(ConfigError),
}

/// Anything that went wrong while polling the status endpoint
#[derive(Debug, Clone, PartialEq, Display)]
pub enum FetchFailure {
    #[display(fmt = "request failed: {}", _0)]
    Network(String),
    #[display(fmt = "HTTP error: {} - {}", status, text)]
    HttpStatus { status: u16, text: String },
    #[display(fmt = "unreadable payload: {}", _0)]
    Decode(String),
}

/// Timeline invariant violations
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum TimelineError {
    #[display(fmt = "timeline is empty")]
    Empty,
    #[display(fmt = "bucket {} has unparseable time {:?}", index, value)]
    InvalidTime { index: usize, value: String },
    #[display(fmt = "bucket {} is not later than its predecessor", index)]
    OutOfOrder { index: usize },
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum UiError {
    #[display(fmt = "window or document not available")]
    WindowUnavailable,
    #[display(fmt = "element not found: {}", _0)]
    ElementNotFound(String),
    #[display(fmt = "DOM operation failed: {}", _0)]
    DomOperation(String),
}

#[derive(Debug, Clone, PartialEq, Display)]
pub enum ConfigError {
    #[display(fmt = "missing configuration: {}", _0)]
    Missing(String),
    #[display(fmt = "invalid configuration: {}", _0)]
    Invalid(String),
}

impl std::error::Error for AppError {}

impl From<AppError> for wasm_bindgen::JsValue {
    fn from(error: AppError) -> Self {
        wasm_bindgen::JsValue::from_str(&error.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Convert a `JsValue` failure from a web-sys call into a UI error
pub fn dom_error(context: &str, err: wasm_bindgen::JsValue) -> AppError {
    AppError::Ui(UiError::DomOperation(format!("{context}: {err:?}")))
}
