use wasm_bindgen::prelude::*;

use crate::domain::logging::{LogComponent, LogLevel, get_logger};
use crate::infrastructure::{BrowserTimeProvider, ConsoleLogger, StatusPageConfig};

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

pub use presentation::{StatusPage, StatusPageHandle};

/// Install the panic hook, console logger and browser clock
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let level = StatusPageConfig::from_window()
        .map(|config| config.log_level())
        .unwrap_or(LogLevel::Info);
    domain::logging::init_logger(Box::new(ConsoleLogger::new(level)));
    domain::logging::init_time_provider(Box::new(BrowserTimeProvider::new()));

    get_logger().info(
        LogComponent::Presentation("Initialize"),
        &format!("tweet timeline ready (log level {})", level.to_string().trim()),
    );
}

/// Mount the status page from `window.twitter_stream_status_data`
#[wasm_bindgen(js_name = mountStatusPage)]
pub fn mount_status_page() -> Result<StatusPageHandle, JsValue> {
    StatusPageHandle::mount()
}
