pub mod config;
pub mod dto;
pub mod http;
pub mod rendering;
pub mod services;
pub mod ui;

pub use config::StatusPageConfig;
pub use http::StatusHttpClient;
pub use services::{BrowserTimeProvider, ConsoleLogger};
pub use ui::DomStatusIndicator;
