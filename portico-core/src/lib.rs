pub mod config;
pub mod document;
pub mod domain;
pub mod error;
pub mod matching;
pub mod plugin;
pub mod plugin_service;
pub mod record;
pub mod request;
pub mod route;
pub mod validation;

pub use config::PorticoConfig;
pub use document::ConfigDocument;
pub use domain::{Domain, DomainView};
pub use error::{PorticoError, Result};
pub use matching::matches_by_substring;
pub use plugin::Plugin;
pub use plugin_service::PluginService;
pub use record::{Record, RecordMeta};
pub use route::{Route, RouteView};
