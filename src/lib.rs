pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod data;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::SiteConfig;
pub use crate::core::{ChatSession, Portfolio};
pub use data::ContentStore;
pub use utils::error::{PortfolioError, Result};
