pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::http::build_router;
pub use adapters::memory::InMemoryStore;
pub use adapters::storage::LocalStorage;
pub use config::toml_config::CatalogueConfig;
pub use crate::core::{catalogue::CatalogueService, query::SearchParams, validator::TagCountPolicy};
pub use utils::error::{CatalogueError, Result};
