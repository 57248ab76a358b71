pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(test)]
pub(crate) mod test_support;

pub use app::pipelines::{ProductExportPipeline, TransactionPipeline};
pub use config::cli::LocalStorage;
#[cfg(feature = "cli")]
pub use config::CliConfig;
pub use config::toml_config::TomlConfig;

pub use crate::core::etl::EtlEngine;
pub use utils::error::{EtlError, Result};
