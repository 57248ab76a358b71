pub mod cli;
pub mod toml_config;

#[cfg(feature = "cli")]
use crate::core::{ConfigProvider, ExportFormat, LookupStrategy};
#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::Parser;

// 預設路徑皆相對於資料目錄
pub const DEFAULT_DATA_DIR: &str = ".";
pub const DEFAULT_BUYERS_PATH: &str = "processed/buyers.json";
pub const DEFAULT_PRODUCTS_PATH: &str = "raw/products.csv";
pub const DEFAULT_TRANSACTIONS_PATH: &str = "raw/transactions.csv";
pub const DEFAULT_OUTPUT_PATH: &str = "processed/transactions-processed.json";
pub const DEFAULT_PRODUCTS_EXPORT_PATH: &str = "files/products-processed-toObjectArray.json";

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "buyers-etl")]
#[command(about = "Join buyers, products and transactions into one denormalized document")]
pub struct CliConfig {
    /// Directory every other path is resolved against
    #[arg(long, default_value = DEFAULT_DATA_DIR)]
    pub data_dir: String,

    #[arg(long, default_value = DEFAULT_BUYERS_PATH)]
    pub buyers: String,

    #[arg(long, default_value = DEFAULT_PRODUCTS_PATH)]
    pub products: String,

    #[arg(long, default_value = DEFAULT_TRANSACTIONS_PATH)]
    pub transactions: String,

    #[arg(long, default_value = DEFAULT_OUTPUT_PATH)]
    pub output: String,

    /// reload: re-read sources on every lookup, cached: build each lookup table once
    #[arg(long, default_value = "cached")]
    pub lookup: LookupStrategy,

    /// Also export the product catalog as a flat list (default path when no value is given)
    #[arg(long, num_args = 0..=1, default_missing_value = DEFAULT_PRODUCTS_EXPORT_PATH)]
    pub export_products: Option<String>,

    #[arg(long, default_value = "json")]
    pub export_format: ExportFormat,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Enable system monitoring")]
    pub monitor: bool,
}

#[cfg(feature = "cli")]
impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: DEFAULT_DATA_DIR.to_string(),
            buyers: DEFAULT_BUYERS_PATH.to_string(),
            products: DEFAULT_PRODUCTS_PATH.to_string(),
            transactions: DEFAULT_TRANSACTIONS_PATH.to_string(),
            output: DEFAULT_OUTPUT_PATH.to_string(),
            lookup: LookupStrategy::default(),
            export_products: None,
            export_format: ExportFormat::default(),
            verbose: false,
            monitor: false,
        }
    }
}

#[cfg(feature = "cli")]
impl ConfigProvider for CliConfig {
    fn buyers_path(&self) -> &str {
        &self.buyers
    }

    fn products_path(&self) -> &str {
        &self.products
    }

    fn transactions_path(&self) -> &str {
        &self.transactions
    }

    fn output_path(&self) -> &str {
        &self.output
    }

    fn lookup_strategy(&self) -> LookupStrategy {
        self.lookup
    }
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("data_dir", &self.data_dir)?;
        validation::validate_path("buyers", &self.buyers)?;
        validation::validate_path("products", &self.products)?;
        validation::validate_path("transactions", &self.transactions)?;
        validation::validate_path("output", &self.output)?;

        if let Some(export_path) = &self.export_products {
            validation::validate_path("export_products", export_path)?;
            validation::validate_file_extension(
                "export_products",
                export_path,
                &[self.export_format.as_str()],
            )?;
        }

        Ok(())
    }
}
