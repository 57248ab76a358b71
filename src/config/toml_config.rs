use crate::config::{
    DEFAULT_BUYERS_PATH, DEFAULT_DATA_DIR, DEFAULT_OUTPUT_PATH, DEFAULT_PRODUCTS_PATH,
    DEFAULT_TRANSACTIONS_PATH,
};
use crate::core::{ConfigProvider, ExportFormat, LookupStrategy};
use crate::utils::error::{EtlError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub pipeline: PipelineConfig,
    #[serde(default)]
    pub sources: SourcesConfig,
    #[serde(default)]
    pub load: LoadConfig,
    pub lookup: Option<LookupConfig>,
    pub export: Option<ExportConfig>,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub name: String,
    pub description: Option<String>,
}

fn default_data_dir() -> String {
    DEFAULT_DATA_DIR.to_string()
}

fn default_buyers() -> String {
    DEFAULT_BUYERS_PATH.to_string()
}

fn default_products() -> String {
    DEFAULT_PRODUCTS_PATH.to_string()
}

fn default_transactions() -> String {
    DEFAULT_TRANSACTIONS_PATH.to_string()
}

fn default_output() -> String {
    DEFAULT_OUTPUT_PATH.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_buyers")]
    pub buyers: String,
    #[serde(default = "default_products")]
    pub products: String,
    #[serde(default = "default_transactions")]
    pub transactions: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            buyers: default_buyers(),
            products: default_products(),
            transactions: default_transactions(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoadConfig {
    #[serde(default = "default_output")]
    pub output: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            output: default_output(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupConfig {
    pub strategy: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportConfig {
    pub enabled: bool,
    pub products_path: Option<String>,
    pub format: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub log_format: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(EtlError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| EtlError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${DATA_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| EtlError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validation::validate_non_empty_string("pipeline.name", &self.pipeline.name)?;

        validation::validate_path("sources.data_dir", &self.sources.data_dir)?;
        validation::validate_path("sources.buyers", &self.sources.buyers)?;
        validation::validate_path("sources.products", &self.sources.products)?;
        validation::validate_path("sources.transactions", &self.sources.transactions)?;
        validation::validate_path("load.output", &self.load.output)?;

        if let Some(lookup) = &self.lookup {
            validation::validate_one_of("lookup.strategy", &lookup.strategy, &LookupStrategy::VALUES)?;
        }

        if let Some(export) = self.export.as_ref().filter(|e| e.enabled) {
            let path = validation::validate_required_field("export.products_path", &export.products_path)?;
            validation::validate_path("export.products_path", path)?;

            let format = export.format.as_deref().unwrap_or("json");
            validation::validate_one_of("export.format", format, &ExportFormat::VALUES)?;
            validation::validate_file_extension("export.products_path", path, &[format])?;
        }

        if let Some(log_format) = self.monitoring.as_ref().and_then(|m| m.log_format.as_deref()) {
            validation::validate_one_of("monitoring.log_format", log_format, &["compact", "json"])?;
        }

        Ok(())
    }

    pub fn data_dir(&self) -> &str {
        &self.sources.data_dir
    }

    /// 產品匯出設定：(路徑, 格式)，未啟用或未指定路徑時為 None
    pub fn product_export(&self) -> Option<(String, ExportFormat)> {
        let export = self.export.as_ref().filter(|e| e.enabled)?;
        let path = export.products_path.clone()?;
        let format = export
            .format
            .as_deref()
            .and_then(|f| f.parse().ok())
            .unwrap_or_default();
        Some((path, format))
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }

    pub fn json_logs(&self) -> bool {
        self.monitoring
            .as_ref()
            .and_then(|m| m.log_format.as_deref())
            == Some("json")
    }
}

impl ConfigProvider for TomlConfig {
    fn buyers_path(&self) -> &str {
        &self.sources.buyers
    }

    fn products_path(&self) -> &str {
        &self.sources.products
    }

    fn transactions_path(&self) -> &str {
        &self.sources.transactions
    }

    fn output_path(&self) -> &str {
        &self.load.output
    }

    fn lookup_strategy(&self) -> LookupStrategy {
        self.lookup
            .as_ref()
            .and_then(|l| l.strategy.parse().ok())
            .unwrap_or_default()
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
