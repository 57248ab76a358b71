use crate::utils::error::{EtlError, Result};
use std::fmt;
use std::str::FromStr;

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;

    fn read_to_string(&self, path: &str) -> Result<String> {
        let bytes = self.read_file(path)?;
        String::from_utf8(bytes).map_err(|e| {
            EtlError::IoError(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("{}: {}", path, e),
            ))
        })
    }
}

impl<S: Storage + ?Sized> Storage for &S {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        (**self).read_file(path)
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        (**self).write_file(path, data)
    }
}

/// 查找表建立方式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LookupStrategy {
    /// 每次查找都重新讀取來源檔案
    Reload,
    /// 每次執行只建立一次查找表
    #[default]
    Cached,
}

impl LookupStrategy {
    pub const VALUES: [&'static str; 2] = ["reload", "cached"];

    pub fn as_str(&self) -> &'static str {
        match self {
            LookupStrategy::Reload => "reload",
            LookupStrategy::Cached => "cached",
        }
    }
}

impl fmt::Display for LookupStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LookupStrategy {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "reload" => Ok(LookupStrategy::Reload),
            "cached" => Ok(LookupStrategy::Cached),
            other => Err(format!(
                "unknown lookup strategy '{}', expected one of: {}",
                other,
                Self::VALUES.join(", ")
            )),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Csv,
}

impl ExportFormat {
    pub const VALUES: [&'static str; 2] = ["json", "csv"];

    pub fn as_str(&self) -> &'static str {
        match self {
            ExportFormat::Json => "json",
            ExportFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "json" => Ok(ExportFormat::Json),
            "csv" => Ok(ExportFormat::Csv),
            other => Err(format!(
                "unknown export format '{}', expected one of: {}",
                other,
                Self::VALUES.join(", ")
            )),
        }
    }
}

pub trait ConfigProvider {
    fn buyers_path(&self) -> &str;
    fn products_path(&self) -> &str;
    fn transactions_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn lookup_strategy(&self) -> LookupStrategy;
}

impl<C: ConfigProvider + ?Sized> ConfigProvider for &C {
    fn buyers_path(&self) -> &str {
        (**self).buyers_path()
    }

    fn products_path(&self) -> &str {
        (**self).products_path()
    }

    fn transactions_path(&self) -> &str {
        (**self).transactions_path()
    }

    fn output_path(&self) -> &str {
        (**self).output_path()
    }

    fn lookup_strategy(&self) -> LookupStrategy {
        (**self).lookup_strategy()
    }
}

/// Extract → transform → load, driven by [`crate::core::etl::EtlEngine`].
pub trait Pipeline {
    type Input;
    type Output;

    fn name(&self) -> &str;
    fn extract(&self) -> Result<Vec<Self::Input>>;
    fn transform(&self, data: Vec<Self::Input>) -> Result<Vec<Self::Output>>;
    fn load(&self, data: Vec<Self::Output>) -> Result<String>;
}
