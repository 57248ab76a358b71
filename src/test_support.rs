use crate::core::{ConfigProvider, LookupStrategy, Storage};
use crate::utils::error::{EtlError, Result};
use std::cell::RefCell;
use std::collections::HashMap;

/// In-memory storage that counts reads per path.
#[derive(Default)]
pub struct MockStorage {
    files: RefCell<HashMap<String, Vec<u8>>>,
    reads: RefCell<HashMap<String, usize>>,
}

impl MockStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(self, path: &str, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.to_string(), content.as_bytes().to_vec());
        self
    }

    pub fn get_file(&self, path: &str) -> Option<Vec<u8>> {
        self.files.borrow().get(path).cloned()
    }

    pub fn read_count(&self, path: &str) -> usize {
        self.reads.borrow().get(path).copied().unwrap_or(0)
    }
}

impl Storage for MockStorage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        *self.reads.borrow_mut().entry(path.to_string()).or_insert(0) += 1;
        self.files
            .borrow()
            .get(path)
            .cloned()
            .ok_or_else(|| EtlError::MissingFileError {
                path: path.to_string(),
            })
    }

    fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        self.files
            .borrow_mut()
            .insert(path.to_string(), data.to_vec());
        Ok(())
    }
}

pub struct MockConfig {
    lookup: LookupStrategy,
}

impl MockConfig {
    pub fn new(lookup: LookupStrategy) -> Self {
        Self { lookup }
    }
}

impl ConfigProvider for MockConfig {
    fn buyers_path(&self) -> &str {
        "processed/buyers.json"
    }

    fn products_path(&self) -> &str {
        "raw/products.csv"
    }

    fn transactions_path(&self) -> &str {
        "raw/transactions.csv"
    }

    fn output_path(&self) -> &str {
        "processed/transactions-processed.json"
    }

    fn lookup_strategy(&self) -> LookupStrategy {
        self.lookup
    }
}
