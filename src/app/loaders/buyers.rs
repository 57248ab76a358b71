use crate::core::{BuyerDetail, BuyersDocument, Storage};
use crate::utils::error::{EntityKind, EtlError, Result};
use std::collections::HashMap;

/// 將 buyers.json 解析為 buyer_id → {name, age} 查找表
///
/// 重複的 id 以後出現者為準。
pub fn load_buyers(bytes: &[u8]) -> Result<HashMap<String, BuyerDetail>> {
    let document: BuyersDocument = serde_json::from_slice(bytes)?;

    let mut buyers = HashMap::with_capacity(document.buyers.len());
    for buyer in document.buyers {
        buyers.insert(
            buyer.id,
            BuyerDetail {
                name: buyer.name,
                age: buyer.age,
            },
        );
    }
    Ok(buyers)
}

pub struct BuyerSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> BuyerSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn load(&self) -> Result<HashMap<String, BuyerDetail>> {
        let bytes = self.storage.read_file(&self.path)?;
        let buyers = load_buyers(&bytes)?;
        tracing::debug!("Loaded {} buyers from {}", buyers.len(), self.path);
        Ok(buyers)
    }

    /// Reloads the whole buyer file and returns the entry for `buyer_id`.
    pub fn lookup(&self, buyer_id: &str) -> Result<BuyerDetail> {
        let mut buyers = self.load()?;
        buyers
            .remove(buyer_id)
            .ok_or_else(|| EtlError::UnknownIdentifierError {
                kind: EntityKind::Buyer,
                id: buyer_id.to_string(),
            })
    }
}
