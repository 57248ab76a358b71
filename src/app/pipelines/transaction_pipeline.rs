use crate::app::loaders::{BuyerSource, ProductSource};
use crate::core::{
    BuyerDetail, ConfigProvider, LookupStrategy, Pipeline, ProductDetail, Storage, Transaction,
    TransactionEntry, TransactionProduct, TransactionsDocument,
};
use crate::utils::error::{EntityKind, EtlError, Result};
use std::collections::HashMap;

const SOURCE_NAME: &str = "transactions";
const ENTRY_DELIMITER: char = '#';
const FIELD_DELIMITER: char = '_';
const FIELD_COUNT: usize = 5;

/// 解析單筆交易：`transaction_id_buyer_id_ip_device_(p1,p2,...)`
///
/// `position` is the chunk index after splitting on `#`, used for error reporting.
pub fn parse_transaction_entry(chunk: &str, position: usize) -> Result<TransactionEntry> {
    let fields: Vec<&str> = chunk.trim().split(FIELD_DELIMITER).collect();

    if fields.len() != FIELD_COUNT {
        return Err(EtlError::MalformedRecordError {
            source_name: SOURCE_NAME.to_string(),
            position,
            reason: format!(
                "expected {} '{}'-separated fields, found {}",
                FIELD_COUNT,
                FIELD_DELIMITER,
                fields.len()
            ),
        });
    }

    let product_ids = fields[4]
        .replace(['(', ')'], "")
        .split(',')
        .map(str::to_string)
        .collect();

    Ok(TransactionEntry {
        transaction_id: fields[0].to_string(),
        buyer_id: fields[1].to_string(),
        ip: fields[2].to_string(),
        device: fields[3].to_string(),
        product_ids,
    })
}

/// 以 `#` 切分交易日誌，第一段（index 0）為空白/標題，略過
pub fn parse_transactions(text: &str) -> Result<Vec<TransactionEntry>> {
    text.split(ENTRY_DELIMITER)
        .enumerate()
        .skip(1)
        .map(|(position, chunk)| parse_transaction_entry(chunk, position))
        .collect()
}

/// Builds the denormalized record for one entry. Product order and
/// duplicates follow `entry.product_ids`.
pub fn join_entry<FB, FP>(
    entry: TransactionEntry,
    mut buyer_lookup: FB,
    mut product_lookup: FP,
) -> Result<Transaction>
where
    FB: FnMut(&str) -> Result<BuyerDetail>,
    FP: FnMut(&str) -> Result<ProductDetail>,
{
    let buyer = buyer_lookup(&entry.buyer_id)?;

    let mut products = Vec::with_capacity(entry.product_ids.len());
    for product_id in entry.product_ids {
        let detail = product_lookup(&product_id)?;
        products.push(TransactionProduct {
            id: product_id,
            name: detail.name,
            price: detail.price,
        });
    }

    Ok(Transaction {
        transaction_id: entry.transaction_id,
        buyer_id: entry.buyer_id,
        buyer_name: buyer.name,
        buyer_age: buyer.age,
        products,
        ip: entry.ip,
        device: entry.device,
    })
}

fn cached_get<V: Clone>(
    cache: &mut Option<HashMap<String, V>>,
    load: impl FnOnce() -> Result<HashMap<String, V>>,
    kind: EntityKind,
    id: &str,
) -> Result<V> {
    if cache.is_none() {
        *cache = Some(load()?);
    }

    cache
        .as_ref()
        .and_then(|map| map.get(id))
        .cloned()
        .ok_or_else(|| EtlError::UnknownIdentifierError {
            kind,
            id: id.to_string(),
        })
}

/// 交易關聯管道：讀取交易日誌，關聯買家與產品後輸出單一 JSON 文件
pub struct TransactionPipeline<S: Storage, C: ConfigProvider> {
    storage: S,
    config: C,
}

impl<S: Storage, C: ConfigProvider> TransactionPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn join_reloading(&self, entries: Vec<TransactionEntry>) -> Result<Vec<Transaction>> {
        let buyers = BuyerSource::new(&self.storage, self.config.buyers_path());
        let products = ProductSource::new(&self.storage, self.config.products_path());

        entries
            .into_iter()
            .map(|entry| {
                tracing::debug!("Joining transaction {}", entry.transaction_id);
                join_entry(entry, |id| buyers.lookup(id), |id| products.lookup(id))
            })
            .collect()
    }

    fn join_cached(&self, entries: Vec<TransactionEntry>) -> Result<Vec<Transaction>> {
        let buyers = BuyerSource::new(&self.storage, self.config.buyers_path());
        let products = ProductSource::new(&self.storage, self.config.products_path());

        // 第一次查找時才載入，沒有交易就不讀來源檔
        let mut buyer_cache = None;
        let mut product_cache = None;

        let mut transactions = Vec::with_capacity(entries.len());
        for entry in entries {
            tracing::debug!("Joining transaction {}", entry.transaction_id);
            let transaction = join_entry(
                entry,
                |id| cached_get(&mut buyer_cache, || buyers.load(), EntityKind::Buyer, id),
                |id| cached_get(&mut product_cache, || products.load_map(), EntityKind::Product, id),
            )?;
            transactions.push(transaction);
        }
        Ok(transactions)
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for TransactionPipeline<S, C> {
    type Input = TransactionEntry;
    type Output = Transaction;

    fn name(&self) -> &str {
        "transactions"
    }

    fn extract(&self) -> Result<Vec<TransactionEntry>> {
        tracing::info!(
            "📥 Reading transactions from: {}",
            self.config.transactions_path()
        );
        let text = self.storage.read_to_string(self.config.transactions_path())?;
        let entries = parse_transactions(&text)?;
        tracing::info!("📊 Parsed {} transaction entries", entries.len());
        Ok(entries)
    }

    fn transform(&self, data: Vec<TransactionEntry>) -> Result<Vec<Transaction>> {
        let strategy = self.config.lookup_strategy();
        tracing::info!(
            "🔧 Joining {} entries with buyers ({}) and products ({}), lookup: {}",
            data.len(),
            self.config.buyers_path(),
            self.config.products_path(),
            strategy
        );

        let transactions = match strategy {
            LookupStrategy::Reload => self.join_reloading(data)?,
            LookupStrategy::Cached => self.join_cached(data)?,
        };

        tracing::info!("✅ Joined {} transactions", transactions.len());
        Ok(transactions)
    }

    fn load(&self, data: Vec<Transaction>) -> Result<String> {
        let output_path = self.config.output_path();
        let document = TransactionsDocument { transactions: data };
        let json = serde_json::to_vec(&document)?;

        self.storage.write_file(output_path, &json)?;
        tracing::info!(
            "💾 Wrote {} transactions ({} bytes) to {}",
            document.transactions.len(),
            json.len(),
            output_path
        );
        Ok(output_path.to_string())
    }
}
