use serde::{Deserialize, Serialize};

/// 買家原始資料，對應 buyers.json 內的單筆物件
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Buyer {
    pub id: String,
    pub name: String,
    pub age: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuyersDocument {
    pub buyers: Vec<Buyer>,
}

/// Value side of the buyer lookup mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuyerDetail {
    pub name: String,
    pub age: i64,
}

/// 產品清單模式的單筆記錄（欄位名稱即匯出格式）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: String,
    pub product_name: String,
    pub product_price: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProductsDocument {
    pub products: Vec<Product>,
}

/// Value side of the product lookup mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub name: String,
    pub price: i64,
}

/// 交易日誌中解析出、尚未關聯的單筆交易
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEntry {
    pub transaction_id: String,
    pub buyer_id: String,
    pub ip: String,
    pub device: String,
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionProduct {
    pub id: String,
    pub name: String,
    pub price: i64,
}

/// Denormalized output record. Field order is the serialized order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    pub transaction_id: String,
    pub buyer_id: String,
    pub buyer_name: String,
    pub buyer_age: i64,
    pub products: Vec<TransactionProduct>,
    pub ip: String,
    pub device: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionsDocument {
    pub transactions: Vec<Transaction>,
}
