pub mod etl;

pub use crate::domain::model::{
    Buyer, BuyerDetail, BuyersDocument, Product, ProductDetail, ProductsDocument, Transaction,
    TransactionEntry, TransactionProduct, TransactionsDocument,
};
pub use crate::domain::ports::{ConfigProvider, ExportFormat, LookupStrategy, Pipeline, Storage};
pub use crate::utils::error::Result;
