pub mod product_export_pipeline;
pub mod transaction_pipeline;

pub use product_export_pipeline::ProductExportPipeline;
pub use transaction_pipeline::{parse_transactions, TransactionPipeline};
