use crate::app::loaders::ProductSource;
use crate::core::{ExportFormat, Pipeline, Product, ProductsDocument, Storage};
use crate::utils::error::{EtlError, Result};

/// 產品清單匯出：將產品目錄轉成扁平清單（JSON 或 CSV）
pub struct ProductExportPipeline<S: Storage> {
    storage: S,
    products_path: String,
    export_path: String,
    format: ExportFormat,
}

impl<S: Storage> ProductExportPipeline<S> {
    pub fn new(
        storage: S,
        products_path: impl Into<String>,
        export_path: impl Into<String>,
        format: ExportFormat,
    ) -> Self {
        Self {
            storage,
            products_path: products_path.into(),
            export_path: export_path.into(),
            format,
        }
    }

    fn render(&self, products: Vec<Product>) -> Result<Vec<u8>> {
        match self.format {
            ExportFormat::Json => Ok(serde_json::to_vec(&ProductsDocument { products })?),
            ExportFormat::Csv => {
                let mut writer = csv::Writer::from_writer(Vec::new());
                for product in &products {
                    writer.serialize(product)?;
                }
                writer
                    .into_inner()
                    .map_err(|e| EtlError::IoError(e.into_error()))
            }
        }
    }
}

impl<S: Storage> Pipeline for ProductExportPipeline<S> {
    type Input = Product;
    type Output = Product;

    fn name(&self) -> &str {
        "product-export"
    }

    fn extract(&self) -> Result<Vec<Product>> {
        tracing::info!("📥 Reading product catalog from: {}", self.products_path);
        ProductSource::new(&self.storage, self.products_path.as_str()).load_list()
    }

    fn transform(&self, data: Vec<Product>) -> Result<Vec<Product>> {
        // 清單模式不需額外轉換，修正已在解析時完成
        Ok(data)
    }

    fn load(&self, data: Vec<Product>) -> Result<String> {
        let count = data.len();
        let bytes = self.render(data)?;
        self.storage.write_file(&self.export_path, &bytes)?;

        tracing::info!(
            "💾 Exported {} products as {} to {}",
            count,
            self.format,
            self.export_path
        );
        Ok(self.export_path.clone())
    }
}
