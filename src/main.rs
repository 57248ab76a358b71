use buyers_etl::core::{ConfigProvider, ExportFormat};
use buyers_etl::utils::error::EtlError;
use buyers_etl::utils::{logger, validation::Validate};
use buyers_etl::{CliConfig, EtlEngine, LocalStorage, ProductExportPipeline, TransactionPipeline};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting buyers-etl");
    tracing::debug!("CLI config: {:?}", config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    if config.monitor {
        tracing::info!("🔍 System monitoring enabled");
    }

    let storage = LocalStorage::new(config.data_dir.clone());

    let export = config
        .export_products
        .clone()
        .map(|path| (config.products_path().to_string(), path, config.export_format));

    let engine = EtlEngine::new_with_monitoring(
        TransactionPipeline::new(&storage, &config),
        config.monitor,
    );
    match engine.run() {
        Ok(output_path) => report_success("Transactions", &storage, &output_path),
        Err(e) => fail(&e),
    }

    if let Some((products_path, export_path, format)) = export {
        run_product_export(&storage, products_path, export_path, format, config.monitor);
    }

    Ok(())
}

fn run_product_export(
    storage: &LocalStorage,
    products_path: String,
    export_path: String,
    format: ExportFormat,
    monitor: bool,
) {
    let pipeline = ProductExportPipeline::new(storage, products_path, export_path, format);
    match EtlEngine::new_with_monitoring(pipeline, monitor).run() {
        Ok(output_path) => report_success("Products", storage, &output_path),
        Err(e) => fail(&e),
    }
}

fn report_success(label: &str, storage: &LocalStorage, output_path: &str) {
    let full_path = storage.resolve(output_path);
    tracing::info!("✅ {} written to: {}", label, full_path.display());
    println!("✅ {} written to: {}", label, full_path.display());
}

fn fail(e: &EtlError) -> ! {
    tracing::error!(
        "❌ ETL process failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());

    std::process::exit(e.exit_code().max(1));
}
