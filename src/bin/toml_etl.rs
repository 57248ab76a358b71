use anyhow::Context;
use buyers_etl::config::toml_config::TomlConfig;
use buyers_etl::core::ConfigProvider;
use buyers_etl::utils::error::EtlError;
use buyers_etl::utils::{logger, validation::Validate};
use buyers_etl::{EtlEngine, LocalStorage, ProductExportPipeline, TransactionPipeline};
use clap::Parser;

#[derive(Parser)]
#[command(name = "toml-etl")]
#[command(about = "Run the buyers/products/transactions join from a TOML configuration")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "etl-config.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override monitoring setting from config
    #[arg(long)]
    monitor: Option<bool>,

    /// Validate the configuration and show what would run, without executing
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = TomlConfig::from_file(&args.config)
        .with_context(|| format!("failed to load config file '{}'", args.config))?;

    if config.json_logs() {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting TOML-based ETL: {}", config.pipeline.name);
    tracing::info!("📁 Configuration loaded from: {}", args.config);

    if let Err(e) = config.validate() {
        fail(&e);
    }

    display_config_summary(&config);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No actual processing will occur");
        perform_dry_run(&config);
        return Ok(());
    }

    let monitor_enabled = args.monitor.unwrap_or_else(|| config.monitoring_enabled());
    let storage = LocalStorage::new(config.data_dir().to_string());

    let engine = EtlEngine::new_with_monitoring(
        TransactionPipeline::new(&storage, &config),
        monitor_enabled,
    );
    match engine.run() {
        Ok(output_path) => {
            println!("✅ Transactions written to: {}", storage.resolve(&output_path).display());
        }
        Err(e) => fail(&e),
    }

    if let Some((export_path, format)) = config.product_export() {
        let pipeline =
            ProductExportPipeline::new(&storage, config.products_path(), export_path, format);
        match EtlEngine::new_with_monitoring(pipeline, monitor_enabled).run() {
            Ok(output_path) => {
                println!("✅ Products written to: {}", storage.resolve(&output_path).display());
            }
            Err(e) => fail(&e),
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig) {
    tracing::info!("📋 Pipeline: {}", config.pipeline.name);
    if let Some(description) = &config.pipeline.description {
        tracing::info!("   {}", description);
    }
    tracing::info!("📂 Data directory: {}", config.data_dir());
    tracing::info!("   buyers: {}", config.buyers_path());
    tracing::info!("   products: {}", config.products_path());
    tracing::info!("   transactions: {}", config.transactions_path());
    tracing::info!("💾 Output: {}", config.output_path());
    tracing::info!("🔎 Lookup strategy: {}", config.lookup_strategy());
    if let Some((path, format)) = config.product_export() {
        tracing::info!("📦 Product export: {} ({})", path, format);
    }
}

fn perform_dry_run(config: &TomlConfig) {
    let storage = LocalStorage::new(config.data_dir().to_string());
    for (label, path) in [
        ("buyers", config.buyers_path()),
        ("products", config.products_path()),
        ("transactions", config.transactions_path()),
    ] {
        let full_path = storage.resolve(path);
        if full_path.exists() {
            tracing::info!("✅ {} source found: {}", label, full_path.display());
        } else {
            tracing::warn!("⚠️  {} source missing: {}", label, full_path.display());
        }
    }
    println!("Dry run complete, configuration is valid");
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
