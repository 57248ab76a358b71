use buyers_etl::core::{ExportFormat, LookupStrategy, TransactionsDocument};
use buyers_etl::{
    CliConfig, EtlEngine, EtlError, LocalStorage, ProductExportPipeline, TransactionPipeline,
};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const BUYERS: &str = r#"{"buyers":[{"id":"b1","name":"Ann","age":30},{"id":"b2","name":"Bob","age":41}]}"#;
const PRODUCTS: &str = "product_id'product_name'product_price\n\"p1'Widget's Part'100\"\np2'Lamp'25\np3'Mug'7\n";

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn setup(transactions: &str) -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "processed/buyers.json", BUYERS);
    write(temp_dir.path(), "raw/products.csv", PRODUCTS);
    write(temp_dir.path(), "raw/transactions.csv", transactions);
    temp_dir
}

fn config_for(temp_dir: &TempDir, lookup: LookupStrategy) -> CliConfig {
    CliConfig {
        data_dir: temp_dir.path().to_str().unwrap().to_string(),
        lookup,
        ..CliConfig::default()
    }
}

fn run_join(temp_dir: &TempDir, lookup: LookupStrategy) -> buyers_etl::Result<String> {
    let config = config_for(temp_dir, lookup);
    let storage = LocalStorage::new(config.data_dir.clone());
    let engine = EtlEngine::new(TransactionPipeline::new(&storage, &config));
    engine.run()
}

fn output_file(temp_dir: &TempDir) -> std::path::PathBuf {
    temp_dir.path().join("processed/transactions-processed.json")
}

#[test]
fn test_end_to_end_single_transaction() {
    let temp_dir = setup("#t1_b1_1.2.3.4_mobile_(p1)");

    let output_path = run_join(&temp_dir, LookupStrategy::Reload).unwrap();
    assert_eq!(output_path, "processed/transactions-processed.json");

    let written = fs::read_to_string(output_file(&temp_dir)).unwrap();
    assert_eq!(
        written,
        r#"{"transactions":[{"transaction_id":"t1","buyer_id":"b1","buyer_name":"Ann","buyer_age":30,"products":[{"id":"p1","name":"Widgets Part","price":100}],"ip":"1.2.3.4","device":"mobile"}]}"#
    );
}

#[test]
fn test_products_keep_count_and_order() {
    let temp_dir = setup("#t1_b1_10.0.0.1_ios_(p3,p1,p3,p2)#t2_b2_10.0.0.2_web_(p2)");
    run_join(&temp_dir, LookupStrategy::Cached).unwrap();

    let written = fs::read_to_string(output_file(&temp_dir)).unwrap();
    let document: TransactionsDocument = serde_json::from_str(&written).unwrap();

    assert_eq!(document.transactions.len(), 2);
    let ids: Vec<&str> = document.transactions[0]
        .products
        .iter()
        .map(|p| p.id.as_str())
        .collect();
    assert_eq!(ids, vec!["p3", "p1", "p3", "p2"]);
    assert_eq!(document.transactions[1].buyer_name, "Bob");
    assert_eq!(document.transactions[1].buyer_age, 41);
    assert_eq!(document.transactions[1].products[0].price, 25);
}

#[test]
fn test_runs_are_byte_identical() {
    let temp_dir = setup("#t1_b1_1.2.3.4_mobile_(p1,p2)#t2_b2_5.6.7.8_web_(p3)");

    run_join(&temp_dir, LookupStrategy::Cached).unwrap();
    let first = fs::read(output_file(&temp_dir)).unwrap();
    run_join(&temp_dir, LookupStrategy::Cached).unwrap();
    let second = fs::read(output_file(&temp_dir)).unwrap();
    run_join(&temp_dir, LookupStrategy::Reload).unwrap();
    let reloaded = fs::read(output_file(&temp_dir)).unwrap();

    assert_eq!(first, second);
    assert_eq!(first, reloaded);
}

#[test]
fn test_unknown_product_writes_no_output() {
    let temp_dir = setup("#t1_b1_1.2.3.4_mobile_(p1)#t2_b1_1.2.3.4_mobile_(p404)");

    let err = run_join(&temp_dir, LookupStrategy::Reload).unwrap_err();
    assert!(matches!(err, EtlError::UnknownIdentifierError { ref id, .. } if id == "p404"));
    assert!(!output_file(&temp_dir).exists());
}

#[test]
fn test_non_numeric_price_writes_no_output() {
    let temp_dir = setup("#t1_b1_1.2.3.4_mobile_(p1)");
    write(
        temp_dir.path(),
        "raw/products.csv",
        "product_id'product_name'product_price\np1'Widget'100\np2'Lamp'cheap\n",
    );

    for lookup in [LookupStrategy::Reload, LookupStrategy::Cached] {
        let err = run_join(&temp_dir, lookup).unwrap_err();
        assert!(matches!(
            err,
            EtlError::InvalidPriceError { ref product_id, ref value } if product_id == "p2" && value == "cheap"
        ));
        assert!(!output_file(&temp_dir).exists());
    }
}

#[test]
fn test_failed_run_leaves_previous_output_untouched() {
    let temp_dir = setup("#t1_b9_1.2.3.4_mobile_(p1)");
    write(temp_dir.path(), "processed/transactions-processed.json", "stale");

    assert!(run_join(&temp_dir, LookupStrategy::Cached).is_err());
    assert_eq!(fs::read_to_string(output_file(&temp_dir)).unwrap(), "stale");
}

#[test]
fn test_malformed_entry_aborts() {
    let temp_dir = setup("#t1_b1_1.2.3.4_mobile_(p1)#t2_b1_mobile_(p1)");

    let err = run_join(&temp_dir, LookupStrategy::Cached).unwrap_err();
    assert!(matches!(
        err,
        EtlError::MalformedRecordError { position: 2, .. }
    ));
    assert!(!output_file(&temp_dir).exists());
}

#[test]
fn test_missing_products_file() {
    let temp_dir = setup("#t1_b1_1.2.3.4_mobile_(p1)");
    fs::remove_file(temp_dir.path().join("raw/products.csv")).unwrap();

    let err = run_join(&temp_dir, LookupStrategy::Reload).unwrap_err();
    assert!(matches!(err, EtlError::MissingFileError { .. }));
    assert_ne!(err.exit_code(), 0);
}

#[test]
fn test_product_export_json() {
    let temp_dir = setup("");
    let storage = LocalStorage::new(temp_dir.path().to_str().unwrap().to_string());

    let pipeline = ProductExportPipeline::new(
        &storage,
        "raw/products.csv",
        "files/products-processed-toObjectArray.json",
        ExportFormat::Json,
    );
    let output_path = EtlEngine::new(pipeline).run().unwrap();

    let written: serde_json::Value =
        serde_json::from_slice(&fs::read(storage.resolve(&output_path)).unwrap()).unwrap();
    let products = written["products"].as_array().unwrap();
    assert_eq!(products.len(), 3);
    assert_eq!(products[0]["product_name"], "Widgets Part");
    assert_eq!(products[2]["product_price"], 7);
}
