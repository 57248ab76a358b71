use buyers_etl::app::loaders::{parse_products, products_to_map, repair_line};
use buyers_etl::EtlError;

#[test]
fn test_repair_is_noop_for_unquoted_lines() {
    let lines = [
        "p1'Lamp'25",
        "p2'Dog's bowl'12",
        "abc'def'ghi",
        "   padded'line'1   ",
    ];
    for line in lines {
        assert_eq!(repair_line(line), line);
    }
}

#[test]
fn test_quoted_names_split_into_three_fields() {
    let lines = [
        ("\"p1'Widget's Part'100\"", "Widgets Part"),
        ("\"p2'Children's Book'9\"", "Childrens Book"),
        ("\"p3'Plain Name'4\"", "Plain Name"),
    ];
    for (line, expected_name) in lines {
        let repaired = repair_line(line);
        let fields: Vec<&str> = repaired.split('\'').collect();
        assert_eq!(fields.len(), 3, "line: {line}");
        assert_eq!(fields[1], expected_name);
    }
}

#[test]
fn test_catalog_with_mixed_lines() {
    let catalog = "\
id'name'price
\"a1'Men's Shirt'35\"
b2'Table'150
\"c3'Tea Pot'20\"
";
    let products = parse_products(catalog).unwrap();
    let names: Vec<&str> = products.iter().map(|p| p.product_name.as_str()).collect();
    assert_eq!(names, vec!["Mens Shirt", "Table", "Tea Pot"]);

    let map = products_to_map(catalog).unwrap();
    assert_eq!(map["b2"].price, 150);
}

#[test]
fn test_header_only_catalog_is_empty() {
    assert!(parse_products("id'name'price\n").unwrap().is_empty());
    assert!(parse_products("").unwrap().is_empty());
}

#[test]
fn test_negative_and_padded_prices_parse() {
    let products = parse_products("h\np1'Refund'-5\np2'Gift' 3 \n").unwrap();
    assert_eq!(products[0].product_price, -5);
    assert_eq!(products[1].product_price, 3);
}

#[test]
fn test_decimal_price_is_rejected() {
    assert!(matches!(
        parse_products("h\np1'Lamp'2.50\n"),
        Err(EtlError::InvalidPriceError { .. })
    ));
}
