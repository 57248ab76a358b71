use crate::core::{Product, ProductDetail, Storage};
use crate::utils::error::{EntityKind, EtlError, Result};
use std::collections::HashMap;

const SOURCE_NAME: &str = "products";

fn is_lowercase_letter(c: Option<&char>) -> bool {
    c.is_some_and(|c| c.is_alphabetic() && c.is_lowercase())
}

/// 修正產品名稱中多餘的引號
///
/// If the line contains a double quote, every double quote is dropped and
/// every apostrophe sitting between two lowercase letters is dropped too
/// (`"p1'Widget's Part'100"` becomes `p1'Widgets Part'100`). Lines without a
/// double quote come back unchanged.
///
/// Assumes at most one lowercase-flanked apostrophe inside a quoted name.
/// Names such as `O'Neil` or `rock'n'roll` are not recovered.
pub fn repair_line(line: &str) -> String {
    if !line.contains('"') {
        return line.to_string();
    }

    let chars: Vec<char> = line.chars().filter(|c| *c != '"').collect();
    chars
        .iter()
        .enumerate()
        .filter(|&(idx, c)| {
            let embedded = *c == '\''
                && idx > 0
                && is_lowercase_letter(chars.get(idx - 1))
                && is_lowercase_letter(chars.get(idx + 1));
            !embedded
        })
        .map(|(_, c)| *c)
        .collect()
}

/// Parses one catalog line into `product_id'product_name'product_price`.
/// `line_no` is 1-based and only used for error reporting.
pub fn parse_product_line(line: &str, line_no: usize) -> Result<Product> {
    let repaired = repair_line(line);
    let fields: Vec<&str> = repaired.trim().split('\'').collect();

    if fields.len() != 3 {
        return Err(EtlError::MalformedRecordError {
            source_name: SOURCE_NAME.to_string(),
            position: line_no,
            reason: format!("expected 3 apostrophe-separated fields, found {}", fields.len()),
        });
    }

    let product_id = fields[0].to_string();
    let product_price = fields[2]
        .trim()
        .parse::<i64>()
        .map_err(|_| EtlError::InvalidPriceError {
            product_id: product_id.clone(),
            value: fields[2].to_string(),
        })?;

    Ok(Product {
        product_id,
        product_name: fields[1].to_string(),
        product_price,
    })
}

/// 清單模式：略過標題列，依序解析每一行
pub fn parse_products(text: &str) -> Result<Vec<Product>> {
    let mut products = Vec::new();

    for (idx, line) in text.lines().enumerate().skip(1) {
        products.push(parse_product_line(line, idx + 1)?);
    }

    Ok(products)
}

/// 查找模式：product_id → {name, price}，重複 id 以後者為準
pub fn products_to_map(text: &str) -> Result<HashMap<String, ProductDetail>> {
    let products = parse_products(text)?;

    let mut map = HashMap::with_capacity(products.len());
    for product in products {
        map.insert(
            product.product_id,
            ProductDetail {
                name: product.product_name,
                price: product.product_price,
            },
        );
    }
    Ok(map)
}

pub struct ProductSource<S: Storage> {
    storage: S,
    path: String,
}

impl<S: Storage> ProductSource<S> {
    pub fn new(storage: S, path: impl Into<String>) -> Self {
        Self {
            storage,
            path: path.into(),
        }
    }

    pub fn load_list(&self) -> Result<Vec<Product>> {
        let text = self.storage.read_to_string(&self.path)?;
        parse_products(&text)
    }

    pub fn load_map(&self) -> Result<HashMap<String, ProductDetail>> {
        let text = self.storage.read_to_string(&self.path)?;
        let products = products_to_map(&text)?;
        tracing::debug!("Loaded {} products from {}", products.len(), self.path);
        Ok(products)
    }

    /// Reloads the whole catalog and returns the entry for `product_id`.
    pub fn lookup(&self, product_id: &str) -> Result<ProductDetail> {
        let mut products = self.load_map()?;
        products
            .remove(product_id)
            .ok_or_else(|| EtlError::UnknownIdentifierError {
                kind: EntityKind::Product,
                id: product_id.to_string(),
            })
    }
}
