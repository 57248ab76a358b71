//! Source loaders. Each one reads its file through [`crate::core::Storage`]
//! and builds either a lookup mapping or a flat list.

pub mod buyers;
pub mod products;

pub use buyers::{load_buyers, BuyerSource};
pub use products::{parse_product_line, parse_products, products_to_map, repair_line, ProductSource};
