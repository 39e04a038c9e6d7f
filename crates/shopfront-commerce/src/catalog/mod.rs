//! Product catalog module.
//!
//! Contains the static catalog, its products and category pages.

mod category;
mod product;
mod store;

pub use category::Category;
pub use product::Product;
pub use store::Catalog;
