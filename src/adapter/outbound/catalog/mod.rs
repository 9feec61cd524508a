//! Item catalog adapters.
//!
//! [`InMemoryCatalog`] holds the items; [`FileCatalog`] layers a JSON file
//! over it so items recorded by one run are drawn by the next.

mod file;
mod memory;

pub use file::FileCatalog;
pub use memory::{CatalogItem, InMemoryCatalog, Merge};
