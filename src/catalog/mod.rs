//! Tool catalog: record types, the JSON-backed store, and browse helpers.

pub mod browse;
pub mod store;
pub mod types;

pub use browse::{apply_filters, apply_sort, featured, trending, BrowseQuery, SortOrder};
pub use store::{parse_catalog, CatalogStore, JsonCatalog, StaticCatalog};
pub use types::{CatalogEntry, Category, PricingType, Tool};
