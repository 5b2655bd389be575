//! Catalog data and the filter pipeline.
//!
//! - [`Catalog`]: the immutable, externally supplied list of categories
//! - [`FilterSelection`]: multi-select category filters with the `"All"` sentinel
//! - [`SearchQuery`]: case-insensitive title/author search
//! - [`filter_catalog`]: category stage, flatten, then search
//! - [`Technology`]: badge icon and color per category

mod filter;
mod selection;
mod technology;
mod types;

pub use filter::{MatchedItem, SearchQuery, filter_catalog};
pub use selection::{ALL_TOPICS, FilterSelection};
pub use technology::Technology;
pub use types::{Catalog, CatalogError, Category, Item};
