//! Data module - CSV loading, schema mapping, filtering

mod cache;
mod filter;
mod loader;
mod schema;
mod table;

pub use cache::{ContentDigest, TableCache};
pub use filter::FilterCriteria;
pub use loader::{DataLoadError, DataLoader};
pub use schema::CsvSchema;
pub use table::{SalesRecord, SalesTable};
