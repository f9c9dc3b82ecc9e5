//! Fetch a web page and turn one of its HTML tables into typed rows.
//!
//! ```no_run
//! # async fn demo() -> Result<(), pagetable::ExtractError> {
//! let table = pagetable::extract(
//!     "https://www.worldometers.info/world-population/population-by-country",
//!     "example2",
//! )
//! .await?;
//! println!("{} rows x {} columns", table.len(), table.width());
//! # Ok(()) }
//! ```

pub mod acquisition;
pub mod cli;
pub mod config;
pub mod error;
pub mod extraction;
pub mod extractor;
pub mod table;

pub use config::{ExtractConfig, StatusPolicy, DEFAULT_TABLE_ID, DEFAULT_URL};
pub use error::ExtractError;
pub use extraction::parse_table;
pub use extractor::{extract, extract_with, PageTableExtractor};
pub use table::{CellValue, Row, Table};
