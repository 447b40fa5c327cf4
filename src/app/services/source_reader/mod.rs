//! Tabular source reader for wide-format time-series files
//!
//! Decodes delimited text into a header plus a lazy sequence of rows, each
//! addressable by column name. The header is mandatory; everything after it
//! is read row by row so a single bad record never aborts the sequence.
//!
//! ## Architecture
//!
//! - [`column_index`] - Header analysis and name-to-position lookups
//! - [`reader`] - CSV decoding and the lazy row iterator
//! - [`row`] - Typed access to the fields of a single row
//!
//! ## Usage
//!
//! ```rust
//! use covid_timeseries::app::services::source_reader::SourceReader;
//!
//! # fn example() -> covid_timeseries::Result<()> {
//! let text = "Province/State,Country/Region,Lat,Long,3/9/23\n,France,46.2,2.2,38618509\n";
//! let reader = SourceReader::from_text("confirmed", text)?;
//! for row in reader {
//!     let row = row?;
//!     assert_eq!(row.get("Country/Region")?, "France");
//!     assert_eq!(row.parse_count("3/9/23"), Some(38618509));
//! }
//! # Ok(())
//! # }
//! ```

pub mod column_index;
pub mod reader;
pub mod row;

#[cfg(test)]
pub mod tests;

pub use column_index::ColumnIndex;
pub use reader::SourceReader;
pub use row::{SourceRow, parse_count};
