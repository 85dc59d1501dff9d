//! Delimited text support.
//!
//! The reader streams a delimited file line by line and maps every line to an
//! item with serde. Columns are bound to item fields either through a header
//! line or through an explicit list of field names, the latter being the
//! usual setup for header-less files.
//!
//! # Example
//!
//! ```
//! use people_batch::item::csv::csv_reader::CsvItemReaderBuilder;
//! use people_batch::core::item::ItemReader;
//! use serde::Deserialize;
//!
//! #[derive(Debug, Deserialize, PartialEq)]
//! struct City {
//!     city: String,
//!     country: String,
//! }
//!
//! let reader = CsvItemReaderBuilder::<City>::new()
//!     .names(&["city", "country"])
//!     .from_bytes("Boston,United States\nConcord,United States\n");
//!
//! let mut cities = Vec::new();
//! while let Some(city) = reader.read().unwrap() {
//!     cities.push(city);
//! }
//!
//! assert_eq!(cities.len(), 2);
//! assert_eq!(cities[1].city, "Concord");
//! ```

/// A module providing facilities for reading CSV data records.
pub mod csv_reader;
