//! xlsx2gor - Convert HTTP requests stored in a spreadsheet into a GOR replay file
//!
//! This crate reads one named column of a spreadsheet (the first sheet by default),
//! and writes every non-empty cell as a timestamped, identifier-tagged record in the
//! GOR format consumed by HTTP traffic-replay tools.
//!
//! # Output Format
//!
//! ```text
//! 1 <24-char-request-id> <unix-nanosecond-timestamp> 0
//! <http-request-text>
//!
//!
//! 🐵🙈🙉
//! ```
//!
//! # Quick Start
//!
//! ```rust,no_run
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Extract the default "http请求" column
//!     let count = xlsx2gor::extract("requests.xlsx", "requests.gor", xlsx2gor::DEFAULT_COLUMN)?;
//!     println!("wrote {} requests", count);
//!     Ok(())
//! }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use xlsx2gor::{ExtractorBuilder, RequestIdFormat, SeparatorPolicy, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let extractor = ExtractorBuilder::new()
//!         .with_column("request")
//!         .with_sheet_selector(SheetSelector::Index(1))
//!         .with_separator_policy(SeparatorPolicy::WrittenRecords)
//!         .with_request_id_format(RequestIdFormat::Simple)
//!         .build()?;
//!
//!     extractor.extract("requests.xlsx", "requests.gor")?;
//!     Ok(())
//! }
//! ```
//!
//! For in-memory conversion, use `Cursor`:
//!
//! ```rust,no_run
//! use std::io::Cursor;
//! use xlsx2gor::ExtractorBuilder;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let extractor = ExtractorBuilder::new().build()?;
//! let excel_data: Vec<u8> = vec![]; // Your spreadsheet bytes
//! let gor = extractor.extract_to_string(Cursor::new(excel_data))?;
//! # Ok(())
//! # }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod stamp;
mod types;

// 公開API
pub use api::{RequestIdFormat, SeparatorPolicy, SheetSelector};
pub use builder::{extract, Extractor, ExtractorBuilder, DEFAULT_COLUMN};
pub use error::ExcelToGorError;
pub use output::SEPARATOR;
pub use stamp::{RecordStamper, SystemStamper};
