//! Convert text with ANSI SGR escape sequences into well nested HTML spans.
//!
//! ```
//! let html = aes2htm::convert_str("\x1b[1mbold\x1b[0m plain").unwrap();
//! assert_eq!(html, "<span style=\"font-weight:bold;\">bold</span> plain");
//! ```

pub mod converter;
pub mod document;
pub mod emitter;
pub mod error;
pub mod palette;
pub mod parser;
pub mod scanner;
pub mod styles;

pub use converter::{Converter, ConverterOptions, convert, convert_str};
pub use error::ConvertError;
pub use styles::{Color, StyleState};
