//! A TOML v0.4.0 parser and emitter.
//!
//! Parsing is a scanner-driven state machine that produces a validated tree
//! of TOML values; emitting is the reverse transform with stable ordering
//! and key-uniqueness guarantees. The crate deals in the value tree only;
//! binding the tree to application structs is left to callers.
//!
//! # Quick start
//!
//! Use [`parse`] with raw document bytes to get the root [`Table`]:
//! ```
//! # fn main() -> Result<(), toml_mill::Error> {
//! let root = toml_mill::parse(b"key = 'value'")?;
//! assert_eq!(root.get("key").and_then(|v| v.as_str()), Some("value"));
//! # Ok(())
//! # }
//! ```
//!
//! Values are navigated through `Option`-returning accessors, so missing
//! keys chain without panicking:
//! ```
//! # fn main() -> Result<(), toml_mill::Error> {
//! let root = toml_mill::parse(
//!     b"[[servers]]\nhost = 'alpha'\nport = 8001\n[[servers]]\nhost = 'beta'",
//! )?;
//! let first = root.get("servers").and_then(|v| v.at(0));
//! assert_eq!(first.and_then(|v| v.get("port")).and_then(|v| v.as_integer()), Some(8001));
//! assert_eq!(first.and_then(|v| v.get("user")), None);
//! # Ok(())
//! # }
//! ```
//!
//! [`emit`] serializes a tree back to a document. Keys are written in sorted
//! order, scalar fields before sub-tables, and the output ends with a
//! newline; parsing the emission yields a tree equal to the input:
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut root = toml_mill::Table::new();
//! root.insert("b", 1i64);
//! root.insert("a", 2i64);
//! let text = toml_mill::emit(&root, &toml_mill::EmitOptions::new())?;
//! assert_eq!(text, "a = 2\nb = 1\n");
//! assert_eq!(toml_mill::parse(text.as_bytes())?, root);
//! # Ok(())
//! # }
//! ```
//!
//! Emitter behavior is tuned per field through [`EmitOptions`] and [`Style`],
//! keyed by dotted path:
//! ```
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use toml_mill::{EmitOptions, Style, Table};
//!
//! let mut root = Table::new();
//! root.insert("password", "p@ss\\word");
//! let options = EmitOptions::new().field("password", Style::new().with_literal());
//! assert_eq!(toml_mill::emit(&root, &options)?, "password = 'p@ss\\word'\n");
//! # Ok(())
//! # }
//! ```

mod array;
mod builder;
mod emit;
mod error;
mod key;
mod options;
mod parser;
mod scanner;
mod table;
mod time;
mod value;

pub use array::Array;
pub use error::{EmitError, Error, ErrorKind};
pub use options::{EmitOptions, Style};
pub use table::Table;
pub use time::Datetime;
pub use value::Value;

/// Parses a TOML document into its root table.
///
/// The input must be valid UTF-8; anything else is a parse error carrying
/// the position of the offending byte, as is any lexical or structural
/// violation of the v0.4.0 grammar. The first error aborts the parse.
pub fn parse(input: &[u8]) -> Result<Table, Error> {
    match std::str::from_utf8(input) {
        Ok(text) => parser::parse_str(text),
        Err(e) => Err(Error::invalid_utf8(input, e.valid_up_to())),
    }
}

/// Parses a TOML document already known to be UTF-8.
pub fn parse_str(input: &str) -> Result<Table, Error> {
    parser::parse_str(input)
}

/// Serializes a value tree to a TOML document ending in a newline.
///
/// Map keys are emitted in ascending code-point order; booleans, numbers,
/// strings, datetimes, and bracketed arrays are written as `key = value`
/// lines, while sub-tables and open arrays-of-tables become `[path]` and
/// `[[path]]` sections after them. Given equal trees and options the output
/// is byte-identical.
pub fn emit(root: &Table, options: &EmitOptions) -> Result<String, EmitError> {
    emit::emit_document(root, options)
}
