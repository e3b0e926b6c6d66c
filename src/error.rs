//! Errors raised while parsing or emitting TOML.

#[cfg(test)]
#[path = "./error_tests.rs"]
mod tests;

use std::fmt::{self, Display};

use crate::key::normalize_key;

/// Error raised in the parsing phase, carrying the 1-based line and 0-based
/// byte position of the offending input.
#[derive(Debug, Clone, PartialEq)]
pub struct Error {
    pub line: usize,
    pub pos: usize,
    pub kind: ErrorKind,
}

impl Error {
    pub(crate) fn invalid_utf8(input: &[u8], pos: usize) -> Error {
        let prefix = &input[..pos];
        let mut line = 1;
        let mut i = 0;
        while i < prefix.len() {
            match prefix[i] {
                b'\n' => line += 1,
                b'\r' => {
                    line += 1;
                    if prefix.get(i + 1) == Some(&b'\n') {
                        i += 1;
                    }
                }
                _ => {}
            }
            i += 1;
        }
        Error {
            line,
            pos,
            kind: ErrorKind::InvalidUtf8,
        }
    }
}

impl std::error::Error for Error {}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "toml: line {}, pos {}: {}", self.line, self.pos, self.kind)
    }
}

/// The reason a parse failed.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorKind {
    /// The input is not valid UTF-8.
    InvalidUtf8,

    /// One sort of token was wanted, another (or end of input) was found.
    Expected {
        /// Description of the expected token.
        expected: &'static str,
        /// The code point found, `None` at end of input.
        found: Option<char>,
    },

    /// End of input inside a string.
    UnterminatedString,

    /// A newline inside a single-line string.
    NewlineInString,

    /// A newline inside an inline table.
    NewlineInInlineTable,

    /// A `,` before any field of an inline table.
    UnexpectedComma,

    /// A `,` before any element of an array.
    MissingArrayElement,

    /// A `.` or `]` where a header name segment should start.
    EmptyTableName,

    /// An `=` with no key before it.
    EmptyKey,

    /// A second `.` in a float.
    DoubleDecimalPoint,

    /// A `\u`/`\U` escape that is not a Unicode scalar value.
    InvalidEscapeValue(u32),

    /// An integer with a leading zero.
    LeadingZero(String),

    /// An integer outside the signed 64-bit range.
    IntegerOverflow(String),

    /// A float that failed to parse or overflowed binary64.
    InvalidFloat(String),

    /// A date or date-time with invalid shape or out-of-range fields.
    InvalidDatetime(String),

    /// A key bound twice in the same table.
    DuplicateKey {
        /// Dotted path of the table, empty at the root.
        path: String,
        /// The duplicated key.
        key: String,
        /// Type name of the existing value.
        kind: &'static str,
    },

    /// An explicit table defined twice.
    DuplicateTable { path: String },

    /// A name reused with an incompatible meaning, e.g. a header path
    /// traversing a closed array or a non-table value.
    Redefined {
        path: String,
        /// Type name of the existing value.
        kind: &'static str,
    },

    /// An element whose type differs from the first element of its array.
    ArrayTypeMismatch {
        path: String,
        expected: &'static str,
        found: &'static str,
    },
}

struct Found(Option<char>);

impl Display for Found {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(c) => write!(f, "{:?}", c),
            None => f.write_str("EOF"),
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidUtf8 => f.write_str("invalid UTF-8"),
            Self::Expected { expected, found } => {
                write!(f, "expect {}, got {}", expected, Found(*found))
            }
            Self::UnterminatedString => f.write_str("string without ending"),
            Self::NewlineInString => f.write_str("newline is not allowed in oneline string"),
            Self::NewlineInInlineTable => {
                f.write_str("newlines are not allowed in inline table")
            }
            Self::UnexpectedComma => f.write_str("unexpected ',' in inline table"),
            Self::MissingArrayElement => f.write_str("no array element before separator"),
            Self::EmptyTableName => f.write_str("table name must be non-empty"),
            Self::EmptyKey => f.write_str("key must be non-empty"),
            Self::DoubleDecimalPoint => f.write_str("decimal point already read"),
            Self::InvalidEscapeValue(v) => {
                write!(f, "{:x} is not a valid unicode scalar value", v)
            }
            Self::LeadingZero(s) => write!(f, "leading zero in integer {:?}", s),
            Self::IntegerOverflow(s) => write!(f, "integer {} out of range", s),
            Self::InvalidFloat(s) => write!(f, "invalid float {:?}", s),
            Self::InvalidDatetime(s) => write!(f, "invalid datetime {:?}", s),
            Self::DuplicateKey { path, key, kind } => {
                if path.is_empty() {
                    write!(f, "root table has key {} defined as {}", normalize_key(key), kind)
                } else {
                    write!(
                        f,
                        "table {} has key {} defined as {}",
                        path,
                        normalize_key(key),
                        kind
                    )
                }
            }
            Self::DuplicateTable { path } => write!(f, "table {} was defined twice", path),
            Self::Redefined { path, kind } => write!(f, "{} was defined as {}", path, kind),
            Self::ArrayTypeMismatch {
                path,
                expected,
                found,
            } => write!(
                f,
                "array {} expects element type {}, but got {}",
                path, expected, found
            ),
        }
    }
}

/// Error raised in the emitting phase.
#[derive(Debug, Clone, PartialEq)]
pub enum EmitError {
    /// The same key was written twice into one table. The emitter tracks
    /// written keys per table; a tree built through the public API cannot
    /// trigger this, so it indicates a caller bug.
    DuplicateKey { path: String, key: String },

    /// A bracketed array holding elements of more than one type.
    MixedArray {
        expected: &'static str,
        found: &'static str,
    },

    /// A float with no TOML representation.
    NonFiniteFloat(f64),

    /// An element of an array-of-tables that is not a table.
    ExpectedTable {
        path: String,
        found: &'static str,
    },
}

impl std::error::Error for EmitError {}

impl Display for EmitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateKey { path, key } => {
                write!(f, "toml: key[{}] exists in table[{}]", normalize_key(key), path)
            }
            Self::MixedArray { expected, found } => write!(
                f,
                "toml: expect array of element type: {}, got: {}",
                expected, found
            ),
            Self::NonFiniteFloat(v) => write!(f, "toml: cannot emit non-finite float {}", v),
            Self::ExpectedTable { path, found } => {
                write!(f, "toml: cannot emit {} as table at {}", found, path)
            }
        }
    }
}

#[cfg(feature = "reporting")]
impl Error {
    /// Converts this [`Error`] into a [`codespan_reporting::diagnostic::Diagnostic`]
    /// pointing at the offending byte.
    pub fn to_diagnostic<FileId: Copy + PartialEq>(
        &self,
        fid: FileId,
    ) -> codespan_reporting::diagnostic::Diagnostic<FileId> {
        use codespan_reporting::diagnostic::{Diagnostic, Label};

        Diagnostic::error()
            .with_message(self.kind.to_string())
            .with_labels(vec![Label::primary(fid, self.pos..self.pos + 1)])
    }
}
