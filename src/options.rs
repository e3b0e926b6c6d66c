//! Per-field emitter options, declared by callers against dotted paths.

use foldhash::HashMap;

/// Options for one emitted field.
///
/// `literal`, `multiline`, and `ascii` pick the lexical form of strings;
/// `string` quotes a non-string scalar; `datetime` emits a string that parses
/// as RFC 3339 as a bare datetime token; `inline` forces a table (or an
/// array-of-tables) to inline form; `omitempty` skips the field when its
/// value is empty. Options set on an array field are inherited by its
/// elements.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Style {
    pub literal: bool,
    pub multiline: bool,
    pub ascii: bool,
    pub string: bool,
    pub datetime: bool,
    pub inline: bool,
    pub omitempty: bool,
}

impl Style {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_literal(mut self) -> Self {
        self.literal = true;
        self
    }

    pub fn with_multiline(mut self) -> Self {
        self.multiline = true;
        self
    }

    pub fn with_ascii(mut self) -> Self {
        self.ascii = true;
        self
    }

    pub fn with_string(mut self) -> Self {
        self.string = true;
        self
    }

    pub fn with_datetime(mut self) -> Self {
        self.datetime = true;
        self
    }

    pub fn with_inline(mut self) -> Self {
        self.inline = true;
        self
    }

    pub fn with_omitempty(mut self) -> Self {
        self.omitempty = true;
        self
    }
}

/// Emitter configuration: a map from dotted field paths to [`Style`].
///
/// Paths use the emitter's own normalization: bare segments joined with `.`,
/// quoted segments where the key needs quoting, array positions as `[i]`.
///
/// ```
/// use toml_mill::{EmitOptions, Style};
///
/// let options = EmitOptions::new()
///     .field("banner", Style::new().with_multiline())
///     .field("server.password", Style::new().with_literal());
/// ```
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    fields: HashMap<String, Style>,
}

impl EmitOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares the style for the field at `path`.
    pub fn field(mut self, path: impl Into<String>, style: Style) -> Self {
        self.fields.insert(path.into(), style);
        self
    }

    pub(crate) fn style_for(&self, path: &str) -> Style {
        self.fields.get(path).copied().unwrap_or_default()
    }
}
