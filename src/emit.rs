//! The emitter: serializes a value tree to TOML text so that a subsequent
//! parse yields an equal tree.
//!
//! Each table is written as a section: scalar and inline fields first in
//! sorted key order, then sub-tables and arrays-of-tables postponed to the
//! end and written as `[path]` / `[[path]]` headers with their bodies
//! emitted recursively.

#[cfg(test)]
#[path = "./emit_tests.rs"]
mod tests;

use std::fmt::Write as _;

use foldhash::HashSet;

use crate::array::Array;
use crate::error::EmitError;
use crate::key::{combine_index_path, combine_key_path, normalize_key};
use crate::options::{EmitOptions, Style};
use crate::table::Table;
use crate::time::Datetime;
use crate::value::Value;

pub(crate) fn emit_document(root: &Table, options: &EmitOptions) -> Result<String, EmitError> {
    let mut emitter = Emitter {
        out: String::new(),
        options,
    };
    emitter.section(String::new(), root)?;
    emitter.out.push('\n');
    Ok(emitter.out)
}

/// Separator state of one section, advanced as fields and sub-sections are
/// written.
enum Sep {
    /// Nothing written yet at the root.
    First,
    /// Nothing written yet inside `{`.
    FirstInline,
    Line,
    Comma,
}

impl Sep {
    fn field(&mut self) -> &'static str {
        match self {
            Sep::First => {
                *self = Sep::Line;
                ""
            }
            Sep::FirstInline => {
                *self = Sep::Comma;
                " "
            }
            Sep::Line => "\n",
            Sep::Comma => ", ",
        }
    }

    fn table(&mut self) -> &'static str {
        match self {
            Sep::First => {
                *self = Sep::Line;
                ""
            }
            _ => "\n\n",
        }
    }
}

struct Section<'t> {
    path: String,
    sep: Sep,
    inline: bool,
    written: HashSet<String>,
    postponed: Vec<(&'t str, &'t Value)>,
}

impl<'t> Section<'t> {
    fn new(path: String, sep: Sep, inline: bool) -> Self {
        Section {
            path,
            sep,
            inline,
            written: HashSet::default(),
            postponed: Vec::new(),
        }
    }

    fn record(&mut self, key: &str) -> Result<(), EmitError> {
        if !self.written.insert(key.to_string()) {
            return Err(EmitError::DuplicateKey {
                path: self.path.clone(),
                key: key.to_string(),
            });
        }
        Ok(())
    }
}

struct Emitter<'o> {
    out: String,
    options: &'o EmitOptions,
}

impl Emitter<'_> {
    /// Writes the body of the table at `path`: fields, then postponed
    /// sub-sections.
    fn section(&mut self, path: String, table: &Table) -> Result<(), EmitError> {
        let sep = if path.is_empty() { Sep::First } else { Sep::Line };
        let mut sect = Section::new(path, sep, false);
        for (key, value) in sorted(table) {
            self.field(&mut sect, key, value)?;
        }
        self.postponed_sections(&mut sect)
    }

    fn postponed_sections(&mut self, sect: &mut Section<'_>) -> Result<(), EmitError> {
        let postponed = std::mem::take(&mut sect.postponed);
        for (key, value) in postponed {
            let path = combine_key_path(&sect.path, key);
            match value {
                Value::Table(table) => {
                    let sep = sect.sep.table();
                    self.out.push_str(sep);
                    self.out.push('[');
                    self.out.push_str(&path);
                    self.out.push(']');
                    self.section(path, table)?;
                }
                Value::Array(array) => {
                    for element in array {
                        let sep = sect.sep.table();
                        self.out.push_str(sep);
                        self.out.push_str("[[");
                        self.out.push_str(&path);
                        self.out.push_str("]]");
                        match element {
                            Value::Table(table) => self.section(path.clone(), table)?,
                            other => {
                                return Err(EmitError::ExpectedTable {
                                    path,
                                    found: other.type_str(),
                                });
                            }
                        }
                    }
                }
                _ => unreachable!("only tables and arrays of tables are postponed"),
            }
        }
        Ok(())
    }

    fn field<'t>(
        &mut self,
        sect: &mut Section<'t>,
        key: &'t str,
        value: &'t Value,
    ) -> Result<(), EmitError> {
        let path = combine_key_path(&sect.path, key);
        let style = self.options.style_for(&path);
        if style.omitempty && value.is_empty_value() {
            return Ok(());
        }
        sect.record(key)?;
        let postpone = match value {
            Value::Table(..) => !sect.inline && !style.inline,
            Value::Array(array) => {
                !array.is_closed() && !array.is_empty() && !sect.inline && !style.inline
            }
            _ => false,
        };
        if postpone {
            sect.postponed.push((key, value));
            return Ok(());
        }
        let sep = sect.sep.field();
        self.out.push_str(sep);
        self.out.push_str(&normalize_key(key));
        self.out.push_str(" = ");
        self.value(value, style, &path)
    }

    fn value(&mut self, value: &Value, style: Style, path: &str) -> Result<(), EmitError> {
        match value {
            Value::Bool(b) => {
                self.raw(if *b { "true" } else { "false" }, style);
                Ok(())
            }
            Value::Integer(i) => {
                self.raw(&i.to_string(), style);
                Ok(())
            }
            Value::Float(f) => {
                if !f.is_finite() {
                    return Err(EmitError::NonFiniteFloat(*f));
                }
                let mut token = f.to_string();
                if !token.contains(['.', 'e', 'E']) {
                    token.push_str(".0");
                }
                self.raw(&token, style);
                Ok(())
            }
            Value::String(s) => {
                if style.datetime {
                    if let Some(datetime) = Datetime::parse(s) {
                        self.raw(&datetime.to_string(), style);
                        return Ok(());
                    }
                }
                self.string_value(s, style);
                Ok(())
            }
            Value::Datetime(datetime) => {
                self.raw(&datetime.to_string(), style);
                Ok(())
            }
            Value::Array(array) => self.array_value(array, style, path),
            Value::Table(table) => self.inline_table(table, path),
        }
    }

    /// Writes a non-string token, quoting it when the field asks for string
    /// form.
    fn raw(&mut self, token: &str, style: Style) {
        if style.string || style.literal {
            self.string_value(token, style);
        } else {
            self.out.push_str(token);
        }
    }

    fn string_value(&mut self, s: &str, style: Style) {
        if style.multiline {
            if style.literal && !s.contains("'''") && !(style.ascii && !s.is_ascii()) {
                self.out.push_str("'''\n");
                self.out.push_str(s);
                self.out.push_str("'''");
                return;
            }
            self.out.push_str("\"\"\"\n");
            let quoted = quote_basic(s, true, style.ascii);
            self.out.push_str(&quoted);
            self.out.push_str("\"\"\"");
            return;
        }
        if style.literal
            && !s.contains(['\'', '\r', '\n'])
            && !(style.ascii && !s.is_ascii())
        {
            self.out.push('\'');
            self.out.push_str(s);
            self.out.push('\'');
            return;
        }
        self.out.push('"');
        let quoted = quote_basic(s, false, style.ascii);
        self.out.push_str(&quoted);
        self.out.push('"');
    }

    fn array_value(&mut self, array: &Array, style: Style, path: &str) -> Result<(), EmitError> {
        self.out.push('[');
        let mut elem_type: Option<&'static str> = None;
        let mut sep = " ";
        for (i, element) in array.iter().enumerate() {
            self.out.push_str(sep);
            sep = ", ";
            let found = element.type_str();
            match elem_type {
                None => elem_type = Some(found),
                Some(expected) if expected != found => {
                    return Err(EmitError::MixedArray { expected, found });
                }
                Some(..) => {}
            }
            let element_path = combine_index_path(path, i);
            self.value(element, style, &element_path)?;
        }
        self.out.push_str(" ]");
        Ok(())
    }

    fn inline_table(&mut self, table: &Table, path: &str) -> Result<(), EmitError> {
        self.out.push('{');
        let mut sect = Section::new(path.to_string(), Sep::FirstInline, true);
        for (key, value) in sorted(table) {
            self.field(&mut sect, key, value)?;
        }
        self.out.push('}');
        Ok(())
    }
}

fn sorted(table: &Table) -> Vec<(&str, &Value)> {
    let mut entries: Vec<_> = table.iter().collect();
    entries.sort_by(|a, b| a.0.cmp(b.0));
    entries
}

/// Escapes `s` for a basic string body. In multi-line form raw newlines pass
/// through and up to two consecutive quotes stay unescaped (three would read
/// as a delimiter); quotes left pending at end of content are escaped so they
/// cannot merge with the closing delimiter.
pub(crate) fn quote_basic(s: &str, multiline: bool, ascii_only: bool) -> String {
    let mut buf = String::with_capacity(s.len() + s.len() / 2);
    let mut pending_quotes = 0;
    for c in s.chars() {
        if c == '"' {
            if !multiline || pending_quotes == 2 {
                buf.push_str("\\\"");
                continue;
            }
            pending_quotes += 1;
            continue;
        } else if pending_quotes > 0 {
            for _ in 0..pending_quotes {
                buf.push('"');
            }
            pending_quotes = 0;
        }
        if c == '\\' {
            buf.push_str("\\\\");
            continue;
        }
        if multiline && (c == '\r' || c == '\n') {
            buf.push(c);
            continue;
        }
        if ascii_only {
            if c.is_ascii() && !c.is_ascii_control() {
                buf.push(c);
                continue;
            }
        } else if !c.is_control() {
            buf.push(c);
            continue;
        }
        match c {
            '\u{0008}' => buf.push_str("\\b"),
            '\t' => buf.push_str("\\t"),
            '\u{000C}' => buf.push_str("\\f"),
            '\r' => buf.push_str("\\r"),
            '\n' => buf.push_str("\\n"),
            _ if (c as u32) < 0x10000 => {
                let _ = write!(buf, "\\u{:04x}", c as u32);
            }
            _ => {
                let _ = write!(buf, "\\U{:08x}", c as u32);
            }
        }
    }
    for _ in 0..pending_quotes {
        buf.push_str("\\\"");
    }
    buf
}
