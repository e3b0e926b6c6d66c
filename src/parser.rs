//! The parser: a push-down automaton of state functions driven over the
//! scanner.
//!
//! Each [`State`] variant is one state function; [`Parser::step`] runs it and
//! returns the next state, or `None` to halt. Sequencing goes through an
//! explicit state stack (`seq` pushes continuations, terminal productions
//! pop), so nesting depth lives on the heap and any state can surface an
//! error by writing the error slot and returning `None` without unwinding.

#[cfg(test)]
#[path = "./parser_tests.rs"]
mod tests;

use std::borrow::Cow;

use crate::builder::Builder;
use crate::error::{Error, ErrorKind};
use crate::scanner::{is_bare_key_char, is_digit, is_hex_digit, is_space, Scanner, EOF};
use crate::table::Table;
use crate::time::Datetime;
use crate::value::Value;

/// Parses a TOML document into its root table.
pub(crate) fn parse_str(input: &str) -> Result<Table, Error> {
    let mut parser = Parser::new(input);
    let mut state = Some(State::Top);
    while let Some(s) = state {
        parser.scan.clear_backups();
        state = parser.step(s);
    }
    match parser.err {
        Some(err) => Err(err),
        None => Ok(parser.build.finish()),
    }
}

#[derive(Clone, Copy, Debug)]
enum State {
    Top,
    TopEnd,
    Comment,
    TableNameStart,
    TableNameInside,
    TableNameEnd,
    TableNameString,
    TableEnd,
    ArrayTableEnd,
    TableField,
    BareKey,
    KeyEnd,
    FieldAssign,
    Value,
    BasicString,
    MultiLineString,
    Literal,
    MultiLineLiteral,
    EscapedRune,
    LineContinuation,
    Record0,
    SetString,
    Number,
    NumberOrDate,
    FloatFraction,
    FloatExponentSign,
    FloatExponent,
    Digit,
    Byte(u8),
    DateTime,
    DateTimeFraction,
    DateTimeEnd,
    DateValue,
    ArrayValue,
    ArrayEnd,
    InlineTableStart,
    InlineTableFieldEnd,
}

/// Collects the pieces of a string literal: raw slices of the input
/// interleaved with decoded escapes, concatenated once at the end.
#[derive(Default)]
struct StrAcc<'a> {
    parts: Vec<Cow<'a, str>>,
}

impl<'a> StrAcc<'a> {
    fn push(&mut self, part: &'a str) {
        if !part.is_empty() {
            self.parts.push(Cow::Borrowed(part));
        }
    }

    fn push_char(&mut self, c: char) {
        self.parts.push(Cow::Owned(c.to_string()));
    }

    fn join(&mut self) -> String {
        let joined = self.parts.concat();
        self.parts.clear();
        joined
    }
}

/// Collects the digit runs of a numeric literal between underscore
/// separators; sign and exponent marker are kept aside.
#[derive(Default)]
struct NumAcc<'a> {
    sign: Option<u8>,
    exp: Option<u8>,
    exp_sign: Option<u8>,
    integers: Vec<&'a str>,
    fractions: Vec<&'a str>,
    exponents: Vec<&'a str>,
}

impl<'a> NumAcc<'a> {
    fn integer(&mut self) -> Result<i64, ErrorKind> {
        let digits = self.integers.concat();
        let negative = self.sign == Some(b'-');
        *self = NumAcc::default();
        if digits != "0" && digits.starts_with('0') {
            return Err(ErrorKind::LeadingZero(digits));
        }
        let mut text = String::with_capacity(digits.len() + 1);
        if negative {
            text.push('-');
        }
        text.push_str(&digits);
        match text.parse::<i64>() {
            Ok(value) => Ok(value),
            Err(_) => Err(ErrorKind::IntegerOverflow(text)),
        }
    }

    fn float(&mut self) -> Result<f64, ErrorKind> {
        let mut text = String::new();
        if let Some(sign) = self.sign {
            text.push(sign as char);
        }
        for part in &self.integers {
            text.push_str(part);
        }
        if !self.fractions.is_empty() {
            text.push('.');
            for part in &self.fractions {
                text.push_str(part);
            }
        }
        if let Some(e) = self.exp {
            text.push(e as char);
            if let Some(sign) = self.exp_sign {
                text.push(sign as char);
            }
            for part in &self.exponents {
                text.push_str(part);
            }
        }
        *self = NumAcc::default();
        match text.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(ErrorKind::InvalidFloat(text)),
        }
    }
}

struct Parser<'a> {
    scan: Scanner<'a>,
    build: Builder,
    strs: StrAcc<'a>,
    nums: NumAcc<'a>,
    stack: Vec<State>,
    err: Option<Error>,
}

impl<'a> Parser<'a> {
    fn new(input: &'a str) -> Self {
        Parser {
            scan: Scanner::new(input),
            build: Builder::new(),
            strs: StrAcc::default(),
            nums: NumAcc::default(),
            stack: Vec::new(),
            err: None,
        }
    }

    /// Schedules `states[1..]` and returns the first, so that popping runs
    /// them in order.
    fn seq(&mut self, states: &[State]) -> Option<State> {
        debug_assert!(!states.is_empty());
        for state in states[1..].iter().rev() {
            self.stack.push(*state);
        }
        Some(states[0])
    }

    fn push(&mut self, state: State) {
        self.stack.push(state);
    }

    fn pop(&mut self) -> Option<State> {
        match self.stack.pop() {
            Some(state) => Some(state),
            None => unreachable!("state stack underflow"),
        }
    }

    #[cold]
    fn fail(&mut self, kind: ErrorKind) -> Option<State> {
        self.err = Some(Error {
            line: self.scan.line,
            pos: self.scan.pos,
            kind,
        });
        None
    }

    /// Reports `expect X, got Y` at the start of the offending token: the
    /// last advance is un-consumed first so line and position point at it.
    #[cold]
    fn expected(&mut self, expected: &'static str) -> Option<State> {
        self.scan.unread();
        let (got, width) = self.scan.peek_rune();
        let found = if width == 0 { None } else { Some(got) };
        self.fail(ErrorKind::Expected { expected, found })
    }

    fn step(&mut self, state: State) -> Option<State> {
        match state {
            State::Top => self.top(),
            State::TopEnd => self.top_end(),
            State::Comment => self.comment(),
            State::TableNameStart => self.table_name_start(),
            State::TableNameInside => self.table_name_inside(),
            State::TableNameEnd => self.table_name_end(),
            State::TableNameString => self.table_name_string(),
            State::TableEnd => self.table_end(),
            State::ArrayTableEnd => self.array_table_end(),
            State::TableField => self.table_field(),
            State::BareKey => self.bare_key(),
            State::KeyEnd => self.key_end(),
            State::FieldAssign => self.field_assign(),
            State::Value => self.value(),
            State::BasicString => self.basic_string(),
            State::MultiLineString => self.multi_line_string(),
            State::Literal => self.literal(),
            State::MultiLineLiteral => self.multi_line_literal(),
            State::EscapedRune => self.escaped_rune(),
            State::LineContinuation => self.line_continuation(),
            State::Record0 => {
                self.scan.record(0);
                self.pop()
            }
            State::SetString => {
                let text = self.strs.join();
                self.set_value(Value::String(text))
            }
            State::Number => self.number(),
            State::NumberOrDate => self.number_or_date(),
            State::FloatFraction => self.float_fraction(),
            State::FloatExponentSign => self.float_exponent_sign(),
            State::FloatExponent => self.float_exponent(),
            State::Digit => self.digit(),
            State::Byte(b) => self.byte(b),
            State::DateTime => self.date_time(),
            State::DateTimeFraction => self.date_time_fraction(),
            State::DateTimeEnd => self.date_time_end(),
            State::DateValue => self.date_value(),
            State::ArrayValue => self.array_value(),
            State::ArrayEnd => self.array_end(),
            State::InlineTableStart => self.inline_table_start(),
            State::InlineTableFieldEnd => self.inline_table_field_end(),
        }
    }

    fn top(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) || self.scan.skip_newline(b) {
            return Some(State::Top);
        }
        match b {
            b'#' => self.seq(&[State::Comment, State::Top]),
            b'[' => self.table_start(),
            EOF => None,
            _ => {
                self.scan.unread();
                // Resumed after a whole key-value pair was scanned.
                self.seq(&[State::TableField, State::TopEnd])
            }
        }
    }

    fn top_end(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if b == EOF || self.scan.skip_newline(b) {
            return Some(State::Top);
        }
        if is_space(b) {
            return Some(State::TopEnd);
        }
        if b == b'#' {
            return self.seq(&[State::Comment, State::Top]);
        }
        self.expected("new line, comment or EOF")
    }

    fn comment(&mut self) -> Option<State> {
        let (c, width) = self.scan.read_rune();
        if width == 0 {
            return self.pop();
        }
        if c == '\r' || c == '\n' {
            self.scan.skip_newline(c as u8);
            return self.pop();
        }
        Some(State::Comment)
    }

    fn table_start(&mut self) -> Option<State> {
        self.build.names.clear();
        if self.scan.try_byte(b'[') {
            self.seq(&[State::TableNameStart, State::Byte(b']'), State::ArrayTableEnd])
        } else {
            self.seq(&[State::TableNameStart, State::TableEnd])
        }
    }

    fn table_name_start(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) {
            return Some(State::TableNameStart);
        }
        match b {
            b'.' | b']' => self.fail(ErrorKind::EmptyTableName),
            b'"' => self.seq(&[State::Record0, State::BasicString, State::TableNameString]),
            _ if is_bare_key_char(b) => {
                self.scan.record(-1);
                Some(State::TableNameInside)
            }
            _ => self.expected("table name"),
        }
    }

    fn table_name_inside(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_bare_key_char(b) {
            return Some(State::TableNameInside);
        }
        if is_space(b) {
            let name = self.scan.slice(-1);
            self.build.names.push(name.to_string());
            return Some(State::TableNameEnd);
        }
        match b {
            b'.' => {
                let name = self.scan.slice(-1);
                self.build.names.push(name.to_string());
                Some(State::TableNameStart)
            }
            b']' => {
                let name = self.scan.slice(-1);
                self.build.names.push(name.to_string());
                self.pop()
            }
            _ => self.expected("bare character"),
        }
    }

    fn table_name_end(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) {
            return Some(State::TableNameEnd);
        }
        match b {
            b'.' => Some(State::TableNameStart),
            b']' => self.pop(),
            _ => self.expected("'.' or ']'"),
        }
    }

    fn table_name_string(&mut self) -> Option<State> {
        let name = self.strs.join();
        self.build.names.push(name);
        Some(State::TableNameEnd)
    }

    fn table_end(&mut self) -> Option<State> {
        match self.build.open_table() {
            Ok(()) => Some(State::TopEnd),
            Err(kind) => self.fail(kind),
        }
    }

    fn array_table_end(&mut self) -> Option<State> {
        match self.build.open_array_table() {
            Ok(()) => Some(State::TopEnd),
            Err(kind) => self.fail(kind),
        }
    }

    fn table_field(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) {
            return Some(State::TableField);
        }
        if is_bare_key_char(b) {
            self.scan.record(-1);
            return Some(State::BareKey);
        }
        match b {
            b'=' => self.fail(ErrorKind::EmptyKey),
            b'"' => self.seq(&[State::Record0, State::BasicString, State::KeyEnd]),
            b'\'' => self.seq(&[State::Record0, State::Literal, State::KeyEnd]),
            _ => self.expected("table field"),
        }
    }

    fn bare_key(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_bare_key_char(b) {
            return Some(State::BareKey);
        }
        if is_space(b) {
            let key = self.scan.slice(-1).to_string();
            self.push(State::FieldAssign);
            return self.push_table_key(key);
        }
        if b == b'=' {
            let key = self.scan.slice(-1).to_string();
            self.push(State::Value);
            return self.push_table_key(key);
        }
        self.expected("bare character")
    }

    fn key_end(&mut self) -> Option<State> {
        let key = self.strs.join();
        self.push(State::FieldAssign);
        self.push_table_key(key)
    }

    fn push_table_key(&mut self, key: String) -> Option<State> {
        match self.build.push_key(key) {
            Ok(()) => self.pop(),
            Err(kind) => self.fail(kind),
        }
    }

    fn field_assign(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) {
            return Some(State::FieldAssign);
        }
        if b == b'=' {
            return Some(State::Value);
        }
        self.expected("'='")
    }

    fn set_value(&mut self, value: Value) -> Option<State> {
        match self.build.set_value(value) {
            Ok(()) => self.pop(),
            Err(kind) => self.fail(kind),
        }
    }

    fn value(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        match b {
            b'[' => {
                self.build.push_array_env();
                self.seq(&[State::ArrayValue, State::ArrayEnd])
            }
            b'{' => Some(State::InlineTableStart),
            b't' => {
                if self.scan.try_prefix("rue") {
                    self.set_value(Value::Bool(true))
                } else {
                    self.expected("true")
                }
            }
            b'f' => {
                if self.scan.try_prefix("alse") {
                    self.set_value(Value::Bool(false))
                } else {
                    self.expected("false")
                }
            }
            b'"' => {
                if self.scan.try_prefix("\"\"") {
                    self.scan.try_newline();
                    self.seq(&[State::Record0, State::MultiLineString, State::SetString])
                } else {
                    self.seq(&[State::Record0, State::BasicString, State::SetString])
                }
            }
            b'\'' => {
                if self.scan.try_prefix("''") {
                    self.scan.try_newline();
                    self.seq(&[State::Record0, State::MultiLineLiteral, State::SetString])
                } else {
                    self.seq(&[State::Record0, State::Literal, State::SetString])
                }
            }
            b'+' | b'-' => {
                self.nums.sign = Some(b);
                self.seq(&[State::Record0, State::Digit, State::Number])
            }
            _ if is_digit(b) => {
                self.scan.record(-1);
                Some(State::NumberOrDate)
            }
            _ if is_space(b) => Some(State::Value),
            _ => self.expected("value"),
        }
    }

    fn basic_string(&mut self) -> Option<State> {
        let (c, _) = self.scan.read_rune();
        match c {
            '"' => {
                let part = self.scan.slice(-1);
                self.strs.push(part);
                self.pop()
            }
            '\\' => {
                let part = self.scan.slice(-1);
                self.strs.push(part);
                self.seq(&[State::EscapedRune, State::Record0, State::BasicString])
            }
            '\r' | '\n' => self.fail(ErrorKind::NewlineInString),
            '\0' => self.fail(ErrorKind::UnterminatedString),
            _ => Some(State::BasicString),
        }
    }

    fn multi_line_string(&mut self) -> Option<State> {
        let (c, _) = self.scan.read_rune();
        match c {
            '\\' => {
                let part = self.scan.slice(-1);
                self.strs.push(part);
                if self.scan.try_newline() {
                    self.seq(&[State::LineContinuation, State::Record0, State::MultiLineString])
                } else {
                    self.seq(&[State::EscapedRune, State::Record0, State::MultiLineString])
                }
            }
            '"' => {
                if self.scan.try_prefix("\"\"") {
                    // Up to two quotes directly against the delimiter belong
                    // to the content.
                    if self.scan.try_byte(b'"') {
                        self.scan.try_byte(b'"');
                    }
                    let part = self.scan.slice(-3);
                    self.strs.push(part);
                    self.pop()
                } else {
                    Some(State::MultiLineString)
                }
            }
            '\n' => {
                self.scan.line += 1;
                Some(State::MultiLineString)
            }
            '\0' => self.fail(ErrorKind::UnterminatedString),
            _ => Some(State::MultiLineString),
        }
    }

    fn literal(&mut self) -> Option<State> {
        let (c, _) = self.scan.read_rune();
        match c {
            '\'' => {
                let part = self.scan.slice(-1);
                self.strs.push(part);
                self.pop()
            }
            '\r' | '\n' => self.fail(ErrorKind::NewlineInString),
            '\0' => self.fail(ErrorKind::UnterminatedString),
            _ => Some(State::Literal),
        }
    }

    fn multi_line_literal(&mut self) -> Option<State> {
        let (c, _) = self.scan.read_rune();
        match c {
            '\'' => {
                if self.scan.try_prefix("''") {
                    if self.scan.try_byte(b'\'') {
                        self.scan.try_byte(b'\'');
                    }
                    let part = self.scan.slice(-3);
                    self.strs.push(part);
                    self.pop()
                } else {
                    Some(State::MultiLineLiteral)
                }
            }
            '\n' => {
                self.scan.line += 1;
                Some(State::MultiLineLiteral)
            }
            '\0' => self.fail(ErrorKind::UnterminatedString),
            _ => Some(State::MultiLineLiteral),
        }
    }

    fn escaped_rune(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        let decoded = match b {
            b'b' => "\u{0008}",
            b't' => "\t",
            b'n' => "\n",
            b'f' => "\u{000C}",
            b'r' => "\r",
            b'"' => "\"",
            b'\\' => "\\",
            b'u' => return self.unicode_rune(4),
            b'U' => return self.unicode_rune(8),
            _ => return self.expected("escaped sequence"),
        };
        self.strs.push(decoded);
        self.pop()
    }

    fn unicode_rune(&mut self, digits: u8) -> Option<State> {
        let mut code: u32 = 0;
        for _ in 0..digits {
            let b = self.scan.read_byte();
            if !is_hex_digit(b) {
                return self.expected("hexadecimal digit");
            }
            let digit = match b {
                b'0'..=b'9' => u32::from(b - b'0'),
                b'a'..=b'f' => u32::from(b - b'a') + 10,
                _ => u32::from(b - b'A') + 10,
            };
            code = (code << 4) | digit;
        }
        match char::from_u32(code) {
            Some(c) => {
                self.strs.push_char(c);
                self.pop()
            }
            None => self.fail(ErrorKind::InvalidEscapeValue(code)),
        }
    }

    /// After a backslash-newline in a multi-line basic string: elide all
    /// whitespace and newlines up to the next content character.
    fn line_continuation(&mut self) -> Option<State> {
        loop {
            let b = self.scan.read_byte();
            if is_space(b) || self.scan.skip_newline(b) {
                continue;
            }
            self.scan.unread();
            return self.pop();
        }
    }

    fn number(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_digit(b) {
            return Some(State::Number);
        }
        match b {
            b'_' => {
                let run = self.scan.slice(-1);
                self.nums.integers.push(run);
                self.seq(&[State::Record0, State::Digit, State::Number])
            }
            b'.' => {
                let run = self.scan.slice(-1);
                self.nums.integers.push(run);
                self.seq(&[State::Record0, State::Digit, State::FloatFraction])
            }
            b'e' | b'E' => {
                self.nums.exp = Some(b);
                let run = self.scan.slice(-1);
                self.nums.integers.push(run);
                Some(State::FloatExponentSign)
            }
            _ => {
                self.scan.unread();
                let run = self.scan.slice(0);
                self.nums.integers.push(run);
                self.set_integer()
            }
        }
    }

    fn number_or_date(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if b == b'-' {
            return self.seq(&[
                State::Digit,
                State::Digit,
                State::Byte(b'-'),
                State::Digit,
                State::Digit,
                State::DateTime,
            ]);
        }
        if is_digit(b) {
            return Some(State::NumberOrDate);
        }
        self.scan.unread();
        Some(State::Number)
    }

    fn float_fraction(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_digit(b) {
            return Some(State::FloatFraction);
        }
        match b {
            b'_' => {
                let run = self.scan.slice(-1);
                self.nums.fractions.push(run);
                self.seq(&[State::Record0, State::Digit, State::FloatFraction])
            }
            b'.' => self.fail(ErrorKind::DoubleDecimalPoint),
            b'e' | b'E' => {
                self.nums.exp = Some(b);
                let run = self.scan.slice(-1);
                self.nums.fractions.push(run);
                Some(State::FloatExponentSign)
            }
            _ => {
                self.scan.unread();
                let run = self.scan.slice(0);
                self.nums.fractions.push(run);
                self.set_float()
            }
        }
    }

    fn float_exponent_sign(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        match b {
            b'+' | b'-' => self.nums.exp_sign = Some(b),
            _ => self.scan.unread(),
        }
        self.seq(&[State::Record0, State::Digit, State::FloatExponent])
    }

    fn float_exponent(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_digit(b) {
            return Some(State::FloatExponent);
        }
        match b {
            b'_' => {
                let run = self.scan.slice(-1);
                self.nums.exponents.push(run);
                self.seq(&[State::Record0, State::Digit, State::FloatExponent])
            }
            _ => {
                self.scan.unread();
                let run = self.scan.slice(0);
                self.nums.exponents.push(run);
                self.set_float()
            }
        }
    }

    fn set_integer(&mut self) -> Option<State> {
        match self.nums.integer() {
            Ok(value) => self.set_value(Value::Integer(value)),
            Err(kind) => self.fail(kind),
        }
    }

    fn set_float(&mut self) -> Option<State> {
        match self.nums.float() {
            Ok(value) => self.set_value(Value::Float(value)),
            Err(kind) => self.fail(kind),
        }
    }

    fn digit(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_digit(b) {
            self.pop()
        } else {
            self.expected("digit")
        }
    }

    fn byte(&mut self, want: u8) -> Option<State> {
        let b = self.scan.read_byte();
        if b == want {
            self.pop()
        } else {
            self.expected(byte_name(want))
        }
    }

    fn date_time(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if b == b'T' {
            return self.seq(&[
                State::Digit,
                State::Digit,
                State::Byte(b':'),
                State::Digit,
                State::Digit,
                State::Byte(b':'),
                State::Digit,
                State::Digit,
                State::DateTimeFraction,
            ]);
        }
        self.scan.unread();
        self.date_value()
    }

    fn date_time_fraction(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if b == b'.' {
            loop {
                let d = self.scan.read_byte();
                if !is_digit(d) {
                    break;
                }
            }
            self.scan.unread();
            return Some(State::DateTimeEnd);
        }
        self.scan.unread();
        Some(State::DateTimeEnd)
    }

    fn date_time_end(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        match b {
            b'Z' => self.date_value(),
            b'+' | b'-' => self.seq(&[
                State::Digit,
                State::Digit,
                State::Byte(b':'),
                State::Digit,
                State::Digit,
                State::DateValue,
            ]),
            _ => {
                self.scan.unread();
                self.date_value()
            }
        }
    }

    fn date_value(&mut self) -> Option<State> {
        let text = self.scan.slice(0);
        match Datetime::parse(text) {
            Some(datetime) => self.set_value(Value::Datetime(datetime)),
            None => {
                let text = text.to_string();
                self.fail(ErrorKind::InvalidDatetime(text))
            }
        }
    }

    fn array_value(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) || self.scan.skip_newline(b) {
            return Some(State::ArrayValue);
        }
        match b {
            b'#' => self.seq(&[State::Comment, State::ArrayValue]),
            b',' => self.fail(ErrorKind::MissingArrayElement),
            b']' => {
                self.scan.unread();
                self.pop()
            }
            _ => {
                self.scan.unread();
                Some(State::Value)
            }
        }
    }

    fn array_end(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) || self.scan.skip_newline(b) {
            return Some(State::ArrayEnd);
        }
        match b {
            b'#' => self.seq(&[State::Comment, State::ArrayEnd]),
            b',' => self.seq(&[State::ArrayValue, State::ArrayEnd]),
            b']' => {
                let array = self.build.pop_env();
                self.set_value(array)
            }
            _ => self.expected("',' or ']'"),
        }
    }

    fn inline_table_start(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if self.scan.skip_newline(b) {
            return self.fail(ErrorKind::NewlineInInlineTable);
        }
        if is_space(b) {
            return Some(State::InlineTableStart);
        }
        match b {
            b',' => self.fail(ErrorKind::UnexpectedComma),
            b'}' => self.set_value(Value::Table(Table::new())),
            _ => {
                self.scan.unread();
                self.build.push_table_env();
                self.seq(&[State::TableField, State::InlineTableFieldEnd])
            }
        }
    }

    fn inline_table_field_end(&mut self) -> Option<State> {
        let b = self.scan.read_byte();
        if is_space(b) {
            return Some(State::InlineTableFieldEnd);
        }
        match b {
            b',' => self.seq(&[State::TableField, State::InlineTableFieldEnd]),
            b'}' => {
                let table = self.build.pop_env();
                self.set_value(table)
            }
            _ => self.expected("inline table separator ',' or terminator '}'"),
        }
    }
}

fn byte_name(b: u8) -> &'static str {
    match b {
        b']' => "']'",
        b':' => "':'",
        b'-' => "'-'",
        b'=' => "'='",
        _ => "delimiter",
    }
}
