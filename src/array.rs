//! A TOML array: an ordered sequence of values plus a `closed` flag.

#[cfg(test)]
#[path = "./array_tests.rs"]
mod tests;

use crate::table::Table;
use crate::value::Value;

/// An array of values.
///
/// A *closed* array was written as a bracketed literal `[…]`; its element
/// count is final and its elements share one type. An *open* array is the
/// accumulating array-of-tables produced by `[[name]]` headers, which later
/// headers may still append to.
#[derive(Clone)]
pub struct Array {
    values: Vec<Value>,
    closed: bool,
}

impl Array {
    /// Creates an empty closed array, the kind a bracketed literal produces.
    pub fn new() -> Self {
        Array {
            values: Vec::new(),
            closed: true,
        }
    }

    /// Creates an empty open array-of-tables, the kind `[[name]]` headers
    /// accumulate into. The emitter writes its elements as `[[name]]`
    /// sections rather than a bracketed value.
    pub fn of_tables() -> Self {
        Array {
            values: Vec::new(),
            closed: false,
        }
    }

    pub(crate) fn open_with(first: Table) -> Self {
        Array {
            values: vec![Value::Table(first)],
            closed: false,
        }
    }

    /// Appends a value. No homogeneity check is made here; the parser checks
    /// on install and the emitter re-checks on output.
    pub fn push(&mut self, value: impl Into<Value>) {
        self.values.push(value.into());
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Value> {
        self.values.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut Value> {
        self.values.get_mut(index)
    }

    pub fn first(&self) -> Option<&Value> {
        self.values.first()
    }

    pub fn last(&self) -> Option<&Value> {
        self.values.last()
    }

    pub fn last_mut(&mut self) -> Option<&mut Value> {
        self.values.last_mut()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.values.iter()
    }

    /// Whether this array was written as a bracketed literal.
    pub fn is_closed(&self) -> bool {
        self.closed
    }
}

impl Default for Array {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Vec<Value>> for Array {
    fn from(values: Vec<Value>) -> Self {
        Array {
            values,
            closed: true,
        }
    }
}

impl FromIterator<Value> for Array {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        Array {
            values: iter.into_iter().collect(),
            closed: true,
        }
    }
}

impl<'a> IntoIterator for &'a Array {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl IntoIterator for Array {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.into_iter()
    }
}

/// Element-wise equality. The closed flag is not compared: explicitness of
/// array shape round-trips behaviorally, not structurally.
impl PartialEq for Array {
    fn eq(&self, other: &Self) -> bool {
        self.values == other.values
    }
}

impl std::fmt::Debug for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(&self.values).finish()
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Array {
    fn serialize<S>(&self, ser: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        use serde::ser::SerializeSeq;
        let mut seq = ser.serialize_seq(Some(self.len()))?;
        for element in self {
            seq.serialize_element(element)?;
        }
        seq.end()
    }
}
