//! Tree builder: converts scanned literals into values and installs them in
//! the current environment, resolving header paths and enforcing the key and
//! type invariants.
//!
//! Inline tables and bracketed arrays under construction live as owned
//! environments on a stack; the current header table is addressed by a step
//! path into the root-owned tree and re-resolved on demand, which keeps the
//! tree single-owner. Each environment carries its dotted path for error
//! messages.

#[cfg(test)]
#[path = "./builder_tests.rs"]
mod tests;

use crate::array::Array;
use crate::error::ErrorKind;
use crate::key::{combine_index_path, combine_key_path};
use crate::table::Table;
use crate::value::Value;

/// One segment of the path addressing the current header table.
enum Step {
    /// Descend into the table bound to this key.
    Table(String),
    /// Descend into the last element of the open array-of-tables bound to
    /// this key.
    ArrayLast(String),
}

enum Env {
    Table(Table),
    Array(Array),
}

pub(crate) struct Builder {
    root: Table,
    /// Location of the current header's table within `root`.
    base: Vec<Step>,
    base_path: String,
    /// Inline tables and bracketed arrays being built, innermost last.
    envs: Vec<(Env, String)>,
    /// Keys read but not yet bound; key, `=`, and value are three separate
    /// productions.
    keys: Vec<String>,
    /// Header name segments accumulated by the table-name states.
    pub(crate) names: Vec<String>,
}

impl Builder {
    pub(crate) fn new() -> Self {
        Builder {
            root: Table::new(),
            base: Vec::new(),
            base_path: String::new(),
            envs: Vec::new(),
            keys: Vec::new(),
            names: Vec::new(),
        }
    }

    pub(crate) fn finish(self) -> Table {
        debug_assert!(self.envs.is_empty() && self.keys.is_empty());
        self.root
    }

    /// Registers a key for the next binding, rejecting keys already present
    /// in the current table.
    pub(crate) fn push_key(&mut self, key: String) -> Result<(), ErrorKind> {
        let (table, path) = match self.envs.last() {
            Some((Env::Table(t), path)) => (t, path.as_str()),
            Some((Env::Array(..), _)) => unreachable!("key pushed while building an array"),
            None => (self.base_table(), self.base_path.as_str()),
        };
        if let Some(existing) = table.get(&key) {
            return Err(ErrorKind::DuplicateKey {
                path: path.to_string(),
                key,
                kind: existing.type_str(),
            });
        }
        self.keys.push(key);
        Ok(())
    }

    /// Installs a value into the current environment: append when it is an
    /// array (checking element homogeneity), bind the pending key when it is
    /// a table.
    pub(crate) fn set_value(&mut self, value: Value) -> Result<(), ErrorKind> {
        match self.envs.last_mut() {
            Some((Env::Array(array), path)) => {
                if let Some(first) = array.first() {
                    if first.type_str() != value.type_str() {
                        return Err(ErrorKind::ArrayTypeMismatch {
                            path: path.clone(),
                            expected: first.type_str(),
                            found: value.type_str(),
                        });
                    }
                }
                array.push(value);
            }
            Some((Env::Table(table), _)) => {
                let key = match self.keys.pop() {
                    Some(key) => key,
                    None => unreachable!("value set without a pending key"),
                };
                table.insert(key, value);
            }
            None => {
                let key = match self.keys.pop() {
                    Some(key) => key,
                    None => unreachable!("value set without a pending key"),
                };
                self.base_table_mut().insert(key, value);
            }
        }
        Ok(())
    }

    pub(crate) fn push_array_env(&mut self) {
        self.push_env(Env::Array(Array::new()));
    }

    pub(crate) fn push_table_env(&mut self) {
        self.push_env(Env::Table(Table::new()));
    }

    fn push_env(&mut self, env: Env) {
        let path = match self.envs.last() {
            Some((Env::Table(..), path)) => combine_key_path(path, self.pending_key()),
            Some((Env::Array(array), path)) => combine_index_path(path, array.len()),
            None => combine_key_path(&self.base_path, self.pending_key()),
        };
        self.envs.push((env, path));
    }

    fn pending_key(&self) -> &str {
        match self.keys.last() {
            Some(key) => key,
            None => unreachable!("environment pushed without a pending key"),
        }
    }

    /// Closes the innermost environment, yielding it as a value to install
    /// in the enclosing one.
    pub(crate) fn pop_env(&mut self) -> Value {
        match self.envs.pop() {
            Some((Env::Table(t), _)) => Value::Table(t),
            Some((Env::Array(a), _)) => Value::Array(a),
            None => unreachable!("environment stack underflow"),
        }
    }

    /// Resolves a `[name]` header: walks the dotted path creating implicit
    /// tables, then binds or re-opens the final table.
    pub(crate) fn open_table(&mut self) -> Result<(), ErrorKind> {
        self.open_header(false)
    }

    /// Resolves a `[[name]]` header: as [`Self::open_table`], but the final
    /// segment appends a fresh table to an open array-of-tables.
    pub(crate) fn open_array_table(&mut self) -> Result<(), ErrorKind> {
        self.open_header(true)
    }

    fn open_header(&mut self, array_of_tables: bool) -> Result<(), ErrorKind> {
        let names = std::mem::take(&mut self.names);
        self.envs.clear();
        self.keys.clear();
        self.base.clear();
        self.base_path.clear();

        let (last, prefix) = match names.split_last() {
            Some(split) => split,
            None => unreachable!("header with no name segments"),
        };

        let Builder {
            root, base, base_path, ..
        } = self;
        let mut table: &mut Table = root;
        let mut path = String::new();

        for name in prefix {
            path = combine_key_path(&path, name);
            if !table.contains_key(name) {
                table.insert(name.clone(), Value::Table(Table::new_implicit()));
            }
            let current = table;
            table = match current.get_mut(name) {
                Some(Value::Table(next)) => {
                    base.push(Step::Table(name.clone()));
                    next
                }
                Some(Value::Array(array)) => {
                    if array.is_closed() {
                        return Err(ErrorKind::Redefined { path, kind: "array" });
                    }
                    base.push(Step::ArrayLast(name.clone()));
                    path = combine_index_path(&path, array.len() - 1);
                    match array.last_mut() {
                        Some(Value::Table(next)) => next,
                        _ => unreachable!("array of tables holds a non-table"),
                    }
                }
                Some(existing) => {
                    return Err(ErrorKind::Redefined {
                        path,
                        kind: existing.type_str(),
                    });
                }
                None => unreachable!("entry inserted above"),
            };
        }

        path = combine_key_path(&path, last);
        if array_of_tables {
            if !table.contains_key(last) {
                table.insert(last.clone(), Value::Array(Array::open_with(Table::new())));
                base.push(Step::ArrayLast(last.clone()));
            } else {
                match table.get_mut(last) {
                    Some(Value::Array(array)) => {
                        if array.is_closed() {
                            return Err(ErrorKind::Redefined { path, kind: "array" });
                        }
                        array.push(Value::Table(Table::new()));
                        base.push(Step::ArrayLast(last.clone()));
                    }
                    Some(existing) => {
                        return Err(ErrorKind::Redefined {
                            path,
                            kind: existing.type_str(),
                        });
                    }
                    None => unreachable!("checked above"),
                }
            }
        } else if !table.contains_key(last) {
            table.insert(last.clone(), Value::Table(Table::new()));
            base.push(Step::Table(last.clone()));
        } else {
            match table.get_mut(last) {
                Some(Value::Table(existing)) => {
                    if !existing.is_implicit() {
                        return Err(ErrorKind::DuplicateTable { path });
                    }
                    existing.set_explicit();
                    base.push(Step::Table(last.clone()));
                }
                Some(existing) => {
                    return Err(ErrorKind::Redefined {
                        path,
                        kind: existing.type_str(),
                    });
                }
                None => unreachable!("checked above"),
            }
        }
        *base_path = path;
        Ok(())
    }

    // The step path was produced by header resolution against the same tree,
    // so the walks below cannot miss; a miss is a builder bug.

    fn base_table(&self) -> &Table {
        let mut table = &self.root;
        for step in &self.base {
            table = match step {
                Step::Table(key) => match table.get(key) {
                    Some(Value::Table(next)) => next,
                    _ => unreachable!("header path changed shape"),
                },
                Step::ArrayLast(key) => match table.get(key) {
                    Some(Value::Array(array)) => match array.last() {
                        Some(Value::Table(next)) => next,
                        _ => unreachable!("array of tables holds a non-table"),
                    },
                    _ => unreachable!("header path changed shape"),
                },
            };
        }
        table
    }

    fn base_table_mut(&mut self) -> &mut Table {
        let mut table = &mut self.root;
        for step in &self.base {
            table = match step {
                Step::Table(key) => match table.get_mut(key) {
                    Some(Value::Table(next)) => next,
                    _ => unreachable!("header path changed shape"),
                },
                Step::ArrayLast(key) => match table.get_mut(key) {
                    Some(Value::Array(array)) => match array.last_mut() {
                        Some(Value::Table(next)) => next,
                        _ => unreachable!("array of tables holds a non-table"),
                    },
                    _ => unreachable!("header path changed shape"),
                },
            };
        }
        table
    }
}
