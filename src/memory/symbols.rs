//! Symbol tables
//!
//! A [`SymbolTable`] maps variable names to whatever the executing back-end
//! stores per variable: a [`Binding`] (value + declared type) for the
//! interpreter, a frame slot for the code generator.
//!
//! There is one table per function activation. Blocks do not open new
//! scopes, and a callee never sees its caller's table.

use super::value::Value;
use crate::parser::ast::VarType;
use rustc_hash::FxHashMap;

/// A variable's current value and the type it was declared with
#[derive(Debug, Clone, PartialEq)]
pub struct Binding {
    pub value: Value,
    pub declared_type: VarType,
}

impl Binding {
    pub fn new(value: Value, declared_type: VarType) -> Self {
        Binding {
            value,
            declared_type,
        }
    }
}

/// Variables of one activation
#[derive(Debug, Clone)]
pub struct SymbolTable<T = Binding> {
    entries: FxHashMap<String, T>,
}

impl<T> Default for SymbolTable<T> {
    fn default() -> Self {
        SymbolTable {
            entries: FxHashMap::default(),
        }
    }
}

impl<T> SymbolTable<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&T> {
        self.entries.get(name)
    }

    /// Add a new variable. Returns `false` (and leaves the table untouched)
    /// when the name is already declared.
    #[must_use]
    pub fn declare(&mut self, name: &str, entry: T) -> bool {
        if self.entries.contains_key(name) {
            return false;
        }
        self.entries.insert(name.to_string(), entry);
        true
    }

    /// Replace an existing variable. Returns `false` when it was never declared.
    #[must_use]
    pub fn assign(&mut self, name: &str, entry: T) -> bool {
        match self.entries.get_mut(name) {
            Some(slot) => {
                *slot = entry;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declare_then_get() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", Binding::new(Value::Int(1), VarType::Int)));

        let binding = table.get("x").unwrap();
        assert_eq!(binding.value, Value::Int(1));
        assert_eq!(binding.declared_type, VarType::Int);
        assert!(table.get("y").is_none());
    }

    #[test]
    fn test_redeclaration_is_rejected() {
        let mut table = SymbolTable::new();
        assert!(table.declare("x", Binding::new(Value::Int(1), VarType::Int)));
        assert!(!table.declare("x", Binding::new(Value::Int(2), VarType::Int)));
        assert_eq!(table.get("x").unwrap().value, Value::Int(1));
    }

    #[test]
    fn test_assign_requires_declaration() {
        let mut table: SymbolTable<u32> = SymbolTable::new();
        assert!(!table.assign("x", 4));
        assert!(table.declare("x", 4));
        assert!(table.assign("x", 8));
        assert_eq!(table.get("x"), Some(&8));
    }

    #[test]
    fn test_tables_are_independent() {
        let mut caller: SymbolTable<u32> = SymbolTable::new();
        let callee: SymbolTable<u32> = SymbolTable::new();
        assert!(caller.declare("x", 4));
        assert!(caller.contains("x"));
        assert!(!callee.contains("x"));
    }
}
