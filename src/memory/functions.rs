//! Function table
//!
//! Maps each function name to its declaration. One table is built per run and
//! passed explicitly to whoever resolves calls; lookups happen at call time, so
//! a function may call another that is declared later in the file.

use crate::parser::ast::FunctionDecl;
use rustc_hash::FxHashMap;
use std::rc::Rc;

#[derive(Debug, Clone, Default)]
pub struct FunctionTable {
    functions: FxHashMap<String, Rc<FunctionDecl>>,
}

impl FunctionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a declaration. Returns `false` if the name is already taken.
    #[must_use]
    pub fn register(&mut self, decl: Rc<FunctionDecl>) -> bool {
        if self.functions.contains_key(&decl.name) {
            return false;
        }
        self.functions.insert(decl.name.clone(), decl);
        true
    }

    pub fn get(&self, name: &str) -> Option<Rc<FunctionDecl>> {
        self.functions.get(name).cloned()
    }
}
