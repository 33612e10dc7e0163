//! Variable declarations, variables, and the name-to-variable store.

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::{expr::Expr, Error};

/// A declaration: a (possibly empty) name plus ordered, unique parameter
/// names.
///
/// An empty name marks the anonymous variable created for bare expressions,
/// which is echoed but never stored.
#[derive(Debug, Clone)]
pub(crate) struct VarDecl {
    name: String,
    params: Vec<String>,
}

impl VarDecl {
    /// The declaration of an anonymous variable.
    pub(crate) fn unnamed() -> Self {
        Self {
            name: String::new(),
            params: Vec::new(),
        }
    }

    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            params: Vec::new(),
        }
    }

    /// Append a parameter, failing on a duplicate name.
    pub(crate) fn add_param(&mut self, name: &str) -> Result<(), Error> {
        if self.find_param(name).is_some() {
            return Err(Error::DuplicateParameter {
                param: name.to_string(),
                variable: self.name.clone(),
            });
        }

        self.params.push(name.to_string());
        Ok(())
    }

    /// The zero-based index of the named parameter, if declared.
    pub(crate) fn find_param(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p == name)
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn params(&self) -> &[String] {
        &self.params
    }
}

impl fmt::Display for VarDecl {
    /// `name(p1, p2)`, `name` for a parameterless declaration, nothing for an
    /// anonymous one.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.is_empty() {
            return Ok(());
        }

        f.write_str(&self.name)?;
        if self.params.is_empty() {
            return Ok(());
        }

        f.write_str("(")?;
        for (index, param) in self.params.iter().enumerate() {
            if index > 0 {
                f.write_str(", ")?;
            }
            f.write_str(param)?;
        }
        f.write_str(")")
    }
}

/// A declaration plus its owned body.
#[derive(Debug)]
pub(crate) struct Variable {
    decl: VarDecl,
    body: Expr,
}

impl Variable {
    pub(crate) fn new(decl: VarDecl, body: Expr) -> Self {
        Self { decl, body }
    }

    pub(crate) fn name(&self) -> &str {
        self.decl.name()
    }

    pub(crate) fn is_named(&self) -> bool {
        !self.decl.name().is_empty()
    }

    pub(crate) fn params(&self) -> &[String] {
        self.decl.params()
    }

    pub(crate) fn param_count(&self) -> usize {
        self.decl.params().len()
    }

    pub(crate) fn decl(&self) -> &VarDecl {
        &self.decl
    }

    pub(crate) fn body(&self) -> &Expr {
        &self.body
    }

    pub(crate) fn body_mut(&mut self) -> &mut Expr {
        &mut self.body
    }
}

impl fmt::Display for Variable {
    /// `name(p1, p2) := body`, or the bare body for an anonymous variable.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.is_named() {
            return write!(f, "{}", self.body);
        }

        write!(f, "{} := {}", self.decl, self.body)
    }
}

/// Name-to-variable mapping with insertion-order iteration.
#[derive(Debug, Default)]
pub(crate) struct VariableStore {
    variables: IndexMap<String, Variable>,
}

impl VariableStore {
    /// Store `variable` under its own name.
    ///
    /// The caller has already rejected anonymous and duplicate names.
    pub(crate) fn insert(&mut self, variable: Variable) -> &Variable {
        debug_assert!(variable.is_named());
        debug_assert!(!self.variables.contains_key(variable.name()));

        debug!("storing variable '{}'", variable.name());

        let name = variable.name().to_string();
        self.variables.entry(name).or_insert(variable)
    }

    pub(crate) fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub(crate) fn get_mut(&mut self, name: &str) -> Option<&mut Variable> {
        self.variables.get_mut(name)
    }

    /// Remove the named variable, preserving the order of the rest.
    pub(crate) fn remove(&mut self, name: &str) -> Result<(), Error> {
        debug!("removing variable '{name}'");

        self.variables
            .shift_remove(name)
            .map(|_| ())
            .ok_or_else(|| Error::UndefinedVariable(name.to_string()))
    }

    pub(crate) fn clear(&mut self) {
        debug!("removing all {} variable(s)", self.variables.len());

        self.variables.clear();
    }

    /// Iterate stored variables in insertion order.
    pub(crate) fn iter(&self) -> impl Iterator<Item = &Variable> {
        self.variables.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variable(name: &str, params: &[&str]) -> Variable {
        let mut decl = VarDecl::named(name);
        for param in params {
            decl.add_param(param).unwrap();
        }
        Variable::new(decl, Expr::Literal(true))
    }

    #[test]
    fn test_decl_display() {
        assert_eq!(variable("x", &[]).to_string(), "x := 1");
        assert_eq!(variable("f", &["a"]).to_string(), "f(a) := 1");
        assert_eq!(variable("f", &["a", "b"]).to_string(), "f(a, b) := 1");
        assert_eq!(
            Variable::new(VarDecl::unnamed(), Expr::Literal(false)).to_string(),
            "0"
        );
    }

    #[test]
    fn test_duplicate_param() {
        let mut decl = VarDecl::named("f");
        decl.add_param("a").unwrap();
        assert!(matches!(
            decl.add_param("a"),
            Err(Error::DuplicateParameter { .. })
        ));
    }

    #[test]
    fn test_find_param() {
        let v = variable("f", &["a", "b"]);
        assert_eq!(v.decl().find_param("a"), Some(0));
        assert_eq!(v.decl().find_param("b"), Some(1));
        assert_eq!(v.decl().find_param("c"), None);
    }

    #[test]
    fn test_store_iteration_is_insertion_ordered() {
        let mut store = VariableStore::default();
        for name in ["zebra", "apple", "mango"] {
            store.insert(variable(name, &[]));
        }

        let names: Vec<_> = store.iter().map(Variable::name).collect();
        assert_eq!(names, ["zebra", "apple", "mango"]);

        // Removal preserves the order of the remainder.
        store.remove("apple").unwrap();
        let names: Vec<_> = store.iter().map(Variable::name).collect();
        assert_eq!(names, ["zebra", "mango"]);
    }

    #[test]
    fn test_store_remove_missing() {
        let mut store = VariableStore::default();
        assert!(matches!(
            store.remove("bananas"),
            Err(Error::UndefinedVariable(_))
        ));
    }

    #[test]
    fn test_store_clear() {
        let mut store = VariableStore::default();
        store.insert(variable("x", &[]));
        store.clear();
        assert!(store.get("x").is_none());
        assert_eq!(store.iter().count(), 0);
    }
}
