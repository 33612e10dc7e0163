//! Parsing of declaration lines and expression bodies.
//!
//! The body grammar has no token stream: a single left-to-right scan finds
//! the loosest-binding operator at bracket depth zero and splits on every
//! occurrence of it, recursing into the slices. Leaves are literals,
//! parameter references, and references to previously declared variables
//! (whose bodies are cloned in, substituting any actual arguments).

use super::{evaluate::evaluate, normalize::normalize, simplify::simplify, Expr, Op};
use crate::{
    brackets::{check_balance, find_at_depth_zero, split_name_args, trim_brackets},
    cursor::{check_qualifier, literal_value},
    vars::{VarDecl, Variable, VariableStore},
    Error,
};

/// The declaration token separating header from body.
const ASSIGNMENT: &str = ":=";

/// Parses one declaration or anonymous expression line against the current
/// variable store.
#[derive(Debug)]
pub(crate) struct Parser<'a> {
    store: &'a VariableStore,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(store: &'a VariableStore) -> Self {
        Self { store }
    }

    /// Parse a comment-stripped, non-blank line into a variable.
    ///
    /// The returned variable carries the canonical (normalised, folded,
    /// rewritten) form of the body. It is not stored - that is the caller's
    /// decision.
    pub(crate) fn parse(&self, line: &str) -> Result<Variable, Error> {
        check_balance(line)?;

        let (decl, body_src) = match find_at_depth_zero(line, ASSIGNMENT) {
            Some(at) => (
                self.parse_declaration(&line[..at])?,
                &line[at + ASSIGNMENT.len()..],
            ),
            None => (VarDecl::unnamed(), line),
        };

        let mut body = self.parse_expr(body_src, &decl)?;
        normalize(&mut body);
        simplify(&mut body);
        evaluate(&mut body);

        Ok(Variable::new(decl, body))
    }

    /// Parse a `NAME` or `NAME(p1, p2, ...)` declaration header.
    fn parse_declaration(&self, header: &str) -> Result<VarDecl, Error> {
        let (name, parts) = split_name_args(header.trim())?;

        let name = name.trim();
        check_qualifier(name, "variable name")?;
        if self.store.get(name).is_some() {
            return Err(Error::Redeclared(name.to_string()));
        }

        let mut decl = VarDecl::named(name);
        for part in parts.unwrap_or_default() {
            let part = part.trim();
            check_qualifier(part, "parameter name")?;
            decl.add_param(part)?;
        }

        Ok(decl)
    }

    fn parse_expr(&self, src: &str, decl: &VarDecl) -> Result<Expr, Error> {
        let src = trim_brackets(src)?;
        if src.is_empty() {
            return Err(Error::EmptyExpression);
        }

        if let Some(expr) = self.parse_operation(src, decl)? {
            return Ok(expr);
        }
        if let Some(value) = literal_value(src) {
            return Ok(Expr::Literal(value));
        }
        if let Some(expr) = self.parse_variable_args(src, decl)? {
            return Ok(expr);
        }

        check_qualifier(src, "parameter or variable name")?;

        if let Some(index) = decl.find_param(src) {
            return Ok(Expr::Param {
                index,
                name: src.to_string(),
            });
        }
        if let Some(variable) = self.store.get(src) {
            if variable.param_count() > 0 {
                return Err(Error::MissingArguments(src.to_string()));
            }
            return Ok(variable.body().clone());
        }

        Err(Error::UndefinedName(src.to_string()))
    }

    /// Find the loosest-binding operator at depth zero and split on it.
    ///
    /// Returns `None` when the cursor holds no depth-zero operator and is
    /// therefore a leaf.
    fn parse_operation(&self, src: &str, decl: &VarDecl) -> Result<Option<Expr>, Error> {
        let mut depth = 0usize;
        let mut split_op: Option<Op> = None;
        for (offset, ch) in src.char_indices() {
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 => {
                    if let Some(op) = Op::leading(&src[offset..]) {
                        if split_op.is_none_or(|best| op > best) {
                            split_op = Some(op);
                        }
                    }
                }
                _ => {}
            }
        }

        let Some(op) = split_op else { return Ok(None) };

        if op == Op::Not {
            // The loosest operator is negation, so the whole cursor must be
            // one: `!rest`.
            let Some(child_src) = src.strip_prefix('!') else {
                return Err(Error::BadNegation);
            };
            let child = self.parse_expr(child_src, decl)?;
            return Ok(Some(Expr::negation(child)));
        }

        let token = op.token();
        let mut children = Vec::new();
        let mut depth = 0usize;
        let mut start = 0usize;
        let mut offset = 0usize;
        while offset < src.len() {
            let ch = src[offset..].chars().next().expect("offset on char boundary");
            match ch {
                '(' => depth += 1,
                ')' => depth = depth.saturating_sub(1),
                _ if depth == 0 && src[offset..].starts_with(token) => {
                    children.push(self.parse_expr(&src[start..offset], decl)?);
                    offset += token.len();
                    start = offset;
                    continue;
                }
                _ => {}
            }
            offset += ch.len_utf8();
        }
        children.push(self.parse_expr(&src[start..], decl)?);

        debug_assert!(children.len() >= 2);
        Ok(Some(Expr::Operation { op, children }))
    }

    /// A `NAME(actual, ...)` reference to a declared variable: clone its body
    /// substituting the actuals.
    ///
    /// Returns `None` when the cursor holds no bracket at all.
    fn parse_variable_args(&self, src: &str, decl: &VarDecl) -> Result<Option<Expr>, Error> {
        let (name, parts) = split_name_args(src)?;
        let Some(parts) = parts else { return Ok(None) };

        let name = name.trim();
        check_qualifier(name, "variable name")?;
        let Some(variable) = self.store.get(name) else {
            return Err(Error::UndefinedVariable(name.to_string()));
        };

        let actuals = parts
            .map(|part| self.parse_expr(part, decl))
            .collect::<Result<Vec<_>, _>>()?;

        if actuals.len() != variable.param_count() {
            return Err(Error::VariableArity {
                name: name.to_string(),
                expected: variable.param_count(),
                actual: actuals.len(),
            });
        }

        Ok(Some(variable.body().substitute(&actuals)))
    }
}
