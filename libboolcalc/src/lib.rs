#![doc = include_str!("../README.md")]

//   Copyright 2025 Dom Dwyer <dom@itsallbroken.com>
//
//   Licensed under the Apache License, Version 2.0 (the "License");
//   you may not use this file except in compliance with the License.
//   You may obtain a copy of the License at
//
//       http://www.apache.org/licenses/LICENSE-2.0
//
//   Unless required by applicable law or agreed to in writing, software
//   distributed under the License is distributed on an "AS IS" BASIS,
//   WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//   See the License for the specific language governing permissions and
//   limitations under the License.

mod brackets;
mod cursor;
mod expr;
mod functions;
#[cfg(test)]
mod test_utils;
mod vars;

use log::debug;
use thiserror::Error;

use expr::parser::Parser;
use functions::Registry;
use vars::VariableStore;

/// Errors produced while processing an input line.
///
/// A failing line leaves the engine's variable store untouched.
#[derive(Debug, Error)]
pub enum Error {
    /// More `(` than `)` in the input line.
    #[error("closing bracket is missing")]
    MissingClosingBracket,

    /// A `)` with no matching `(` before it.
    #[error("closing bracket appears before an opening one")]
    EarlyClosingBracket,

    /// Text after the final `)` of a `name(args)` form.
    #[error("extra characters after closing bracket")]
    TrailingCharacters,

    /// A bracket pair or operator with nothing beside it.
    #[error("empty expression is not allowed")]
    EmptyExpression,

    /// A name is missing where one is required.
    #[error("{0} can't be empty")]
    EmptyName(&'static str),

    /// A name with characters outside `[A-Za-z_][A-Za-z0-9_]*`.
    #[error("{what} '{token}' is not a qualifier")]
    NotAQualifier {
        /// The role of the offending token.
        what: &'static str,
        /// The offending token.
        token: String,
    },

    /// A name clashing with `true`, `false`, `0`, `1` or `call`.
    #[error("{what} '{token}' can't be a reserved word")]
    ReservedWord {
        /// The role of the offending token.
        what: &'static str,
        /// The offending token.
        token: String,
    },

    /// `!` found mid-expression rather than as a prefix.
    #[error("incorrect usage of unary operation '!'")]
    BadNegation,

    /// Declaring a name that already exists.
    #[error("variable '{0}' is already declared")]
    Redeclared(String),

    /// The same parameter name twice in one declaration.
    #[error("duplicate parameter '{param}' in declaration of variable '{variable}'")]
    DuplicateParameter {
        /// The repeated parameter name.
        param: String,
        /// The variable being declared.
        variable: String,
    },

    /// A `name(args)` reference to an unknown variable.
    #[error("usage of undefined variable '{0}'")]
    UndefinedVariable(String),

    /// A bare qualifier that is neither a parameter nor a stored variable.
    #[error("usage of undefined parameter or variable '{0}'")]
    UndefinedName(String),

    /// A parameterised variable referenced without an argument list.
    #[error("arguments are missing for usage of variable '{0}'")]
    MissingArguments(String),

    /// A variable reference with the wrong number of arguments.
    #[error("incorrect amount of arguments for variable '{name}': expected {expected}, got {actual}")]
    VariableArity {
        /// The referenced variable.
        name: String,
        /// Its declared parameter count.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },

    /// `call name(...)` of an unknown function.
    #[error("call of undefined function '{0}'")]
    UndefinedFunction(String),

    /// A function call with the wrong number of arguments.
    #[error("incorrect amount of arguments for function '{name}': expected {expected}, got {actual}")]
    FunctionArity {
        /// The called function.
        name: String,
        /// Its expected argument count.
        expected: usize,
        /// The number of arguments supplied.
        actual: usize,
    },

    /// A variadic function that requires at least one argument got none.
    #[error("function '{0}' can't have an empty argument list")]
    EmptyArguments(&'static str),

    /// A function argument that must name a stored variable does not.
    #[error("argument '{arg}' of function '{function}' must be an existing variable name")]
    NotAVariable {
        /// The offending argument.
        arg: String,
        /// The called function.
        function: &'static str,
    },

    /// A function argument that must be a fresh name names a stored variable.
    #[error("argument '{arg}' of function '{function}' must not be an existing variable name")]
    AlreadyAVariable {
        /// The offending argument.
        arg: String,
        /// The called function.
        function: &'static str,
    },
}

/// An engine for boolean algebra over named, parameterised variables.
///
/// Feed one statement at a time into [`Engine::process`]: either a variable
/// declaration (`name(params) := body`, or a bare body to echo its canonical
/// form without storing it), or a `call name(args)` invocation of a builtin
/// function inspecting the variable store.
///
/// Declared bodies are flattened, constant-folded and rewritten under the
/// usual boolean identities before being stored, so the echoed form is
/// canonical.
#[derive(Debug, Default)]
pub struct Engine {
    store: VariableStore,
    builtins: Registry,
}

impl Engine {
    /// Initialise an engine with an empty variable store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Process one input line.
    ///
    /// The returned string may be empty (blank or comment-only input) or
    /// multi-line (function output). On error the variable store is
    /// unchanged, and the engine remains usable.
    ///
    /// # Errors
    ///
    /// All errors are domain errors with a human-readable message - see
    /// [`Error`].
    pub fn process(&mut self, line: &str) -> Result<String, Error> {
        let line = cursor::strip_comment(line).trim();
        if line.is_empty() {
            return Ok(String::new());
        }

        if let Some(call) = cursor::strip_call(line) {
            debug!("dispatching function call: {call}");
            return Ok(self.builtins.call(&mut self.store, call)?.to_string());
        }

        debug!("parsing statement: {line}");

        let variable = Parser::new(&self.store).parse(line)?;
        let rendered = variable.to_string();
        if variable.is_named() {
            self.store.insert(variable);
        }

        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_lines_produce_no_output() {
        let mut engine = Engine::new();
        assert_eq!(engine.process("").unwrap(), "");
        assert_eq!(engine.process("   ").unwrap(), "");
        assert_eq!(engine.process("# just a comment").unwrap(), "");
        assert_eq!(engine.process("   # indented comment").unwrap(), "");
    }

    #[test]
    fn test_comments_are_stripped() {
        let mut engine = Engine::new();
        assert_eq!(engine.process("x := 1 # bananas").unwrap(), "x := 1");
    }

    #[test]
    fn test_anonymous_expressions_echo_without_storing() {
        let mut engine = Engine::new();
        assert_eq!(engine.process("1 & 0").unwrap(), "0");
        assert_eq!(engine.process("call display_all()").unwrap(), "");
    }

    #[test]
    fn test_errors_leave_the_store_unchanged() {
        let mut engine = Engine::new();
        engine.process("x := 1").unwrap();

        // A failed redeclaration must not clobber the stored body.
        assert!(engine.process("x := 0").is_err());
        assert_eq!(engine.process("call display(x)").unwrap(), "x := 1");

        // A failed declaration must not store anything.
        assert!(engine.process("y := )").is_err());
        assert!(engine.process("call display(y)").is_err());
    }

    #[test]
    fn test_engine_survives_errors() {
        let mut engine = Engine::new();
        assert!(engine.process("x := ").is_err());
        assert_eq!(engine.process("x := 1").unwrap(), "x := 1");
    }

    #[test]
    fn test_call_of_undefined_function() {
        let mut engine = Engine::new();
        assert!(matches!(
            engine.process("call bananas()"),
            Err(Error::UndefinedFunction(_))
        ));
    }

    #[test]
    fn test_session_smoke() {
        crate::assert_session!("x := 1 | 0\ncall display(x)", @r"
> x := 1 | 0
x := 1
> call display(x)
x := 1
");
    }
}
