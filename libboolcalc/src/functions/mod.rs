//! Builtin functions: the registry, call parsing, and multi-line output.

mod builtins;

use std::fmt;

use indexmap::IndexMap;
use log::debug;

use crate::{
    brackets::{check_balance, split_name_args},
    cursor::check_qualifier,
    vars::VariableStore,
    Error,
};

/// Multi-line output accumulated by a builtin.
#[derive(Debug, Default)]
pub(crate) struct Output {
    lines: Vec<String>,
}

impl Output {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }
}

impl From<String> for Output {
    fn from(line: String) -> Self {
        Self { lines: vec![line] }
    }
}

impl fmt::Display for Output {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// A builtin: its expected argument count, and the handler consuming the
/// store plus raw (trimmed) argument cursors.
#[derive(Debug, Clone, Copy)]
struct Builtin {
    /// `None` accepts any number of arguments.
    arity: Option<usize>,

    run: fn(&mut VariableStore, &[&str]) -> Result<Output, Error>,
}

/// The builtin function table.
///
/// Built once at engine construction and read-only afterwards.
#[derive(Debug)]
pub(crate) struct Registry {
    table: IndexMap<&'static str, Builtin>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    pub(crate) fn new() -> Self {
        let table = IndexMap::from([
            ("print", Builtin { arity: None, run: builtins::print }),
            ("display", Builtin { arity: None, run: builtins::display }),
            ("display_all", Builtin { arity: Some(0), run: builtins::display_all }),
            ("eval", Builtin { arity: Some(1), run: builtins::eval }),
            ("compare", Builtin { arity: Some(2), run: builtins::compare }),
            ("table", Builtin { arity: Some(1), run: builtins::table }),
            ("copy", Builtin { arity: Some(2), run: builtins::copy }),
            ("remove", Builtin { arity: Some(1), run: builtins::remove }),
            ("remove_all", Builtin { arity: Some(0), run: builtins::remove_all }),
        ]);

        Self { table }
    }

    /// Parse a `NAME(args)` call cursor (the `call` keyword already stripped)
    /// and invoke the named builtin.
    pub(crate) fn call(&self, store: &mut VariableStore, src: &str) -> Result<Output, Error> {
        check_balance(src)?;

        let (name, parts) = split_name_args(src.trim())?;
        let name = name.trim();
        check_qualifier(name, "function name")?;

        let builtin = self
            .table
            .get(name)
            .ok_or_else(|| Error::UndefinedFunction(name.to_string()))?;

        let args: Vec<&str> = parts.into_iter().flatten().map(str::trim).collect();
        if let Some(expected) = builtin.arity {
            if args.len() != expected {
                return Err(Error::FunctionArity {
                    name: name.to_string(),
                    expected,
                    actual: args.len(),
                });
            }
        }

        debug!("calling builtin '{name}' with {} argument(s)", args.len());

        (builtin.run)(store, &args)
    }
}
