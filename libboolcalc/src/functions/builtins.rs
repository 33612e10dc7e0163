//! The builtin function implementations.

use super::Output;
use crate::{
    cursor::check_qualifier,
    expr::{
        calc::{calculate, Assignments},
        evaluate::evaluate,
    },
    vars::{VarDecl, Variable, VariableStore},
    Error,
};

/// Look up an argument that must name a stored variable.
fn existing<'a>(
    store: &'a VariableStore,
    arg: &str,
    function: &'static str,
) -> Result<&'a Variable, Error> {
    check_qualifier(arg, "variable name")?;

    store.get(arg).ok_or_else(|| Error::NotAVariable {
        arg: arg.to_string(),
        function,
    })
}

/// Render `value` as a truth-table cell.
fn bit(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

/// Echo each argument on its own line.
pub(super) fn print(_store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    let mut output = Output::new();
    for arg in args {
        output.push(*arg);
    }
    Ok(output)
}

/// Emit the canonical form of each named variable.
pub(super) fn display(store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    if args.is_empty() {
        return Err(Error::EmptyArguments("display"));
    }

    // Validate every name up front; a failing call emits nothing.
    for arg in args {
        existing(store, arg, "display")?;
    }

    let mut output = Output::new();
    for arg in args {
        let variable = store.get(arg).expect("validated above");
        output.push(variable.to_string());
    }
    Ok(output)
}

/// Emit every stored variable, one line each, in insertion order.
pub(super) fn display_all(store: &mut VariableStore, _args: &[&str]) -> Result<Output, Error> {
    let mut output = Output::new();
    for variable in store.iter() {
        output.push(variable.to_string());
    }
    Ok(output)
}

/// Rewrite the named variable's body in place and emit the result.
pub(super) fn eval(store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    existing(store, args[0], "eval")?;

    let variable = store.get_mut(args[0]).expect("validated above");
    evaluate(variable.body_mut());

    Ok(Output::from(variable.to_string()))
}

/// Report whether two variables agree on every argument assignment.
pub(super) fn compare(store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    let first = existing(store, args[0], "compare")?;
    let second = existing(store, args[1], "compare")?;

    let mut report = format!(
        "Variables '{}' and '{}' are ",
        first.name(),
        second.name()
    );

    if first.param_count() != second.param_count() {
        report.push_str("not equal. Different number of parameters.");
        return Ok(Output::from(report));
    }

    for row in Assignments::new(first.param_count()) {
        if calculate(first.body(), &row) != calculate(second.body(), &row) {
            let rendered: Vec<_> = row.iter().map(|v| bit(*v)).collect();
            report.push_str(&format!(
                "not equal. Different results on parameter combination ({}).",
                rendered.join(", ")
            ));
            return Ok(Output::from(report));
        }
    }

    report.push_str("equal.");
    Ok(Output::from(report))
}

/// Emit a bordered truth table for the named variable.
pub(super) fn table(store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    let variable = existing(store, args[0], "table")?;

    let mut header = String::new();
    for param in variable.params() {
        header.push_str(&format!("| {param} "));
    }
    header.push_str(&format!("|| {} |", variable.name()));

    let border = "-".repeat(header.len());

    let mut output = Output::new();
    output.push(border.clone());
    output.push(header);
    output.push(border.clone());

    for row in Assignments::new(variable.param_count()) {
        let value = calculate(variable.body(), &row);

        // Cell values are right-aligned to the width of the column name.
        let mut line = String::new();
        for (param, cell) in variable.params().iter().zip(&row) {
            line.push_str(&format!("| {:>width$} ", bit(*cell), width = param.len()));
        }
        line.push_str(&format!(
            "|| {:>width$} |",
            bit(value),
            width = variable.name().len()
        ));
        output.push(line);
    }

    output.push(border);
    Ok(output)
}

/// Insert a fresh variable holding a clone of an existing one.
pub(super) fn copy(store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    check_qualifier(args[0], "variable name")?;
    if store.get(args[0]).is_some() {
        return Err(Error::AlreadyAVariable {
            arg: args[0].to_string(),
            function: "copy",
        });
    }

    let source = existing(store, args[1], "copy")?;

    let mut decl = VarDecl::named(args[0]);
    for param in source.params() {
        decl.add_param(param)?;
    }
    let copied = Variable::new(decl, source.body().clone());

    Ok(Output::from(store.insert(copied).to_string()))
}

/// Remove one variable by name.
pub(super) fn remove(store: &mut VariableStore, args: &[&str]) -> Result<Output, Error> {
    existing(store, args[0], "remove")?;
    store.remove(args[0])?;

    Ok(Output::from(format!("Variable '{}' was removed.", args[0])))
}

/// Empty the store.
pub(super) fn remove_all(store: &mut VariableStore, _args: &[&str]) -> Result<Output, Error> {
    store.clear();

    Ok(Output::from("All variables were removed.".to_string()))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::expr::parser::Parser;

    /// Build a store containing each `name := body` line.
    fn store(lines: &[&str]) -> VariableStore {
        let mut store = VariableStore::default();
        for line in lines {
            let variable = Parser::new(&store).parse(line).unwrap();
            store.insert(variable);
        }
        store
    }

    #[test]
    fn test_print() {
        let mut s = store(&[]);
        let output = print(&mut s, &["bananas", "1 & 0"]).unwrap();
        assert_eq!(output.to_string(), "bananas\n1 & 0");
    }

    #[test]
    fn test_display() {
        let mut s = store(&["and2(a, b) := a & b", "x := 1"]);

        let output = display(&mut s, &["x", "and2"]).unwrap();
        assert_eq!(output.to_string(), "x := 1\nand2(a, b) := (a & b)");

        assert!(matches!(
            display(&mut s, &[]),
            Err(Error::EmptyArguments("display"))
        ));
        assert!(matches!(
            display(&mut s, &["bananas"]),
            Err(Error::NotAVariable { .. })
        ));
    }

    #[test]
    fn test_display_all() {
        let mut s = store(&["and2(a, b) := a & b", "x := 1"]);
        let output = display_all(&mut s, &[]).unwrap();
        assert_eq!(output.to_string(), "and2(a, b) := (a & b)\nx := 1");
    }

    #[test]
    fn test_eval() {
        let mut s = store(&["p(a, b) := a = b = a"]);
        let output = eval(&mut s, &["p"]).unwrap();
        assert_eq!(output.to_string(), "p(a, b) := b");
    }

    #[test]
    fn test_compare_equal() {
        let mut s = store(&["f(a, b) := a & b", "f2(a, b) := b & a"]);
        let output = compare(&mut s, &["f", "f2"]).unwrap();
        assert_eq!(output.to_string(), "Variables 'f' and 'f2' are equal.");
    }

    #[test]
    fn test_compare_not_equal() {
        let mut s = store(&["f(a, b) := a & b", "g(a, b) := a | b"]);
        let output = compare(&mut s, &["f", "g"]).unwrap();
        assert_eq!(
            output.to_string(),
            "Variables 'f' and 'g' are not equal. \
             Different results on parameter combination (0, 1)."
        );
    }

    #[test]
    fn test_compare_different_parameter_counts() {
        let mut s = store(&["f(a, b) := a & b", "g(a) := a"]);
        let output = compare(&mut s, &["f", "g"]).unwrap();
        assert_eq!(
            output.to_string(),
            "Variables 'f' and 'g' are not equal. Different number of parameters."
        );
    }

    #[test]
    fn test_table() {
        let mut s = store(&["and2(a, b) := a & b"]);
        let output = table(&mut s, &["and2"]).unwrap();
        assert_eq!(
            output.to_string(),
            "-----------------\n\
             | a | b || and2 |\n\
             -----------------\n\
             | 0 | 0 ||    0 |\n\
             | 0 | 1 ||    0 |\n\
             | 1 | 0 ||    0 |\n\
             | 1 | 1 ||    1 |\n\
             -----------------"
        );
    }

    #[test]
    fn test_table_parameterless() {
        let mut s = store(&["x := 1"]);
        let output = table(&mut s, &["x"]).unwrap();
        assert_eq!(
            output.to_string(),
            "------\n\
             || x |\n\
             ------\n\
             || 1 |\n\
             ------"
        );
    }

    #[test]
    fn test_copy() {
        let mut s = store(&["and2(a, b) := a & b"]);

        let output = copy(&mut s, &["twin", "and2"]).unwrap();
        assert_eq!(output.to_string(), "twin(a, b) := (a & b)");
        assert!(s.get("twin").is_some());

        // The target name must be fresh, the source must exist.
        assert!(matches!(
            copy(&mut s, &["and2", "twin"]),
            Err(Error::AlreadyAVariable { .. })
        ));
        assert!(matches!(
            copy(&mut s, &["fresh", "bananas"]),
            Err(Error::NotAVariable { .. })
        ));
    }

    #[test]
    fn test_remove() {
        let mut s = store(&["x := 1"]);

        let output = remove(&mut s, &["x"]).unwrap();
        assert_eq!(output.to_string(), "Variable 'x' was removed.");
        assert!(s.get("x").is_none());

        assert!(matches!(
            remove(&mut s, &["x"]),
            Err(Error::NotAVariable { .. })
        ));
    }

    #[test]
    fn test_remove_all() {
        let mut s = store(&["x := 1", "y := 0"]);
        let output = remove_all(&mut s, &[]).unwrap();
        assert_eq!(output.to_string(), "All variables were removed.");
        assert_eq!(s.iter().count(), 0);
    }
}
