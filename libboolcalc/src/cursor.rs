//! Line-level primitives: comment stripping, literal tokens, qualifier and
//! keyword checks.
//!
//! A "cursor" throughout this crate is simply an `&str` subslice of the input
//! line - the std trims cover repositioning, and only the domain-specific
//! checks live here.

use crate::Error;

/// Starts a comment running to the end of the line.
const COMMENT: char = '#';

/// The function-call keyword.
const CALL: &str = "call";

/// Words that can never be used as variable, parameter or function names.
const RESERVED: &[&str] = &["true", "false", "0", "1", CALL];

/// Strip everything from the first `#` to the end of the line.
pub(crate) fn strip_comment(line: &str) -> &str {
    match line.find(COMMENT) {
        Some(at) => &line[..at],
        None => line,
    }
}

/// The boolean value of a literal token, if it is one.
pub(crate) fn literal_value(token: &str) -> Option<bool> {
    match token {
        "0" | "false" => Some(false),
        "1" | "true" => Some(true),
        _ => None,
    }
}

/// True for `[A-Za-z_][A-Za-z0-9_]*` shaped tokens.
fn is_qualifier(token: &str) -> bool {
    let mut chars = token.chars();
    let Some(first) = chars.next() else {
        return false;
    };

    (first.is_alphabetic() || first == '_') && chars.all(|c| c.is_alphanumeric() || c == '_')
}

/// Validate a name: non-empty, a qualifier, and not a reserved word.
///
/// `what` names the role of the token in error messages ("variable name",
/// "parameter name", ...).
pub(crate) fn check_qualifier(token: &str, what: &'static str) -> Result<(), Error> {
    if token.is_empty() {
        return Err(Error::EmptyName(what));
    }

    if !is_qualifier(token) {
        return Err(Error::NotAQualifier {
            what,
            token: token.to_string(),
        });
    }

    if RESERVED.contains(&token) {
        return Err(Error::ReservedWord {
            what,
            token: token.to_string(),
        });
    }

    Ok(())
}

/// The argument part of a `call NAME(args)` line, when the line is one.
///
/// The keyword must be followed by whitespace or the end of the line, so that
/// a variable named e.g. `caller` is not mistaken for a call.
pub(crate) fn strip_call(line: &str) -> Option<&str> {
    let rest = line.trim_start().strip_prefix(CALL)?;

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        return Some(rest.trim_start());
    }

    None
}
