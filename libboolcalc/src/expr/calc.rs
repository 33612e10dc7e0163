//! Pure evaluation of a body against concrete argument values, and the
//! canonical enumeration of all argument assignments.

use super::Expr;

/// Compute the value of `expr` with parameter `i` bound to `values[i]`.
pub(crate) fn calculate(expr: &Expr, values: &[bool]) -> bool {
    match expr {
        Expr::Literal(value) => *value,
        Expr::Param { index, .. } => values[*index],
        Expr::Operation { op, children } => {
            let child_values: Vec<bool> =
                children.iter().map(|c| calculate(c, values)).collect();
            op.apply(&child_values)
        }
    }
}

/// Iterator over all `2^k` boolean assignments of `k` parameters.
///
/// Rows count up in binary with parameter 0 as the most significant bit, so
/// the all-false row is first and parameter 0 varies slowest - the natural
/// reading order of a truth table.
#[derive(Debug)]
pub(crate) struct Assignments {
    next: Option<Vec<bool>>,
}

impl Assignments {
    pub(crate) fn new(count: usize) -> Self {
        Self {
            next: Some(vec![false; count]),
        }
    }
}

impl Iterator for Assignments {
    type Item = Vec<bool>;

    fn next(&mut self) -> Option<Vec<bool>> {
        let current = self.next.take()?;

        // Binary increment from the least significant (last) slot; running
        // off the front is the carry out, ending the iteration.
        let mut succ = current.clone();
        let mut index = succ.len();
        while index > 0 {
            index -= 1;
            if succ[index] {
                succ[index] = false;
            } else {
                succ[index] = true;
                self.next = Some(succ);
                break;
            }
        }

        Some(current)
    }
}
