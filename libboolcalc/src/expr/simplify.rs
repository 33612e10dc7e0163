//! Bottom-up constant folding.

use super::Expr;

/// Fold every subtree whose leaves are all literals into a single literal.
///
/// Subtrees containing a parameter reference have no concrete value; within
/// them, any child that does fold is replaced in place.
pub(crate) fn simplify(expr: &mut Expr) {
    if let Some(value) = fold(expr) {
        if !matches!(expr, Expr::Literal(_)) {
            *expr = Expr::Literal(value);
        }
    }
}

/// The concrete value of `expr`, if it has one.
fn fold(expr: &mut Expr) -> Option<bool> {
    match expr {
        Expr::Literal(value) => Some(*value),
        Expr::Param { .. } => None,
        Expr::Operation { op, children } => {
            let values: Vec<Option<bool>> = children.iter_mut().map(fold).collect();

            // Concrete children of a non-concrete operation are folded in
            // place; a fully concrete operation is replaced wholesale by the
            // caller instead.
            for (child, value) in children.iter_mut().zip(&values) {
                if let Some(value) = *value {
                    if !matches!(child, Expr::Literal(_)) {
                        *child = Expr::Literal(value);
                    }
                }
            }

            let concrete = values.into_iter().collect::<Option<Vec<_>>>()?;
            Some(op.apply(&concrete))
        }
    }
}
