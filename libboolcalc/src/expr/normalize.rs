//! Same-operator flattening.

use super::{Expr, Op};

/// Splice the children of same-operator child nodes into their parent,
/// bottom-up.
///
/// Commutative-and-associative operators flatten at every child position.
/// Implication flattens only its first child - splicing any later child
/// would change the left-to-right evaluation order. Negation is never
/// flattened into, but its child is still normalised.
pub(crate) fn normalize(expr: &mut Expr) {
    let Expr::Operation { op, children } = expr else {
        return;
    };
    let op = *op;

    for child in &mut *children {
        normalize(child);
    }

    if op == Op::Not {
        return;
    }

    let movable = op.commutative() && op.associative();
    let mut index = children.len();
    while index > 0 {
        index -= 1;
        if !movable && index != 0 {
            continue;
        }

        let same_op = matches!(&children[index], Expr::Operation { op: child_op, .. } if *child_op == op);
        if same_op {
            let Expr::Operation { children: grand, .. } = children.remove(index) else {
                unreachable!("checked to be an operation");
            };
            children.splice(index..index, grand);
        }
    }
}
