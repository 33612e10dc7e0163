//! Algebraic rewriting: shrink a tree under boolean identities without
//! changing its truth table.
//!
//! Runs bottom-up with operator-specific rules, assuming the normalizer has
//! already flattened same-operator chains. Any non-negation node left with a
//! single child is replaced by that child.

use super::{Expr, Op};

/// Rewrite `expr` into its reduced form in place.
pub(crate) fn evaluate(expr: &mut Expr) {
    let Expr::Operation { op, children } = expr else {
        return;
    };
    let op = *op;

    for child in &mut *children {
        evaluate(child);
    }

    let folded = match op {
        Op::Not => not_rules(children),
        Op::And => junction_rules(children, false),
        Op::Or => junction_rules(children, true),
        Op::Imply => imply_rules(children),
        Op::Eq => parity_rules(children, true),
        Op::Xor => parity_rules(children, false),
    };

    if let Some(new_expr) = folded {
        *expr = new_expr;
        return;
    }

    if op != Op::Not && children.len() == 1 {
        let child = children.pop().expect("length checked");
        *expr = child;
    }
}

/// Double negation: `!!x` is `x`.
fn not_rules(children: &mut [Expr]) -> Option<Expr> {
    debug_assert_eq!(children.len(), 1);

    match &mut children[0] {
        Expr::Operation {
            op: Op::Not,
            children: inner,
        } => Some(inner.pop().expect("negation has one child")),
        _ => None,
    }
}

/// Conjunction (`absorbing == false`) and disjunction (`absorbing == true`)
/// share their rules with the literal roles swapped.
fn junction_rules(children: &mut Vec<Expr>, absorbing: bool) -> Option<Expr> {
    // Any absorbing literal collapses the whole node.
    if children.iter().any(|c| c.is_literal(absorbing)) {
        return Some(Expr::Literal(absorbing));
    }

    // Identity literals contribute nothing.
    children.retain(|c| !c.is_literal(!absorbing));

    // `x & x` is `x`: drop repeats, keeping the first occurrence.
    remove_duplicates(children);

    children.is_empty().then(|| Expr::Literal(!absorbing))
}

/// Implication is neither commutative nor associative; every rule below
/// respects the left-to-right fold. The head-pair identities apply only at
/// positions 0/1 - deeper in the chain they are unsound.
fn imply_rules(children: &mut Vec<Expr>) -> Option<Expr> {
    loop {
        if children.len() < 2 {
            // A single survivor is promoted by the caller.
            return None;
        }

        // `x -> 1` is `1`, terminally.
        if children.last().is_some_and(|c| c.is_literal(true)) {
            return Some(Expr::Literal(true));
        }

        // `x -> 1 -> rest` is `1 -> rest` is `rest`: a true operand erases
        // everything up to and including itself.
        if let Some(at) = children.iter().rposition(|c| c.is_literal(true)) {
            children.drain(..=at);
            continue;
        }

        // `0 -> x -> rest` is `1 -> rest` is `rest`.
        if children[0].is_literal(false) {
            if children.len() == 2 {
                return Some(Expr::Literal(true));
            }
            children.drain(..2);
            continue;
        }

        // `x -> x -> rest` is `1 -> rest` is `rest`.
        if children[0] == children[1] {
            if children.len() == 2 {
                return Some(Expr::Literal(true));
            }
            children.drain(..2);
            continue;
        }

        // `!x -> x` is `x`.
        let negated_head = matches!(
            (&children[0], &children[1]),
            (
                Expr::Operation { op: Op::Not, children: inner },
                second,
            ) if inner[0] == *second
        );
        if negated_head {
            children.remove(0);
            continue;
        }

        // `x -> !x` is `!x`.
        let negated_second = matches!(
            (&children[0], &children[1]),
            (
                first,
                Expr::Operation { op: Op::Not, children: inner },
            ) if inner[0] == *first
        );
        if negated_second {
            children.remove(0);
            continue;
        }

        // `!x -> 0` is `x`.
        if is_negation(&children[0]) && children[1].is_literal(false) {
            children.remove(1);
            unwrap_negation(&mut children[0]);
            continue;
        }

        return None;
    }
}

/// Equality (`identity == true`) and exclusive-or (`identity == false`)
/// share their rules with the literal roles swapped.
fn parity_rules(children: &mut Vec<Expr>, identity: bool) -> Option<Expr> {
    // Identity literals contribute nothing to the fold.
    children.retain(|c| !c.is_literal(identity));

    // Equal operands cancel pairwise: `x = x` folds to the identity.
    absorb_duplicates(children);

    // Negation pairs unwrap (`!x = !y` is `x = y`), and a leftover negation
    // absorbs a non-identity literal (`!x = 0` is `x`, `!x + 1` is `x`).
    absorb_negations(children, !identity);
    absorb_duplicates(children);

    children.is_empty().then(|| Expr::Literal(identity))
}

/// Remove repeated operands, keeping the first occurrence of each.
fn remove_duplicates(children: &mut Vec<Expr>) {
    let mut i = 0;
    while i < children.len() {
        let mut j = i + 1;
        while j < children.len() {
            if children[i] == children[j] {
                children.remove(j);
            } else {
                j += 1;
            }
        }
        i += 1;
    }
}

/// Remove *both* operands of every equal pair.
fn absorb_duplicates(children: &mut Vec<Expr>) {
    let mut i = 0;
    while i < children.len() {
        let mut removed = false;
        let mut j = i + 1;
        while j < children.len() {
            if children[i] == children[j] {
                children.remove(j);
                children.remove(i);
                removed = true;
                break;
            }
            j += 1;
        }
        if !removed {
            i += 1;
        }
    }
}

/// Unwrap negation operands pairwise; an odd one out combines with a
/// `literal` operand by unwrapping the negation and dropping the literal.
fn absorb_negations(children: &mut Vec<Expr>, literal: bool) {
    let mut pending = None;
    for index in 0..children.len() {
        if !is_negation(&children[index]) {
            continue;
        }
        match pending.take() {
            None => pending = Some(index),
            Some(prev) => {
                unwrap_negation(&mut children[prev]);
                unwrap_negation(&mut children[index]);
            }
        }
    }

    if let Some(prev) = pending {
        if let Some(at) = children.iter().position(|c| c.is_literal(literal)) {
            unwrap_negation(&mut children[prev]);
            children.remove(at);
        }
    }
}

fn is_negation(expr: &Expr) -> bool {
    matches!(
        expr,
        Expr::Operation {
            op: Op::Not,
            ..
        }
    )
}

/// Replace a negation node by its child.
fn unwrap_negation(expr: &mut Expr) {
    let Expr::Operation {
        op: Op::Not,
        children,
    } = expr
    else {
        unreachable!("caller checked for a negation");
    };

    let child = children.pop().expect("negation has one child");
    *expr = child;
}
