use crate::expression::{Expression, FALSE, Operator, TRUE};
use crate::logic::minimize::minimize;

/// Decides `a ⇒ b` over arbitrary recognized expressions. Sound but not
/// complete: a `true` answer is always justified, a `false` answer may just
/// mean the algebraic rules ran out.
pub fn implies(a: &Expression, b: &Expression) -> bool {
    implies_minimized(&minimize(a), &minimize(b))
}

pub(crate) fn implies_minimized(a: &Expression, b: &Expression) -> bool {
    if *a == FALSE || *b == TRUE {
        return true;
    }
    if let Expression::Call { op: Operator::And, args } = b {
        return args.iter().all(|arg| implies_minimized(a, arg));
    }
    if let Expression::Call { op: Operator::Or, args } = a {
        return args.iter().all(|arg| implies_minimized(arg, b));
    }
    if let Expression::Call { op: Operator::Or, args } = b {
        return args.iter().any(|arg| implies_minimized(a, arg));
    }
    if let Expression::Call { op: Operator::And, args } = a {
        return args.iter().any(|arg| implies_minimized(arg, b));
    }
    if !matches!(a, Expression::Call { .. }) {
        // a bare reference in boolean context asserts its own non-null truth
        if let Expression::Call { op: Operator::IsNotNull, args } = b {
            return *a == args[0];
        }
    }
    if let (
        Expression::Call { op: a_op, args: a_args },
        Expression::Call { op: b_op, args: b_args },
    ) = (a, b)
    {
        let common = common_refs(a_args, b_args);
        if common.is_empty() {
            return false;
        }
        if common.len() == 1 {
            let side = common[0];
            let other = if side == 0 { 1 } else { 0 };
            if let (Some(Expression::Constant(ca)), Some(Expression::Constant(cb))) =
                (a_args.get(other), b_args.get(other))
            {
                // reference-against-constant comparison lattice
                if side == 0 {
                    if *a_op == Operator::Lt
                        && (*b_op == Operator::Lt || *b_op == Operator::Le)
                    {
                        return !cb.less_than(ca);
                    }
                    if *a_op == Operator::Le && *b_op == Operator::Le {
                        return !cb.less_than(ca);
                    }
                    if *a_op == Operator::Le && *b_op == Operator::Lt {
                        return ca.less_than(cb);
                    }
                } else {
                    if *a_op == Operator::Lt
                        && (*b_op == Operator::Lt || *b_op == Operator::Le)
                    {
                        return !ca.less_than(cb);
                    }
                    if *a_op == Operator::Le && *b_op == Operator::Le {
                        return !ca.less_than(cb);
                    }
                    if *a_op == Operator::Le && *b_op == Operator::Lt {
                        return cb.less_than(ca);
                    }
                }
            }
        }
    }
    a == b
}

/// Argument positions where both calls hold a reference with the same name.
fn common_refs(a: &[Expression], b: &[Expression]) -> Vec<usize> {
    a.iter()
        .zip(b.iter())
        .enumerate()
        .filter_map(|(i, pair)| match pair {
            (Expression::Reference(x), Expression::Reference(y)) if x == y => Some(i),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::build::*;

    // --- constants and connectives ----------------------------------------

    #[test]
    fn false_implies_everything_and_everything_implies_true() {
        let samples = [
            reference("a"),
            lt(reference("x"), number(1.0)),
            and(vec![reference("a"), reference("b")]),
        ];
        for e in samples {
            assert!(implies(&FALSE, &e));
            assert!(implies(&e, &TRUE));
        }
        assert!(!implies(&TRUE, &FALSE));
    }

    #[test]
    fn conjunction_implies_disjunction() {
        let a = and(vec![reference("a"), reference("b")]);
        let b = or(vec![reference("a"), reference("b")]);
        assert!(implies(&a, &b));
        assert!(!implies(&b, &a));
        assert!(implies(&b, &b));
    }

    // --- comparison lattice ------------------------------------------------

    #[test]
    fn tighter_upper_bound_implies_looser() {
        let tight = lt(reference("a"), number(1.0));
        let loose = lt(reference("a"), number(2.0));
        assert!(implies(&tight, &loose));
        assert!(!implies(&loose, &tight));
        assert!(implies(&tight, &tight));
    }

    #[test]
    fn strict_bound_implies_equal_non_strict() {
        assert!(implies(
            &lt(reference("a"), number(1.0)),
            &le(reference("a"), number(1.0)),
        ));
        assert!(implies(
            &le(reference("a"), number(1.0)),
            &lt(reference("a"), number(2.0)),
        ));
        assert!(!implies(
            &le(reference("a"), number(1.0)),
            &lt(reference("a"), number(1.0)),
        ));
    }

    #[test]
    fn lattice_works_with_reference_on_the_right() {
        // 2 < a implies 1 < a
        assert!(implies(
            &lt(number(2.0), reference("a")),
            &lt(number(1.0), reference("a")),
        ));
        assert!(!implies(
            &lt(number(1.0), reference("a")),
            &lt(number(2.0), reference("a")),
        ));
        // 2 <= a implies 1 < a
        assert!(implies(
            &le(number(2.0), reference("a")),
            &lt(number(1.0), reference("a")),
        ));
    }

    #[test]
    fn lattice_orders_strings_byte_wise() {
        assert!(implies(
            &lt(reference("s"), string("m")),
            &lt(reference("s"), string("z")),
        ));
        assert!(!implies(
            &lt(reference("s"), string("z")),
            &lt(reference("s"), string("m")),
        ));
    }

    // --- equality through minimization --------------------------------------

    #[test]
    fn point_equality_implies_strict_bound() {
        // a = 2 implies a > 1
        assert!(implies(
            &eq(reference("a"), number(2.0)),
            &gt(reference("a"), number(1.0)),
        ));
        assert!(!implies(
            &gt(reference("a"), number(1.0)),
            &eq(reference("a"), number(2.0)),
        ));
    }

    #[test]
    fn identical_equalities_imply_each_other() {
        let a = eq(reference("a"), number(1.0));
        let b = eq(reference("a"), number(1.0));
        assert!(implies(&a, &b));
        assert!(implies(&b, &a));
    }

    #[test]
    fn absorbed_disjunct_is_implied_per_conjunct_only() {
        // a=1 and b=1  =>  a=1 and (a=2 or b=1)
        let left = and(vec![
            eq(reference("a"), number(1.0)),
            eq(reference("b"), number(1.0)),
        ]);
        let right = and(vec![
            eq(reference("a"), number(1.0)),
            or(vec![
                eq(reference("a"), number(2.0)),
                eq(reference("b"), number(1.0)),
            ]),
        ]);
        assert!(implies(&left, &right));
        // the reverse needs cross-conjunct reasoning (a=1 rules out a=2),
        // which only DNF contradiction pruning performs
        assert!(!implies(&right, &left));
    }

    // --- references and null ------------------------------------------------

    #[test]
    fn bare_reference_implies_its_own_non_null() {
        assert!(implies(&reference("a"), &is_not_null(reference("a"))));
        assert!(!implies(&reference("a"), &is_not_null(reference("b"))));
    }

    #[test]
    fn unrelated_references_do_not_imply() {
        assert!(!implies(
            &lt(reference("a"), number(1.0)),
            &lt(reference("b"), number(1.0)),
        ));
    }
}
