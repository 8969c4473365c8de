use crate::expression::{Expression, FALSE, Operator, build};
use crate::logic::implies::implies_minimized;
use crate::logic::minimize::minimize;
use crate::logic::negate::negate_or_wrap;

/// Minimize, rewrite into a disjunction of conjunctions of literals, then
/// drop every conjunct that contains a contradicting pair of literals. A
/// disjunction whose conjuncts all collapse is `FALSE`.
pub fn minimized_dnf(e: &Expression) -> Expression {
    let minimized = minimize(e);
    let flat = dnf(&minimized, false);
    minimize_dnf(&flat)
}

fn dnf(e: &Expression, inverted: bool) -> Expression {
    if let Expression::Call { op, args } = e {
        if *op == Operator::Not {
            return dnf(&args[0], !inverted);
        }
        if (*op == Operator::Or && inverted) || (*op == Operator::And && !inverted) {
            return expand(args, inverted);
        }
        if (*op == Operator::Or && !inverted) || (*op == Operator::And && inverted) {
            let mut new_args = Vec::with_capacity(args.len());
            for arg in args {
                let new_arg = dnf(arg, inverted);
                if let Expression::Call { op: Operator::Or, args: inner } = new_arg {
                    new_args.extend(inner);
                } else {
                    new_args.push(new_arg);
                }
            }
            return build::or(new_args);
        }
    }
    if inverted { negate_or_wrap(e) } else { e.clone() }
}

/// Distribute a conjunction of already-normalized children: the Cartesian
/// product of their disjuncts, flattened into one disjunction of conjuncts.
fn expand(args: &[Expression], inverted: bool) -> Expression {
    let mut clauses: Vec<Vec<Expression>> = vec![Vec::new()];
    for arg in args {
        match dnf(arg, inverted) {
            Expression::Call { op: Operator::Or, args: disjuncts } => {
                let mut distributed = Vec::with_capacity(disjuncts.len() * clauses.len());
                for disjunct in &disjuncts {
                    for clause in &clauses {
                        let mut extended = clause.clone();
                        if let Expression::Call { op: Operator::And, args: conj } = disjunct {
                            extended.extend(conj.iter().cloned());
                        } else {
                            extended.push(disjunct.clone());
                        }
                        distributed.push(extended);
                    }
                }
                clauses = distributed;
            }
            Expression::Call { op: Operator::And, args: conj } => {
                for clause in &mut clauses {
                    clause.extend(conj.iter().cloned());
                }
            }
            literal => {
                for clause in &mut clauses {
                    clause.push(literal.clone());
                }
            }
        }
    }
    build::or(clauses.into_iter().map(build::and).collect())
}

fn minimize_dnf(e: &Expression) -> Expression {
    match e {
        Expression::Call { op: Operator::Or, args } => {
            let mut kept = Vec::with_capacity(args.len());
            for arg in args {
                let minimized = minimize_dnf(arg);
                if minimized != FALSE {
                    kept.push(minimized);
                }
            }
            if kept.is_empty() {
                return FALSE;
            }
            build::or(kept)
        }
        Expression::Call { op: Operator::And, args } => {
            for (i, left) in args.iter().enumerate() {
                for right in &args[i + 1..] {
                    if implies_minimized(left, &negate_or_wrap(right))
                        || implies_minimized(right, &negate_or_wrap(left))
                    {
                        return FALSE;
                    }
                }
            }
            build::and(args.clone())
        }
        other => other.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::build::*;

    // --- normal form construction ----------------------------------------

    #[test]
    fn conjunction_distributes_over_disjunction() {
        // x=1 and (y=1 or y=2)  ==  (x=1 and y=1) or (x=1 and y=2)
        let a = and(vec![
            eq(reference("x"), number(1.0)),
            or(vec![
                eq(reference("y"), number(1.0)),
                eq(reference("y"), number(2.0)),
            ]),
        ]);
        let b = or(vec![
            and(vec![
                eq(reference("x"), number(1.0)),
                eq(reference("y"), number(1.0)),
            ]),
            and(vec![
                eq(reference("x"), number(1.0)),
                eq(reference("y"), number(2.0)),
            ]),
        ]);
        assert_eq!(minimized_dnf(&a), minimized_dnf(&b));
    }

    #[test]
    fn double_negation_vanishes() {
        let samples = [
            lt(reference("x"), number(1.0)),
            and(vec![
                le(reference("x"), number(1.0)),
                or(vec![
                    is_null(reference("y")),
                    like(reference("s"), string("a%")),
                ]),
            ]),
        ];
        for e in samples {
            assert_eq!(minimized_dnf(&not(not(e.clone()))), minimized_dnf(&e));
        }
    }

    #[test]
    fn de_morgan_holds_through_dnf() {
        let a = lt(reference("x"), number(1.0));
        let b = lt(reference("y"), number(2.0));
        assert_eq!(
            minimized_dnf(&not(and(vec![a.clone(), b.clone()]))),
            minimized_dnf(&or(vec![not(a.clone()), not(b.clone())]))
        );
        assert_eq!(
            minimized_dnf(&not(or(vec![a.clone(), b.clone()]))),
            minimized_dnf(&and(vec![not(a), not(b)]))
        );
    }

    #[test]
    fn negation_is_pushed_to_leaves() {
        let e = not(and(vec![
            lt(reference("x"), number(1.0)),
            is_null(reference("y")),
        ]));
        assert_eq!(
            minimized_dnf(&e),
            or(vec![
                le(number(1.0), reference("x")),
                is_not_null(reference("y")),
            ])
        );
    }

    // --- contradiction pruning --------------------------------------------

    #[test]
    fn contradicting_bounds_collapse_to_false() {
        // x < 1 and 1 < x
        let e = and(vec![
            lt(reference("x"), number(1.0)),
            lt(number(1.0), reference("x")),
        ]);
        assert_eq!(minimized_dnf(&e), FALSE);

        // x < 1 and x > 2
        let e = and(vec![
            lt(reference("x"), number(1.0)),
            gt(reference("x"), number(2.0)),
        ]);
        assert_eq!(minimized_dnf(&e), FALSE);
    }

    #[test]
    fn only_contradicting_disjuncts_are_dropped() {
        let live = lt(reference("y"), number(5.0));
        let dead = and(vec![
            lt(reference("x"), number(1.0)),
            lt(number(2.0), reference("x")),
        ]);
        assert_eq!(minimized_dnf(&or(vec![dead, live.clone()])), live);
    }

    #[test]
    fn satisfiable_conjuncts_survive() {
        let e = and(vec![
            le(number(1.0), reference("x")),
            le(reference("x"), number(3.0)),
        ]);
        assert_eq!(minimized_dnf(&e), e);
    }
}
