use crate::expression::{Expression, FALSE, Operator, TRUE, build};

/// Negation pushdown over the minimized algebra. `and`/`or` flip through
/// De Morgan, comparisons swap sides, the null/membership/like operators
/// swap with their duals. Any other shape means an un-minimized expression
/// reached this layer, which is a bug in the caller.
pub(crate) fn negate(e: &Expression) -> Expression {
    if *e == TRUE {
        return FALSE;
    }
    if *e == FALSE {
        return TRUE;
    }
    if let Expression::Call { op, args } = e {
        match op {
            Operator::Not => return args[0].clone(),
            Operator::And => return build::or(args.iter().map(negate).collect()),
            Operator::Or => return build::and(args.iter().map(negate).collect()),
            Operator::IsNull => {
                return Expression::Call { op: Operator::IsNotNull, args: args.clone() };
            }
            Operator::IsNotNull => {
                return Expression::Call { op: Operator::IsNull, args: args.clone() };
            }
            Operator::In => {
                return Expression::Call { op: Operator::NotIn, args: args.clone() };
            }
            Operator::NotIn => {
                return Expression::Call { op: Operator::In, args: args.clone() };
            }
            Operator::Like => {
                return Expression::Call { op: Operator::NotLike, args: args.clone() };
            }
            Operator::NotLike => {
                return Expression::Call { op: Operator::Like, args: args.clone() };
            }
            Operator::Lt => return build::le(args[1].clone(), args[0].clone()),
            Operator::Le => return build::lt(args[1].clone(), args[0].clone()),
            _ => {}
        }
    }
    panic!("negation is not defined for {e}");
}

/// Pushdown where it is defined; bare references and non-boolean constants
/// keep a raw `not` wrapper instead.
pub(crate) fn negate_or_wrap(e: &Expression) -> Expression {
    match e {
        Expression::Call { .. } => negate(e),
        _ if *e == TRUE || *e == FALSE => negate(e),
        other => build::not(other.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::build::*;

    #[test]
    fn boolean_constants_flip() {
        assert_eq!(negate(&TRUE), FALSE);
        assert_eq!(negate(&FALSE), TRUE);
    }

    #[test]
    fn double_negation_unwraps() {
        let inner = lt(reference("x"), number(1.0));
        assert_eq!(negate(&not(inner.clone())), inner);
    }

    #[test]
    fn de_morgan_flips_connectives() {
        let e = and(vec![
            lt(reference("x"), number(1.0)),
            le(reference("y"), number(2.0)),
        ]);
        assert_eq!(
            negate(&e),
            or(vec![
                le(number(1.0), reference("x")),
                lt(number(2.0), reference("y")),
            ])
        );
    }

    #[test]
    fn comparisons_swap_sides() {
        assert_eq!(
            negate(&lt(reference("x"), number(1.0))),
            le(number(1.0), reference("x"))
        );
        assert_eq!(
            negate(&le(reference("x"), number(1.0))),
            lt(number(1.0), reference("x"))
        );
    }

    #[test]
    fn null_membership_and_like_swap_with_duals() {
        assert_eq!(negate(&is_null(reference("x"))), is_not_null(reference("x")));
        assert_eq!(negate(&is_not_null(reference("x"))), is_null(reference("x")));
        assert_eq!(
            negate(&is_in(reference("x"), reference("xs"))),
            not_in(reference("x"), reference("xs"))
        );
        assert_eq!(
            negate(&not_like(reference("s"), string("a%"))),
            like(reference("s"), string("a%"))
        );
    }

    #[test]
    fn wrap_keeps_bare_references() {
        assert_eq!(negate_or_wrap(&reference("x")), not(reference("x")));
    }

    #[test]
    #[should_panic(expected = "negation is not defined")]
    fn un_minimized_shapes_panic() {
        negate(&eq(reference("x"), number(1.0)));
    }
}
