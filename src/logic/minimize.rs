use crate::expression::{Constant, Expression, FALSE, Operator, TRUE, build};
use crate::logic::negate::negate_or_wrap;

/// Bottom-up rewrite into the restricted algebra: `and`, `or`, `not`, `lt`,
/// `le`, `is_null`, `is_not_null`, `in`, `not_in`, `like`, `not_like`.
/// Equality becomes a pair of `le`s, ranges and memberships expand, and the
/// comparison direction of `gt`/`ge` is normalized away.
pub(crate) fn minimize(e: &Expression) -> Expression {
    match e {
        Expression::Reference(_) | Expression::Constant(_) => e.clone(),
        Expression::Call { op, args } => {
            let mut args: Vec<Expression> = args.iter().map(minimize).collect();
            match op {
                Operator::And => build::and(args),
                Operator::Or => build::or(args),
                Operator::Not => build::not(args.swap_remove(0)),
                Operator::Eq => {
                    let (l, r) = (args[0].clone(), args[1].clone());
                    if l == TRUE {
                        r
                    } else if r == TRUE {
                        l
                    } else if l == FALSE {
                        negate_or_wrap(&r)
                    } else if r == FALSE {
                        negate_or_wrap(&l)
                    } else {
                        build::and(vec![
                            build::le(l.clone(), r.clone()),
                            build::le(r, l),
                        ])
                    }
                }
                Operator::Ne => {
                    let (l, r) = (args[0].clone(), args[1].clone());
                    build::or(vec![build::lt(l.clone(), r.clone()), build::lt(r, l)])
                }
                Operator::Lt | Operator::Le => Expression::Call { op: *op, args },
                Operator::Gt => build::lt(args[1].clone(), args[0].clone()),
                Operator::Ge => build::le(args[1].clone(), args[0].clone()),
                Operator::Between => {
                    let (x, low, high) = (args[0].clone(), args[1].clone(), args[2].clone());
                    build::and(vec![build::le(low, x.clone()), build::le(x, high)])
                }
                Operator::NotBetween => {
                    let (x, low, high) = (args[0].clone(), args[1].clone(), args[2].clone());
                    build::or(vec![build::lt(x.clone(), low), build::lt(high, x)])
                }
                Operator::IsNull | Operator::IsNotNull => Expression::Call { op: *op, args },
                Operator::In => {
                    if let Some(elements) = literal_elements(&args[1]) {
                        let x = &args[0];
                        return build::or(
                            elements
                                .into_iter()
                                .map(|v| {
                                    let v = Expression::Constant(v);
                                    build::and(vec![
                                        build::le(x.clone(), v.clone()),
                                        build::le(v, x.clone()),
                                    ])
                                })
                                .collect(),
                        );
                    }
                    Expression::Call { op: Operator::In, args }
                }
                Operator::NotIn => {
                    if let Some(elements) = literal_elements(&args[1]) {
                        if elements.is_empty() {
                            return Expression::Call {
                                op: Operator::IsNotNull,
                                args: vec![args[0].clone()],
                            };
                        }
                        let x = &args[0];
                        return build::and(
                            elements
                                .into_iter()
                                .map(|v| {
                                    let v = Expression::Constant(v);
                                    build::or(vec![
                                        build::lt(x.clone(), v.clone()),
                                        build::lt(v, x.clone()),
                                    ])
                                })
                                .collect(),
                        );
                    }
                    Expression::Call { op: Operator::NotIn, args }
                }
                Operator::Like | Operator::NotLike => Expression::Call { op: *op, args },
            }
        }
    }
}

fn literal_elements(e: &Expression) -> Option<Vec<Constant>> {
    match e {
        Expression::Constant(c) => c.elements(),
        _ => None,
    }
}
