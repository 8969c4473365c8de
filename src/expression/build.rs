//! Constructor functions for the expression algebra. `and`/`or` canonicalize
//! on construction: nested same-operator children are absorbed, duplicate
//! arguments dropped, a single survivor unwrapped, and the empty forms
//! collapse to `TRUE`/`FALSE`.

use ordered_float::OrderedFloat;

use crate::expression::{Constant, Expression, FALSE, Operator, TRUE};

pub fn and(args: Vec<Expression>) -> Expression {
    nary(Operator::And, args, TRUE)
}

pub fn or(args: Vec<Expression>) -> Expression {
    nary(Operator::Or, args, FALSE)
}

fn nary(op: Operator, args: Vec<Expression>, empty: Expression) -> Expression {
    let mut flat = Vec::with_capacity(args.len());
    for arg in args {
        match arg {
            Expression::Call { op: inner, args: inner_args } if inner == op => {
                flat.extend(inner_args);
            }
            other => flat.push(other),
        }
    }
    let mut unique: Vec<Expression> = Vec::with_capacity(flat.len());
    for arg in flat {
        if !unique.contains(&arg) {
            unique.push(arg);
        }
    }
    match unique.len() {
        0 => empty,
        1 => unique.swap_remove(0),
        _ => Expression::Call { op, args: unique },
    }
}

/// A raw `not` wrapper. The semantic pushdown lives in the logic layer; this
/// only records the node.
pub fn not(arg: Expression) -> Expression {
    Expression::Call { op: Operator::Not, args: vec![arg] }
}

fn binary(op: Operator, left: Expression, right: Expression) -> Expression {
    Expression::Call { op, args: vec![left, right] }
}

pub fn eq(left: Expression, right: Expression) -> Expression {
    binary(Operator::Eq, left, right)
}

pub fn ne(left: Expression, right: Expression) -> Expression {
    binary(Operator::Ne, left, right)
}

pub fn lt(left: Expression, right: Expression) -> Expression {
    binary(Operator::Lt, left, right)
}

pub fn le(left: Expression, right: Expression) -> Expression {
    binary(Operator::Le, left, right)
}

pub fn gt(left: Expression, right: Expression) -> Expression {
    binary(Operator::Gt, left, right)
}

pub fn ge(left: Expression, right: Expression) -> Expression {
    binary(Operator::Ge, left, right)
}

pub fn between(expr: Expression, low: Expression, high: Expression) -> Expression {
    Expression::Call { op: Operator::Between, args: vec![expr, low, high] }
}

pub fn not_between(expr: Expression, low: Expression, high: Expression) -> Expression {
    Expression::Call { op: Operator::NotBetween, args: vec![expr, low, high] }
}

pub fn is_null(expr: Expression) -> Expression {
    Expression::Call { op: Operator::IsNull, args: vec![expr] }
}

pub fn is_not_null(expr: Expression) -> Expression {
    Expression::Call { op: Operator::IsNotNull, args: vec![expr] }
}

pub fn is_in(expr: Expression, array: Expression) -> Expression {
    binary(Operator::In, expr, array)
}

pub fn not_in(expr: Expression, array: Expression) -> Expression {
    binary(Operator::NotIn, expr, array)
}

pub fn like(expr: Expression, pattern: Expression) -> Expression {
    binary(Operator::Like, expr, pattern)
}

pub fn like_escape(expr: Expression, pattern: Expression, escape: Expression) -> Expression {
    Expression::Call { op: Operator::Like, args: vec![expr, pattern, escape] }
}

pub fn not_like(expr: Expression, pattern: Expression) -> Expression {
    binary(Operator::NotLike, expr, pattern)
}

pub fn not_like_escape(expr: Expression, pattern: Expression, escape: Expression) -> Expression {
    Expression::Call { op: Operator::NotLike, args: vec![expr, pattern, escape] }
}

pub fn reference(name: impl Into<String>) -> Expression {
    Expression::Reference(name.into())
}

pub fn string(s: impl Into<Vec<u8>>) -> Expression {
    Expression::Constant(Constant::string(s))
}

pub fn number(n: f64) -> Expression {
    Expression::Constant(Constant::number(n))
}

pub fn boolean(b: bool) -> Expression {
    Expression::Constant(Constant::Bool(b))
}

pub fn null() -> Expression {
    Expression::Constant(Constant::Null)
}

pub fn string_array(items: &[&str]) -> Expression {
    Expression::Constant(Constant::StringArray(
        items.iter().map(|s| s.as_bytes().to_vec()).collect(),
    ))
}

pub fn number_array(items: &[f64]) -> Expression {
    Expression::Constant(Constant::NumberArray(
        items.iter().map(|n| OrderedFloat(*n)).collect(),
    ))
}

pub fn bool_array(items: &[bool]) -> Expression {
    Expression::Constant(Constant::BoolArray(items.to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn and_flattens_and_deduplicates() {
        let x = lt(reference("x"), number(1.0));
        let y = lt(reference("y"), number(2.0));
        let nested = and(vec![x.clone(), and(vec![y.clone(), x.clone()])]);
        assert_eq!(nested, and(vec![x, y]));
    }

    #[test]
    fn or_flattens_and_deduplicates() {
        let x = le(reference("x"), number(1.0));
        let y = le(reference("y"), number(2.0));
        let nested = or(vec![or(vec![x.clone(), y.clone()]), y.clone()]);
        assert_eq!(nested, or(vec![x, y]));
    }

    #[test]
    fn empty_and_singleton_forms_collapse() {
        assert_eq!(and(vec![]), TRUE);
        assert_eq!(or(vec![]), FALSE);

        let x = reference("x");
        assert_eq!(and(vec![x.clone()]), x);
        assert_eq!(or(vec![x.clone()]), x);
        assert_eq!(and(vec![x.clone(), x.clone()]), x);
    }

    #[test]
    fn mixed_operator_children_are_not_absorbed() {
        let inner = or(vec![reference("a"), reference("b")]);
        let outer = and(vec![inner.clone(), reference("c")]);
        match &outer {
            Expression::Call { op: Operator::And, args } => {
                assert_eq!(args.len(), 2);
                assert_eq!(args[0], inner);
            }
            other => panic!("expected and-call, got {other}"),
        }
    }
}
