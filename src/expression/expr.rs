use std::fmt;

use crate::expression::{Constant, Operator};

/// An immutable policy expression tree. Built through the constructor
/// functions in [`crate::expression::build`]; never mutated afterwards.
#[derive(Clone, PartialEq, Eq)]
pub enum Expression {
    Reference(String),
    Constant(Constant),
    Call { op: Operator, args: Vec<Expression> },
}

pub const TRUE: Expression = Expression::Constant(Constant::Bool(true));
pub const FALSE: Expression = Expression::Constant(Constant::Bool(false));

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expression::Reference(name) => write!(f, "{name}"),
            Expression::Constant(c) => write!(f, "{c}"),
            Expression::Call { op, args } => {
                write!(f, "{op}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")
            }
        }
    }
}

impl fmt::Debug for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expression({self})")
    }
}
