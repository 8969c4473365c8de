use std::cmp::Ordering;

use crate::expression::{Constant, Expression, Input, Operator, Truth, like_match};

impl Expression {
    /// Three-valued evaluation under an input environment. Covers the whole
    /// recognized operator set, since witness search evaluates expressions
    /// before minimization.
    pub fn evaluate(&self, input: &Input) -> Truth {
        match self {
            Expression::Reference(_) | Expression::Constant(_) => {
                truth_of(&self.eval_scalar(input))
            }
            Expression::Call { op, args } => match op {
                Operator::And => args
                    .iter()
                    .fold(Truth::True, |acc, arg| acc.and(arg.evaluate(input))),
                Operator::Or => args
                    .iter()
                    .fold(Truth::False, |acc, arg| acc.or(arg.evaluate(input))),
                Operator::Not => args[0].evaluate(input).not(),
                Operator::Eq => {
                    eq3(&args[0].eval_scalar(input), &args[1].eval_scalar(input))
                }
                Operator::Ne => {
                    eq3(&args[0].eval_scalar(input), &args[1].eval_scalar(input)).not()
                }
                Operator::Lt => {
                    cmp3(&args[0].eval_scalar(input), &args[1].eval_scalar(input), true)
                }
                Operator::Le => {
                    cmp3(&args[0].eval_scalar(input), &args[1].eval_scalar(input), false)
                }
                Operator::Gt => {
                    cmp3(&args[1].eval_scalar(input), &args[0].eval_scalar(input), true)
                }
                Operator::Ge => {
                    cmp3(&args[1].eval_scalar(input), &args[0].eval_scalar(input), false)
                }
                Operator::Between => {
                    let x = args[0].eval_scalar(input);
                    let low = args[1].eval_scalar(input);
                    let high = args[2].eval_scalar(input);
                    cmp3(&low, &x, false).and(cmp3(&x, &high, false))
                }
                Operator::NotBetween => {
                    let x = args[0].eval_scalar(input);
                    let low = args[1].eval_scalar(input);
                    let high = args[2].eval_scalar(input);
                    cmp3(&x, &low, true).or(cmp3(&high, &x, true))
                }
                Operator::IsNull => {
                    Truth::from_bool(args[0].eval_scalar(input).is_null())
                }
                Operator::IsNotNull => {
                    Truth::from_bool(!args[0].eval_scalar(input).is_null())
                }
                Operator::In => {
                    in3(&args[0].eval_scalar(input), &args[1].eval_scalar(input))
                }
                Operator::NotIn => {
                    in3(&args[0].eval_scalar(input), &args[1].eval_scalar(input)).not()
                }
                Operator::Like => like3(args, input),
                Operator::NotLike => like3(args, input).not(),
            },
        }
    }

    fn eval_scalar(&self, input: &Input) -> Constant {
        match self {
            Expression::Reference(name) => {
                input.get(name).cloned().unwrap_or(Constant::Null)
            }
            Expression::Constant(c) => c.clone(),
            // nested calls do not appear in scalar positions
            Expression::Call { .. } => Constant::Null,
        }
    }
}

fn truth_of(c: &Constant) -> Truth {
    match c {
        Constant::Bool(true) => Truth::True,
        Constant::Bool(false) => Truth::False,
        _ => Truth::Unknown,
    }
}

fn eq3(left: &Constant, right: &Constant) -> Truth {
    if left.is_null() || right.is_null() {
        return Truth::Unknown;
    }
    Truth::from_bool(left == right)
}

fn cmp3(left: &Constant, right: &Constant, strict: bool) -> Truth {
    if left.is_null() || right.is_null() {
        return Truth::Unknown;
    }
    match left.compare(right) {
        Some(Ordering::Less) => Truth::True,
        Some(Ordering::Equal) => Truth::from_bool(!strict),
        Some(Ordering::Greater) => Truth::False,
        None => Truth::Unknown,
    }
}

fn in3(value: &Constant, array: &Constant) -> Truth {
    if value.is_null() || array.is_null() {
        return Truth::Unknown;
    }
    let found = match (value, array) {
        (Constant::String(s), Constant::StringArray(items)) => items.contains(s),
        (Constant::Number(n), Constant::NumberArray(items)) => items.contains(n),
        (Constant::Bool(b), Constant::BoolArray(items)) => items.contains(b),
        (
            _,
            Constant::StringArray(_) | Constant::NumberArray(_) | Constant::BoolArray(_),
        ) => false,
        _ => return Truth::Unknown,
    };
    Truth::from_bool(found)
}

fn like3(args: &[Expression], input: &Input) -> Truth {
    let value = args[0].eval_scalar(input);
    let pattern = args[1].eval_scalar(input);
    let escape = args.get(2).map(|e| e.eval_scalar(input));
    let escape = match &escape {
        None => None,
        Some(Constant::String(s)) => Some(s.as_slice()),
        Some(_) => return Truth::Unknown,
    };
    match (&value, &pattern) {
        (Constant::String(v), Constant::String(p)) => like_match(v, p, escape),
        _ => Truth::Unknown,
    }
}
