//! JSON codec for expressions, the boundary where evaluator responses enter
//! the engine. Constants are plain JSON values, references are
//! `{"ref": name}`, calls are `{"call": op, "args": [...]}`. Decoding is the
//! one place an unknown operator or a wrong arity can surface; past it the
//! operator set is a closed enum.

use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value, json};

use crate::expression::{Constant, Expression, Operator, build};

#[derive(Debug, Clone, PartialEq)]
pub enum WireError {
    UnknownOperator(String),
    BadArity { op: Operator, got: usize },
    MixedArray,
    BadShape(String),
}

impl fmt::Display for WireError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WireError::UnknownOperator(name) => write!(f, "unknown operator \"{name}\""),
            WireError::BadArity { op, got } => {
                write!(f, "operator \"{op}\" does not accept {got} arguments")
            }
            WireError::MixedArray => write!(f, "array constants must be homogeneous"),
            WireError::BadShape(what) => write!(f, "malformed expression node: {what}"),
        }
    }
}

impl std::error::Error for WireError {}

impl Expression {
    pub fn to_wire(&self) -> Value {
        match self {
            Expression::Reference(name) => json!({ "ref": name }),
            Expression::Constant(c) => constant_to_value(c),
            Expression::Call { op, args } => {
                let args: Vec<Value> = args.iter().map(Expression::to_wire).collect();
                json!({ "call": op.name(), "args": args })
            }
        }
    }

    pub fn from_wire(value: &Value) -> Result<Expression, WireError> {
        match value {
            Value::Null => Ok(Expression::Constant(Constant::Null)),
            Value::Bool(b) => Ok(Expression::Constant(Constant::Bool(*b))),
            Value::Number(n) => match n.as_f64() {
                Some(f) => Ok(Expression::Constant(Constant::number(f))),
                None => Err(WireError::BadShape(format!("unrepresentable number {n}"))),
            },
            Value::String(s) => Ok(Expression::Constant(Constant::string(s.as_str()))),
            Value::Array(items) => Ok(Expression::Constant(array_constant(items)?)),
            Value::Object(fields) => object_from_wire(fields),
        }
    }
}

fn object_from_wire(fields: &Map<String, Value>) -> Result<Expression, WireError> {
    if let Some(name) = fields.get("ref") {
        let Value::String(name) = name else {
            return Err(WireError::BadShape("\"ref\" must hold a string".into()));
        };
        return Ok(Expression::Reference(name.clone()));
    }
    let Some(Value::String(name)) = fields.get("call") else {
        return Err(WireError::BadShape("expected \"ref\" or \"call\"".into()));
    };
    let op = Operator::from_name(name)
        .ok_or_else(|| WireError::UnknownOperator(name.clone()))?;
    let Some(Value::Array(raw_args)) = fields.get("args") else {
        return Err(WireError::BadShape("\"call\" without an \"args\" array".into()));
    };
    let args: Vec<Expression> = raw_args
        .iter()
        .map(Expression::from_wire)
        .collect::<Result<_, _>>()?;
    let (min, max) = op.arity();
    if args.len() < min || max.is_some_and(|m| args.len() > m) {
        return Err(WireError::BadArity { op, got: args.len() });
    }
    // route n-ary operators through the canonicalizing constructors so the
    // flatten/dedup invariant holds for decoded trees too
    Ok(match op {
        Operator::And => build::and(args),
        Operator::Or => build::or(args),
        _ => Expression::Call { op, args },
    })
}

fn array_constant(items: &[Value]) -> Result<Constant, WireError> {
    let Some(first) = items.first() else {
        // an empty array carries no element type; membership semantics do
        // not depend on it
        return Ok(Constant::StringArray(Vec::new()));
    };
    match first {
        Value::String(_) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                let Value::String(s) = item else { return Err(WireError::MixedArray) };
                elements.push(s.as_bytes().to_vec());
            }
            Ok(Constant::StringArray(elements))
        }
        Value::Number(_) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                let Some(f) = item.as_f64() else { return Err(WireError::MixedArray) };
                elements.push(OrderedFloat(f));
            }
            Ok(Constant::NumberArray(elements))
        }
        Value::Bool(_) => {
            let mut elements = Vec::with_capacity(items.len());
            for item in items {
                let Value::Bool(b) = item else { return Err(WireError::MixedArray) };
                elements.push(*b);
            }
            Ok(Constant::BoolArray(elements))
        }
        other => Err(WireError::BadShape(format!(
            "unsupported array element {other}"
        ))),
    }
}

fn constant_to_value(c: &Constant) -> Value {
    match c {
        Constant::String(s) => Value::String(String::from_utf8_lossy(s).into_owned()),
        Constant::Number(n) => number_to_value(n.into_inner()),
        Constant::Bool(b) => Value::Bool(*b),
        Constant::StringArray(items) => Value::Array(
            items
                .iter()
                .map(|s| Value::String(String::from_utf8_lossy(s).into_owned()))
                .collect(),
        ),
        Constant::NumberArray(items) => Value::Array(
            items.iter().map(|n| number_to_value(n.into_inner())).collect(),
        ),
        Constant::BoolArray(items) => {
            Value::Array(items.iter().map(|b| Value::Bool(*b)).collect())
        }
        Constant::Null => Value::Null,
    }
}

fn number_to_value(f: f64) -> Value {
    serde_json::Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null)
}

impl Serialize for Expression {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_wire().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Expression {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Expression::from_wire(&value).map_err(serde::de::Error::custom)
    }
}
