use std::fmt;

/// The recognized operator set. Expressions arriving over the wire may only
/// use these names; anything else is rejected at the codec boundary.
#[derive(Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    And,
    Or,
    Not,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    Between,
    NotBetween,
    IsNull,
    IsNotNull,
    In,
    NotIn,
    Like,
    NotLike,
}

impl Operator {
    pub fn name(self) -> &'static str {
        match self {
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Not => "not",
            Operator::Eq => "eq",
            Operator::Ne => "ne",
            Operator::Lt => "lt",
            Operator::Le => "le",
            Operator::Gt => "gt",
            Operator::Ge => "ge",
            Operator::Between => "between",
            Operator::NotBetween => "not_between",
            Operator::IsNull => "is_null",
            Operator::IsNotNull => "is_not_null",
            Operator::In => "in",
            Operator::NotIn => "not_in",
            Operator::Like => "like",
            Operator::NotLike => "not_like",
        }
    }

    pub fn from_name(name: &str) -> Option<Operator> {
        let op = match name {
            "and" => Operator::And,
            "or" => Operator::Or,
            "not" => Operator::Not,
            "eq" => Operator::Eq,
            "ne" => Operator::Ne,
            "lt" => Operator::Lt,
            "le" => Operator::Le,
            "gt" => Operator::Gt,
            "ge" => Operator::Ge,
            "between" => Operator::Between,
            "not_between" => Operator::NotBetween,
            "is_null" => Operator::IsNull,
            "is_not_null" => Operator::IsNotNull,
            "in" => Operator::In,
            "not_in" => Operator::NotIn,
            "like" => Operator::Like,
            "not_like" => Operator::NotLike,
            _ => return None,
        };
        Some(op)
    }

    /// Accepted argument counts, `(min, max)`. `and`/`or` are n-ary, `like`
    /// takes an optional escape argument.
    pub fn arity(self) -> (usize, Option<usize>) {
        match self {
            Operator::And | Operator::Or => (0, None),
            Operator::Not | Operator::IsNull | Operator::IsNotNull => (1, Some(1)),
            Operator::Like | Operator::NotLike => (2, Some(3)),
            Operator::Between | Operator::NotBetween => (3, Some(3)),
            _ => (2, Some(2)),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl fmt::Debug for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Operator({})", self.name())
    }
}
