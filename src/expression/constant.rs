use std::cmp::Ordering;
use std::fmt;

use ordered_float::OrderedFloat;

/// A literal policy value. Strings are raw byte sequences: successor and
/// predecessor values used by the witness search are byte-lexicographic and
/// may fall outside valid UTF-8.
#[derive(Clone, PartialEq, Eq)]
pub enum Constant {
    String(Vec<u8>),
    Number(OrderedFloat<f64>),
    Bool(bool),
    StringArray(Vec<Vec<u8>>),
    NumberArray(Vec<OrderedFloat<f64>>),
    BoolArray(Vec<bool>),
    Null,
}

impl Constant {
    pub fn string(s: impl Into<Vec<u8>>) -> Self {
        Constant::String(s.into())
    }

    pub fn number(n: f64) -> Self {
        Constant::Number(OrderedFloat(n))
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Constant::Null)
    }

    /// Elements of an array constant, each rewrapped as a scalar constant.
    pub fn elements(&self) -> Option<Vec<Constant>> {
        match self {
            Constant::StringArray(items) => {
                Some(items.iter().cloned().map(Constant::String).collect())
            }
            Constant::NumberArray(items) => {
                Some(items.iter().map(|n| Constant::Number(*n)).collect())
            }
            Constant::BoolArray(items) => Some(items.iter().map(|b| Constant::Bool(*b)).collect()),
            _ => None,
        }
    }

    /// Ordering between two scalar constants of the same type: numbers by
    /// value, strings byte-lexicographic. Everything else is incomparable.
    pub fn compare(&self, other: &Constant) -> Option<Ordering> {
        match (self, other) {
            (Constant::Number(a), Constant::Number(b)) => Some(a.cmp(b)),
            (Constant::String(a), Constant::String(b)) => Some(a.cmp(b)),
            _ => None,
        }
    }

    pub fn less_than(&self, other: &Constant) -> bool {
        matches!(self.compare(other), Some(Ordering::Less))
    }
}

impl fmt::Display for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Constant::String(s) => write!(f, "\"{}\"", String::from_utf8_lossy(s)),
            Constant::Number(n) => write!(f, "{n}"),
            Constant::Bool(b) => write!(f, "{b}"),
            Constant::StringArray(items) => {
                write!(f, "[")?;
                for (i, s) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "\"{}\"", String::from_utf8_lossy(s))?;
                }
                write!(f, "]")
            }
            Constant::NumberArray(items) => {
                write!(f, "[")?;
                for (i, n) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{n}")?;
                }
                write!(f, "]")
            }
            Constant::BoolArray(items) => {
                write!(f, "[")?;
                for (i, b) in items.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{b}")?;
                }
                write!(f, "]")
            }
            Constant::Null => write!(f, "null"),
        }
    }
}

impl fmt::Debug for Constant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Constant({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_and_strings_are_ordered() {
        assert!(Constant::number(1.0).less_than(&Constant::number(2.0)));
        assert!(!Constant::number(2.0).less_than(&Constant::number(2.0)));
        assert!(Constant::string("abc").less_than(&Constant::string("abd")));
        assert!(Constant::string("ab").less_than(&Constant::string("b")));
    }

    #[test]
    fn mixed_types_are_incomparable() {
        assert_eq!(Constant::number(1.0).compare(&Constant::string("1")), None);
        assert_eq!(Constant::Bool(false).compare(&Constant::Bool(true)), None);
        assert_eq!(Constant::Null.compare(&Constant::Null), None);
    }

    #[test]
    fn array_elements_rewrap_as_scalars() {
        let arr = Constant::NumberArray(vec![OrderedFloat(1.0), OrderedFloat(2.0)]);
        assert_eq!(
            arr.elements(),
            Some(vec![Constant::number(1.0), Constant::number(2.0)])
        );
        assert_eq!(Constant::number(1.0).elements(), None);
    }

    #[test]
    fn display_is_compact() {
        assert_eq!(Constant::string("x").to_string(), "\"x\"");
        assert_eq!(Constant::number(1.0).to_string(), "1");
        assert_eq!(
            Constant::StringArray(vec![b"a".to_vec(), b"b".to_vec()]).to_string(),
            "[\"a\", \"b\"]"
        );
        assert_eq!(Constant::Null.to_string(), "null");
    }
}
