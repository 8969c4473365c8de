use std::fmt;

use indexmap::IndexMap;

use crate::expression::Constant;

/// A finite assignment of reference names to constants. References absent
/// from the input evaluate to null. Insertion order is preserved so that
/// witness enumeration and display are deterministic.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Input {
    values: IndexMap<String, Constant>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, name: &str) -> Option<&Constant> {
        self.values.get(name)
    }

    pub fn set(&mut self, name: impl Into<String>, value: Constant) {
        self.values.insert(name.into(), value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Constant)> {
        self.values.iter()
    }
}

impl FromIterator<(String, Constant)> for Input {
    fn from_iter<T: IntoIterator<Item = (String, Constant)>>(iter: T) -> Self {
        Input { values: iter.into_iter().collect() }
    }
}

impl fmt::Display for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (name, value)) in self.values.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{name}: {value}")?;
        }
        write!(f, "}}")
    }
}

impl fmt::Debug for Input {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Input({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_names_are_absent() {
        let mut input = Input::new();
        input.set("x", Constant::number(1.0));
        assert_eq!(input.get("x"), Some(&Constant::number(1.0)));
        assert_eq!(input.get("y"), None);
    }

    #[test]
    fn equality_ignores_insertion_order() {
        let a: Input = [
            ("x".to_string(), Constant::number(1.0)),
            ("y".to_string(), Constant::string("a")),
        ]
        .into_iter()
        .collect();
        let b: Input = [
            ("y".to_string(), Constant::string("a")),
            ("x".to_string(), Constant::number(1.0)),
        ]
        .into_iter()
        .collect();
        assert_eq!(a, b);
    }

    #[test]
    fn display_lists_assignments() {
        let mut input = Input::new();
        input.set("x", Constant::number(2.0));
        input.set("s", Constant::string("a"));
        assert_eq!(input.to_string(), "{x: 2, s: \"a\"}");
        assert_eq!(Input::new().to_string(), "{}");
    }
}
