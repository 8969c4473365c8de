use indexmap::IndexMap;
use ordered_float::OrderedFloat;
use tracing::debug;

use crate::expression::{Constant, Expression, Input, Operator};
use crate::logic::minimize::minimize;

/// Searches for an input on which `a` and `b` evaluate differently. Candidate
/// values are derived per reference from the comparisons each expression
/// makes, then the Cartesian product of all candidate lists is enumerated.
/// `None` means no witness exists within that finite space, not a proof of
/// equivalence.
pub fn find_diff(a: &Expression, b: &Expression) -> Option<Input> {
    let mut components = InputComponents::default();
    let min_a = minimize(a);
    let min_b = minimize(b);
    find_test_values(&min_a, &mut components);
    find_test_values(&min_b, &mut components);

    let inputs = cartesian_product(&components);
    debug!(references = components.len(), inputs = inputs.len(), "witness search space");
    inputs
        .into_iter()
        .find(|input| a.evaluate(input) != b.evaluate(input))
}

/// Candidate constants per reference name, in insertion order.
#[derive(Debug, Default)]
pub(crate) struct InputComponents {
    components: IndexMap<String, Vec<Constant>>,
}

impl InputComponents {
    pub(crate) fn add(&mut self, name: &str, value: Constant) {
        let list = self.components.entry(name.to_string()).or_default();
        if !list.contains(&value) {
            list.push(value);
        }
    }

    fn contains(&self, name: &str) -> bool {
        self.components.contains_key(name)
    }

    fn get(&self, name: &str) -> Option<&Vec<Constant>> {
        self.components.get(name)
    }

    pub(crate) fn len(&self) -> usize {
        self.components.len()
    }
}

/// Every assignment that picks one candidate per reference. With no
/// references at all there is exactly one assignment, the empty input.
pub(crate) fn cartesian_product(components: &InputComponents) -> Vec<Input> {
    let lists: Vec<(&String, &Vec<Constant>)> = components.components.iter().collect();
    let mut counters = vec![0usize; lists.len()];
    let mut result = Vec::new();
    loop {
        let mut input = Input::new();
        for ((name, values), &counter) in lists.iter().zip(&counters) {
            input.set((*name).clone(), values[counter].clone());
        }
        result.push(input);

        let mut position = 0;
        loop {
            if position == lists.len() {
                return result;
            }
            counters[position] += 1;
            if counters[position] < lists[position].1.len() {
                break;
            }
            counters[position] = 0;
            position += 1;
        }
    }
}

fn find_test_values(e: &Expression, components: &mut InputComponents) {
    find_test_values_by_const(e, components);
    find_test_values_by_other_refs(e, components);
    find_test_values_for_is_null(e, components);
}

/// Comparisons of a reference against a constant: take the constant itself
/// and its nearest neighbour on the side that flips the comparison.
fn find_test_values_by_const(e: &Expression, components: &mut InputComponents) {
    match e {
        Expression::Reference(name) => {
            components.add(name, Constant::Bool(true));
            components.add(name, Constant::Bool(false));
        }
        Expression::Call { op, args } => match op {
            Operator::And | Operator::Or => {
                for arg in args {
                    find_test_values_by_const(arg, components);
                }
            }
            // null candidates come in a later pass
            Operator::IsNull | Operator::IsNotNull => {}
            Operator::Le | Operator::Lt => match (&args[0], &args[1]) {
                // reference-to-reference comparisons come in a later pass
                (Expression::Reference(_), Expression::Reference(_)) => {}
                (Expression::Reference(name), Expression::Constant(c)) => {
                    components.add(name, c.clone());
                    if *op == Operator::Lt {
                        components.add(name, prev(c));
                    } else {
                        components.add(name, next(c));
                    }
                }
                (Expression::Constant(c), Expression::Reference(name)) => {
                    components.add(name, c.clone());
                    if *op == Operator::Le {
                        components.add(name, prev(c));
                    } else {
                        components.add(name, next(c));
                    }
                }
                _ => panic!("comparison without a reference reached witness collection: {e}"),
            },
            Operator::In | Operator::NotIn => {
                let Expression::Reference(array_name) = &args[1] else { return };
                if let Expression::Constant(c) = &args[0] {
                    match c {
                        Constant::String(s) => {
                            components.add(array_name, Constant::StringArray(vec![s.clone()]));
                            components.add(array_name, Constant::StringArray(vec![]));
                        }
                        Constant::Number(n) => {
                            components.add(array_name, Constant::NumberArray(vec![*n]));
                            components.add(array_name, Constant::NumberArray(vec![]));
                        }
                        Constant::Bool(b) => {
                            components.add(array_name, Constant::BoolArray(vec![*b]));
                            components.add(array_name, Constant::BoolArray(vec![]));
                        }
                        _ => {}
                    }
                }
            }
            Operator::Like | Operator::NotLike => {
                if let (Expression::Reference(name), Some(Expression::Constant(pattern))) =
                    (&args[0], args.get(1))
                {
                    components.add(name, pattern.clone());
                    components.add(name, Constant::string(""));
                }
            }
            _ => {}
        },
        Expression::Constant(_) => {}
    }
}

/// Comparisons between two references: derive candidates for one side from
/// the other, or seed both numerically when neither has any yet. The numeric
/// seed assumes the references are number-typed; a schema lookup would be
/// needed to do better.
fn find_test_values_by_other_refs(e: &Expression, components: &mut InputComponents) {
    let Expression::Call { op, args } = e else { return };
    match op {
        Operator::And | Operator::Or => {
            for arg in args {
                find_test_values_by_other_refs(arg, components);
            }
        }
        Operator::IsNull | Operator::IsNotNull => {}
        Operator::Le | Operator::Lt => {
            let (Expression::Reference(left), Expression::Reference(right)) =
                (&args[0], &args[1])
            else {
                return;
            };
            let left_values = components.get(left).cloned();
            let right_values = components.get(right).cloned();
            match (left_values, right_values) {
                (None, None) => {
                    let zero = Constant::number(0.0);
                    components.add(left, zero.clone());
                    components.add(right, zero.clone());
                    components.add(left, next(&zero));
                    components.add(right, next(&zero));
                }
                (None, Some(right_values)) => {
                    components.add(left, right_values[0].clone());
                    if *op == Operator::Lt {
                        components.add(left, prev(&right_values[0]));
                    } else {
                        components.add(left, next(&right_values[0]));
                    }
                }
                (Some(left_values), None) => {
                    components.add(right, left_values[0].clone());
                    if *op == Operator::Lt {
                        components.add(right, next(&left_values[0]));
                    } else {
                        components.add(right, prev(&left_values[0]));
                    }
                }
                (Some(left_values), Some(right_values)) => {
                    let mut has_lesser = false;
                    let mut has_equal = false;
                    let mut has_greater = false;
                    for l in &left_values {
                        for r in &right_values {
                            has_lesser = has_lesser || l.less_than(r);
                            has_greater = has_greater || r.less_than(l);
                            has_equal = has_equal || l == r;
                        }
                    }
                    // top up the left list until both polarities of the
                    // comparison are reachable
                    if *op == Operator::Lt {
                        if has_lesser && (has_equal || has_greater) {
                            return;
                        }
                        if has_lesser {
                            components.add(left, right_values[0].clone());
                        } else if has_greater || has_equal {
                            components.add(left, prev(&right_values[0]));
                        }
                    } else {
                        if (has_lesser || has_equal) && has_greater {
                            return;
                        }
                        if has_lesser || has_equal {
                            components.add(left, next(&right_values[0]));
                        } else if has_greater {
                            components.add(left, right_values[0].clone());
                        }
                    }
                }
            }
        }
        Operator::In | Operator::NotIn => {
            let Expression::Reference(array_name) = &args[1] else { return };
            let Expression::Reference(name) = &args[0] else { return };
            let scalar_values = components.get(name).cloned();
            let array_values = components.get(array_name).cloned();
            match (scalar_values, array_values) {
                (None, None) => {
                    components.add(name, Constant::number(0.0));
                    components.add(array_name, Constant::NumberArray(vec![]));
                    components.add(array_name, Constant::NumberArray(vec![OrderedFloat(0.0)]));
                }
                (Some(scalar_values), None) => match &scalar_values[0] {
                    Constant::String(s) => {
                        components.add(array_name, Constant::StringArray(vec![s.clone()]));
                        components.add(array_name, Constant::StringArray(vec![]));
                    }
                    Constant::Number(n) => {
                        components.add(array_name, Constant::NumberArray(vec![*n]));
                        components.add(array_name, Constant::NumberArray(vec![]));
                    }
                    Constant::Bool(b) => {
                        components.add(array_name, Constant::BoolArray(vec![*b]));
                        components.add(array_name, Constant::BoolArray(vec![]));
                    }
                    _ => {}
                },
                (None, Some(array_values)) => {
                    let mut candidate = Constant::Null;
                    for value in &array_values {
                        if let Some(elements) = value.elements() {
                            if let Some(first) = elements.into_iter().next() {
                                candidate = first;
                                break;
                            }
                        }
                    }
                    components.add(name, candidate);
                }
                (Some(_), Some(_)) => {}
            }
        }
        _ => {}
    }
}

/// References that only ever appear under a null check still need one
/// non-null candidate; bare boolean references need both truth values.
fn find_test_values_for_is_null(e: &Expression, components: &mut InputComponents) {
    match e {
        Expression::Reference(name) => {
            components.add(name, Constant::Bool(true));
            components.add(name, Constant::Bool(false));
        }
        Expression::Call { op, args } => match op {
            Operator::And | Operator::Or => {
                for arg in args {
                    find_test_values_for_is_null(arg, components);
                }
            }
            Operator::IsNull | Operator::IsNotNull => {
                if let Expression::Reference(name) = &args[0] {
                    if !components.contains(name) {
                        components.add(name, Constant::Bool(true));
                    }
                }
            }
            _ => {}
        },
        Expression::Constant(_) => {}
    }
}

/// Successor of a scalar constant: the next float towards `f64::MAX`, the
/// byte-lexicographic next string, or the flipped boolean.
pub(crate) fn next(c: &Constant) -> Constant {
    match c {
        Constant::String(s) => Constant::String(next_string(s)),
        Constant::Number(n) => Constant::Number(OrderedFloat(n.into_inner().next_up())),
        Constant::Bool(b) => Constant::Bool(!b),
        other => panic!("no successor for constant {other}"),
    }
}

/// Predecessor of a scalar constant, dual to [`next`].
pub(crate) fn prev(c: &Constant) -> Constant {
    match c {
        Constant::String(s) => Constant::String(prev_string(s)),
        Constant::Number(n) => Constant::Number(OrderedFloat(n.into_inner().next_down())),
        Constant::Bool(b) => Constant::Bool(!b),
        other => panic!("no predecessor for constant {other}"),
    }
}

fn next_string(s: &[u8]) -> Vec<u8> {
    let mut bytes = s.to_vec();
    for i in (0..bytes.len()).rev() {
        if bytes[i] < 0xFF {
            bytes[i] += 1;
            bytes.truncate(i + 1);
            return bytes;
        }
    }
    // all bytes are 0xFF: appending the smallest byte is the next string up
    bytes.push(0x00);
    bytes
}

fn prev_string(s: &[u8]) -> Vec<u8> {
    let mut bytes = s.to_vec();
    for i in (0..bytes.len()).rev() {
        if bytes[i] > 0x00 {
            bytes[i] -= 1;
            bytes.truncate(i + 1);
            return bytes;
        }
    }
    // all bytes are 0x00 (or empty): nothing smaller, fall back to ""
    Vec::new()
}
