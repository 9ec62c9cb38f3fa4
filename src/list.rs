use crate::value::Value;

/// Flatten arbitrarily nested lists into one list, left to right.
///
/// Only [`Value::List`] is expanded; every other value (including null,
/// `false` and zero) is kept as is. Values own their children, so a list
/// can never contain itself and the recursion always terminates.
pub fn flatten_nested_list(values: Vec<Value>) -> Vec<Value> {
    let mut out = Vec::with_capacity(values.len());
    flatten_into(values, &mut out);
    out
}

fn flatten_into(values: Vec<Value>, out: &mut Vec<Value>) {
    for value in values {
        match value {
            Value::List(items) => flatten_into(items, out),
            other => out.push(other),
        }
    }
}
