use crate::value::Value;
use std::fmt::Write;

/// Delimiter used by [`create_surrogate_key`] when none is given.
pub const DEFAULT_DELIMITER: &str = "_";

/// Build a surrogate key from a list of fields.
///
/// Falsy fields (null, `false`, zero, empty text, empty lists) are dropped.
/// Every remaining field is rendered the way row-oriented tooling prints
/// it (`True`, `None`, `3.0`), stripped of anything that is not an ASCII
/// letter or digit, and the pieces are joined with `delimiter`.
///
/// ```
/// use strtidy::{Value, create_surrogate_key, values};
/// let fields = values![12, "a.b", Value::Null, "c d"];
/// assert_eq!(create_surrogate_key(&fields, "_"), "12_ab_cd");
/// assert_eq!(create_surrogate_key(&fields, "~"), "12~ab~cd");
/// ```
pub fn create_surrogate_key(fields: &[Value], delimiter: &str) -> String {
    fields
        .iter()
        .filter(|field| field.is_truthy())
        .map(|field| {
            let mut rendered = String::new();
            render_field(field, &mut rendered);
            rendered.retain(|c| c.is_ascii_alphanumeric());
            rendered
        })
        .collect::<Vec<_>>()
        .join(delimiter)
}

fn render_field(value: &Value, out: &mut String) {
    match value {
        Value::Null => out.push_str("None"),
        Value::Bool(true) => out.push_str("True"),
        Value::Bool(false) => out.push_str("False"),
        Value::Float(x) if x.is_nan() => out.push_str("nan"),
        Value::List(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                render_field(item, out);
            }
            out.push(']');
        }
        other => {
            // Writing into a String cannot fail
            let _ = write!(out, "{other}");
        }
    }
}
