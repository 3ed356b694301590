//! JavaScript-style truthiness for JSON values.
//!
//! The identity endpoint is consumed by browser code that decides
//! "signed in" with `!!player`. To stay compatible with that backend
//! contract we use the same rule here:
//!
//! | value                | truthy? |
//! |----------------------|---------|
//! | `null`               | no      |
//! | `false`              | no      |
//! | `0`, `-0`, `0.0`     | no      |
//! | `""`                 | no      |
//! | anything else        | yes     |
//!
//! Note that `{}` and `[]` are truthy. An empty player record still
//! means "signed in".

use serde_json::Value;

/// Returns `true` if `value` would be truthy in JavaScript.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        // `as_f64` covers integers too. JSON can't carry NaN, so zero is
        // the only falsy number we can receive.
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn test_is_truthy_null_and_false_are_falsy() {
        assert!(!is_truthy(&Value::Null));
        assert!(!is_truthy(&json!(false)));
    }

    #[test]
    fn test_is_truthy_zero_and_empty_string_are_falsy() {
        assert!(!is_truthy(&json!(0)));
        assert!(!is_truthy(&json!(0.0)));
        assert!(!is_truthy(&json!(-0.0)));
        assert!(!is_truthy(&json!("")));
    }

    #[test]
    fn test_is_truthy_empty_containers_are_truthy() {
        // This is the surprising one: an empty player record is truthy.
        assert!(is_truthy(&json!({})));
        assert!(is_truthy(&json!([])));
    }

    #[test]
    fn test_is_truthy_scalars() {
        assert!(is_truthy(&json!(true)));
        assert!(is_truthy(&json!(1)));
        assert!(is_truthy(&json!(-3.5)));
        assert!(is_truthy(&json!("alice")));
        assert!(is_truthy(&json!("0")));
    }
}
