use serde_json::{Number, Value};

/// Deep structural equality over JSON values.
///
/// Numbers compare by numeric value, so `1` and `1.0` are equal even though
/// they parse to different internal representations (JSON carries no NaN, so
/// plain `f64` equality suffices for the mixed case). Object key order is
/// irrelevant; array order is significant. There is no cross-type coercion:
/// `"1"` is never equal to `1`.
///
/// Terminates on any finite JSON value — decoded values are acyclic by
/// construction, so no cycle detection is needed.
pub fn equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => numbers_equal(a, b),
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| equal(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            // Counts match, so one-sided containment is symmetric.
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| equal(x, y)))
        }
        _ => false,
    }
}

fn numbers_equal(a: &Number, b: &Number) -> bool {
    // Same representation compares exactly (covers full u64/i64 range).
    if a == b {
        return true;
    }
    // Mixed integer/float representations of the same numeric value.
    match (a.as_f64(), b.as_f64()) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn primitives() {
        assert!(equal(&json!(null), &json!(null)));
        assert!(equal(&json!(true), &json!(true)));
        assert!(equal(&json!("a"), &json!("a")));
        assert!(!equal(&json!(true), &json!(false)));
        assert!(!equal(&json!("a"), &json!("b")));
    }

    #[test]
    fn no_cross_type_coercion() {
        assert!(!equal(&json!("1"), &json!(1)));
        assert!(!equal(&json!(0), &json!(false)));
        assert!(!equal(&json!(null), &json!(0)));
        assert!(!equal(&json!([]), &json!({})));
    }

    #[test]
    fn numbers_across_representations() {
        let int: Value = serde_json::from_str("1").unwrap();
        let float: Value = serde_json::from_str("1.0").unwrap();
        assert!(equal(&int, &float));
        assert!(!equal(&json!(1), &json!(2)));
        assert!(equal(&json!(-3), &json!(-3.0)));
    }

    #[test]
    fn arrays_are_order_sensitive() {
        assert!(equal(&json!([1, 2, 3]), &json!([1, 2, 3])));
        assert!(!equal(&json!([1, 2, 3]), &json!([3, 2, 1])));
        assert!(!equal(&json!([1, 2]), &json!([1, 2, 3])));
    }

    #[test]
    fn objects_ignore_key_order() {
        let a: Value = serde_json::from_str(r#"{"a":1,"b":2}"#).unwrap();
        let b: Value = serde_json::from_str(r#"{"b":2,"a":1}"#).unwrap();
        assert!(equal(&a, &b));
    }

    #[test]
    fn objects_differ_by_keys_and_values() {
        assert!(!equal(&json!({"a": 1}), &json!({"a": 2})));
        assert!(!equal(&json!({"a": 1}), &json!({"b": 1})));
        assert!(!equal(&json!({"a": 1}), &json!({"a": 1, "b": 2})));
    }

    #[test]
    fn nested_structures() {
        let a = json!({"users": [{"name": "ada", "tags": ["x"]}], "count": 1});
        let b = json!({"count": 1, "users": [{"tags": ["x"], "name": "ada"}]});
        assert!(equal(&a, &b));

        let c = json!({"count": 1, "users": [{"tags": ["y"], "name": "ada"}]});
        assert!(!equal(&a, &c));
    }
}
