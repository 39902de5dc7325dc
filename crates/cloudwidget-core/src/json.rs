//! Safe accessors over untyped JSON values.
//!
//! Every accessor returns `None` instead of failing when the value is missing
//! or of an unexpected kind. Numbers are never parsed out of strings and
//! strings are never produced from numbers.

use serde_json::Value;

/// Returns the string when `value` is a JSON string.
pub fn safe_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(str::to_owned)
}

/// Returns any JSON number truncated toward zero.
///
/// Out-of-range values saturate at the `i32` bounds and NaN maps to zero,
/// matching a float-to-int cast.
pub fn safe_integer(value: Option<&Value>) -> Option<i32> {
    value.and_then(Value::as_f64).map(|n| n as i32)
}

/// Same as [`safe_integer`] with a 64-bit result, used for byte counts.
pub fn safe_long(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    // Integral values keep full precision; only floats go through f64.
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|n| n as i64))
}

/// Treats JSON `null` the same as a missing value.
pub fn present(value: Option<Value>) -> Option<Value> {
    value.filter(|v| !v.is_null())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn safe_string_only_accepts_strings() {
        assert_eq!(safe_string(Some(&json!("abc"))), Some("abc".to_string()));
        assert_eq!(safe_string(Some(&json!(""))), Some(String::new()));
        assert_eq!(safe_string(Some(&json!(12))), None);
        assert_eq!(safe_string(Some(&json!(true))), None);
        assert_eq!(safe_string(Some(&json!(null))), None);
        assert_eq!(safe_string(Some(&json!(["a"]))), None);
        assert_eq!(safe_string(None), None);
    }

    #[test]
    fn safe_integer_truncates_toward_zero() {
        assert_eq!(safe_integer(Some(&json!(100))), Some(100));
        assert_eq!(safe_integer(Some(&json!(100.0))), Some(100));
        assert_eq!(safe_integer(Some(&json!(99.9))), Some(99));
        assert_eq!(safe_integer(Some(&json!(-3.7))), Some(-3));
    }

    #[test]
    fn safe_integer_rejects_non_numbers() {
        assert_eq!(safe_integer(Some(&json!("100"))), None);
        assert_eq!(safe_integer(Some(&json!(false))), None);
        assert_eq!(safe_integer(Some(&json!({}))), None);
        assert_eq!(safe_integer(None), None);
    }

    #[test]
    fn safe_integer_saturates() {
        assert_eq!(safe_integer(Some(&json!(1e12))), Some(i32::MAX));
        assert_eq!(safe_integer(Some(&json!(-1e12))), Some(i32::MIN));
    }

    #[test]
    fn safe_long_keeps_large_byte_counts() {
        assert_eq!(safe_long(Some(&json!(5_000_000_000_u64))), Some(5_000_000_000));
        assert_eq!(safe_long(Some(&json!(1234.9))), Some(1234));
        assert_eq!(safe_long(Some(&json!("1234"))), None);
    }

    #[test]
    fn present_drops_null() {
        assert_eq!(present(Some(json!(null))), None);
        assert_eq!(present(None), None);
        assert_eq!(present(Some(json!({}))), Some(json!({})));
    }
}
