//! Type casting for resolved values
//!
//! Casts never fail. A value that cannot be converted comes back unchanged,
//! so bad context data degrades to a no-op cast instead of an error.

use serde_json::{Number, Value};

use crate::tag::TypeTag;

/// Largest magnitude at which every integer is exactly representable as f64
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Cast `value` to the type named by `tag`.
///
/// `whole_string` is true when the placeholder is the entire template; some
/// casts (`json`, `null`) only produce structured results in that mode.
/// `null` input is returned as is for every tag.
///
/// ```
/// use placeholder_core::cast::cast;
/// use placeholder_core::TypeTag;
/// use serde_json::json;
///
/// assert_eq!(cast(&json!("1.9"), TypeTag::Int, true), json!(1));
/// assert_eq!(cast(&json!("blah"), TypeTag::Int, true), json!("blah"));
/// assert_eq!(cast(&json!(r#"{"a":1}"#), TypeTag::Json, true), json!({"a": 1}));
/// assert_eq!(cast(&json!("x"), TypeTag::Null, false), json!("null"));
/// ```
pub fn cast(value: &Value, tag: TypeTag, whole_string: bool) -> Value {
    if value.is_null() {
        return Value::Null;
    }

    match tag {
        TypeTag::Str => Value::String(to_js_string(value)),
        TypeTag::Int => cast_int(value).unwrap_or_else(|| value.clone()),
        TypeTag::Num => cast_num(value).unwrap_or_else(|| value.clone()),
        TypeTag::Bool => cast_bool(value),
        TypeTag::Json => {
            if whole_string {
                cast_json(value)
            } else {
                value.clone()
            }
        }
        TypeTag::Null => {
            if matches!(value, Value::String(s) if s.trim() == "null") {
                Value::Null
            } else if whole_string {
                value.clone()
            } else {
                Value::String("null".to_string())
            }
        }
        TypeTag::Any | TypeTag::Undefined | TypeTag::IgnoreEmptyStr => value.clone(),
    }
}

fn cast_int(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => parse_int_prefix(s.trim()),
        Value::Number(n) if n.is_f64() => n.as_f64().and_then(|f| number_value(f.trunc())),
        Value::Number(_) => Some(value.clone()),
        _ => None,
    }
}

fn cast_num(value: &Value) -> Option<Value> {
    match value {
        Value::String(s) => parse_float_prefix(s.trim()).and_then(number_value),
        Value::Number(_) => Some(value.clone()),
        _ => None,
    }
}

/// `"true"`/`"false"` become booleans, recursively through containers
fn cast_bool(value: &Value) -> Value {
    match value {
        Value::String(s) => match s.trim() {
            "true" => Value::Bool(true),
            "false" => Value::Bool(false),
            _ => value.clone(),
        },
        Value::Array(items) => Value::Array(items.iter().map(cast_bool).collect()),
        Value::Object(map) => Value::Object(
            map.iter()
                .map(|(key, item)| (key.clone(), cast_bool(item)))
                .collect(),
        ),
        _ => value.clone(),
    }
}

fn cast_json(value: &Value) -> Value {
    match value {
        Value::String(s) => serde_json::from_str(s.trim()).unwrap_or_else(|_| value.clone()),
        _ => value.clone(),
    }
}

/// Convert a float to a JSON number, using an integer when it is whole.
///
/// Returns `None` for NaN and infinities, which JSON cannot carry.
pub fn number_value(f: f64) -> Option<Value> {
    if !f.is_finite() {
        return None;
    }
    if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER {
        return Some(Value::Number(Number::from(f as i64)));
    }
    Number::from_f64(f).map(Value::Number)
}

/// Base-10 integer parsing that stops at the first non-digit, so `"1.1"`
/// gives 1 and `"12px"` gives 12. Expects trimmed input.
pub fn parse_int_prefix(s: &str) -> Option<Value> {
    let sign_len = usize::from(s.starts_with(['+', '-']));
    let digits_len = count_digits(&s.as_bytes()[sign_len..]);
    if digits_len == 0 {
        return None;
    }

    let prefix = &s[..sign_len + digits_len];
    match prefix.parse::<i64>() {
        Ok(n) => Some(Value::Number(Number::from(n))),
        // Too large for i64: fall back to the nearest float
        Err(_) => number_value(prefix.parse().ok()?),
    }
}

/// Floating point parsing of the longest numeric prefix (`"1.5e3kg"` gives
/// 1500). Expects trimmed input.
pub fn parse_float_prefix(s: &str) -> Option<f64> {
    let bytes = s.as_bytes();
    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));

    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits = count_digits(&bytes[exp_end.min(bytes.len())..]);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    s[..end].trim_end_matches('.').parse().ok()
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

/// Stringify a value the way a JavaScript `String()` call would.
///
/// Objects collapse to `[object Object]`, arrays join their elements with
/// commas, and whole floats print without a fractional part.
pub fn to_js_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => format_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_js_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn format_number(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e21 => format!("{f:.0}"),
        _ => n.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    #[case(json!("1"), json!(1))]
    #[case(json!("1.1"), json!(1))]
    #[case(json!(" 42 "), json!(42))]
    #[case(json!("-7px"), json!(-7))]
    #[case(json!(1), json!(1))]
    #[case(json!(1.9), json!(1))]
    #[case(json!(-1.9), json!(-1))]
    #[case(json!("blah"), json!("blah"))]
    #[case(json!(""), json!(""))]
    #[case(json!(true), json!(true))]
    #[case(json!({"a": 1}), json!({"a": 1}))]
    fn test_cast_int(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(cast(&input, TypeTag::Int, true), expected);
    }

    #[test]
    fn test_cast_int_overflow_becomes_float() {
        let value = cast(&json!("99999999999999999999"), TypeTag::Int, true);
        assert_eq!(value.as_f64(), Some(1e20));
    }

    #[rstest]
    #[case(json!("1.1"), json!(1.1))]
    #[case(json!(1.1), json!(1.1))]
    #[case(json!("2"), json!(2))]
    #[case(json!("1.5e3kg"), json!(1500))]
    #[case(json!(".5"), json!(0.5))]
    #[case(json!("-3."), json!(-3))]
    #[case(json!("1e"), json!(1))]
    #[case(json!("blah"), json!("blah"))]
    #[case(json!("Infinity"), json!("Infinity"))]
    #[case(json!("."), json!("."))]
    fn test_cast_num(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(cast(&input, TypeTag::Num, true), expected);
    }

    #[rstest]
    #[case(json!("true"), json!(true))]
    #[case(json!("false"), json!(false))]
    #[case(json!(true), json!(true))]
    #[case(json!("blah"), json!("blah"))]
    #[case(json!(1), json!(1))]
    fn test_cast_bool(#[case] input: Value, #[case] expected: Value) {
        assert_eq!(cast(&input, TypeTag::Bool, true), expected);
    }

    #[test]
    fn test_cast_bool_recurses() {
        let input = json!({
            "data": [
                {"id": 1, "flag": "true"},
                {"id": 2, "nested": {"subFlag": "false"}},
                "pending"
            ],
            "opts": {"value": 42, "nullVal": null, "count": "5"}
        });
        assert_eq!(
            cast(&input, TypeTag::Bool, true),
            json!({
                "data": [
                    {"id": 1, "flag": true},
                    {"id": 2, "nested": {"subFlag": false}},
                    "pending"
                ],
                "opts": {"value": 42, "nullVal": null, "count": "5"}
            })
        );
    }

    #[test]
    fn test_cast_json_whole_string() {
        assert_eq!(
            cast(&json!("{\"foo\":\"bar\"}"), TypeTag::Json, true),
            json!({"foo": "bar"})
        );
        assert_eq!(cast(&json!(["a", "b"]), TypeTag::Json, true), json!(["a", "b"]));
        assert_eq!(cast(&json!("blah"), TypeTag::Json, true), json!("blah"));
        assert_eq!(cast(&json!(" 12 "), TypeTag::Json, true), json!(12));
    }

    #[test]
    fn test_cast_json_embedded_passes_through() {
        let raw = json!("{\"foo\":\"bar\"}");
        assert_eq!(cast(&raw, TypeTag::Json, false), raw);
    }

    #[test]
    fn test_cast_null() {
        assert_eq!(cast(&json!("null"), TypeTag::Null, true), Value::Null);
        assert_eq!(cast(&json!("null"), TypeTag::Null, false), Value::Null);
        assert_eq!(cast(&Value::Null, TypeTag::Null, true), Value::Null);
        assert_eq!(cast(&json!("blah"), TypeTag::Null, true), json!("blah"));
        assert_eq!(cast(&json!("blah"), TypeTag::Null, false), json!("null"));
    }

    #[rstest]
    #[case(json!("blah"), "blah")]
    #[case(json!(1), "1")]
    #[case(json!(1.5), "1.5")]
    #[case(json!(true), "true")]
    #[case(json!({"foo": "bar"}), "[object Object]")]
    #[case(json!([1, null, "a", [2, 3]]), "1,,a,2,3")]
    fn test_cast_str(#[case] input: Value, #[case] expected: &str) {
        assert_eq!(cast(&input, TypeTag::Str, true), json!(expected));
    }

    #[test]
    fn test_null_passes_through_every_tag() {
        for tag in TypeTag::ALL {
            assert_eq!(cast(&Value::Null, tag, false), Value::Null);
        }
    }

    #[test]
    fn test_markers_pass_through() {
        let value = json!({"keep": " me "});
        for tag in [TypeTag::Any, TypeTag::Undefined, TypeTag::IgnoreEmptyStr] {
            assert_eq!(cast(&value, tag, true), value);
        }
    }

    #[test]
    fn test_to_js_string_whole_float() {
        let value = Value::Number(Number::from_f64(3.0).unwrap());
        assert_eq!(to_js_string(&value), "3");
    }
}
