use crate::error::{McpError, McpResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Parse JSON value into a typed parameter struct
pub fn parse_params<T: DeserializeOwned>(params: Value) -> McpResult<T> {
    serde_json::from_value(params)
        .map_err(|e| McpError::InvalidParameter(format!("Invalid parameters: {}", e)))
}

/// Normalize a raw `limit` argument.
///
/// Anything that is not a positive integer (absent, zero, negative,
/// fractional, wrong type) falls back to `default`; the result is then
/// clamped to `max` so a request can never ask for more articles than exist.
pub fn normalize_limit(raw: Option<&Value>, default: usize, max: usize) -> usize {
    let requested = raw
        .and_then(Value::as_u64)
        .filter(|n| *n > 0)
        .map(|n| n as usize)
        .unwrap_or(default);

    requested.min(max)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Params {
        name: String,
    }

    #[test]
    fn test_parse_params_valid() {
        let params: Params = parse_params(json!({"name": "ok"})).unwrap();
        assert_eq!(params.name, "ok");
    }

    #[test]
    fn test_parse_params_missing_field_is_invalid_parameter() {
        let result: McpResult<Params> = parse_params(json!({}));
        assert!(matches!(result, Err(McpError::InvalidParameter(_))));
    }

    #[rstest]
    #[case(None, 5)]
    #[case(Some(json!(3)), 3)]
    #[case(Some(json!(0)), 5)]
    #[case(Some(json!(-2)), 5)]
    #[case(Some(json!(2.5)), 5)]
    #[case(Some(json!("ten")), 5)]
    #[case(Some(json!(99)), 6)]
    fn test_normalize_limit(#[case] raw: Option<Value>, #[case] expected: usize) {
        assert_eq!(normalize_limit(raw.as_ref(), 5, 6), expected);
    }
}
