//! Input validation for request bodies and path segments

use axum::body::Bytes;
use chrono::NaiveDate;
use serde_json::{Map, Value};

use super::error::ApiError;

pub const DAY_ERROR: &str = "day must be a positive integer";
pub const START_DATE_REQUIRED: &str = "startDate is required";
pub const START_DATE_FORMAT: &str = "startDate must be a date in YYYY-MM-DD format";

/// Largest integer an f64 represents exactly
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

/// Parse a JSON request body. An empty body reads as `{}`.
pub fn parse_json_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::bad_request(format!("Invalid JSON body: {}", e)))
}

/// `startDate` must be present, non-empty and a calendar date
pub fn parse_start_date(value: Option<&Value>) -> Result<NaiveDate, ApiError> {
    match value {
        None | Some(Value::Null) => Err(ApiError::bad_request(START_DATE_REQUIRED)),
        Some(Value::String(raw)) if raw.trim().is_empty() => {
            Err(ApiError::bad_request(START_DATE_REQUIRED))
        }
        Some(Value::String(raw)) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
            .map_err(|_| ApiError::bad_request(START_DATE_FORMAT)),
        Some(_) => Err(ApiError::bad_request(START_DATE_FORMAT)),
    }
}

fn positive_integer(n: f64) -> Option<i64> {
    (n.is_finite() && n.fract() == 0.0 && (1.0..=MAX_SAFE_INTEGER).contains(&n)).then_some(n as i64)
}

/// Numeric coercion for a program day: integral numbers and numeric strings
/// are accepted when >= 1
pub fn coerce_day(value: Option<&Value>) -> Result<i64, ApiError> {
    let day = match value {
        Some(Value::Number(n)) => match n.as_i64() {
            Some(i) => (i >= 1).then_some(i),
            None => n.as_f64().and_then(positive_integer),
        },
        Some(Value::String(raw)) => parse_day_str(raw),
        _ => None,
    };
    day.ok_or_else(|| ApiError::bad_request(DAY_ERROR))
}

/// Same rules as [`coerce_day`] for a path segment
pub fn parse_day(raw: &str) -> Result<i64, ApiError> {
    parse_day_str(raw).ok_or_else(|| ApiError::bad_request(DAY_ERROR))
}

fn parse_day_str(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    if let Ok(i) = trimmed.parse::<i64>() {
        return (i >= 1).then_some(i);
    }
    trimmed.parse::<f64>().ok().and_then(positive_integer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_body_is_empty_object() {
        assert_eq!(parse_json_body(&Bytes::new()).unwrap(), json!({}));
        assert_eq!(parse_json_body(&Bytes::from_static(b"  \n")).unwrap(), json!({}));
    }

    #[test]
    fn test_malformed_body_is_bad_request() {
        let err = parse_json_body(&Bytes::from_static(b"{day:")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_start_date_required() {
        for value in [None, Some(json!(null)), Some(json!("")), Some(json!("   "))] {
            let err = parse_start_date(value.as_ref()).unwrap_err();
            assert_eq!(err.to_string(), START_DATE_REQUIRED);
        }
    }

    #[test]
    fn test_start_date_format() {
        assert_eq!(
            parse_start_date(Some(&json!("2024-01-01"))).unwrap(),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
        for bad in [json!("yesterday"), json!("2024-13-01"), json!(20240101), json!(true)] {
            let err = parse_start_date(Some(&bad)).unwrap_err();
            assert_eq!(err.to_string(), START_DATE_FORMAT, "input {}", bad);
        }
    }

    #[test]
    fn test_coerce_day_accepts_positive_integers() {
        assert_eq!(coerce_day(Some(&json!(1))).unwrap(), 1);
        assert_eq!(coerce_day(Some(&json!(28))).unwrap(), 28);
        assert_eq!(coerce_day(Some(&json!(3.0))).unwrap(), 3);
        assert_eq!(coerce_day(Some(&json!("7"))).unwrap(), 7);
        assert_eq!(coerce_day(Some(&json!(" 12 "))).unwrap(), 12);
        // No upper bound beyond being a positive integer
        assert_eq!(coerce_day(Some(&json!(45))).unwrap(), 45);
    }

    #[test]
    fn test_coerce_day_rejects_invalid() {
        let rejected = [
            None,
            Some(json!(null)),
            Some(json!(0)),
            Some(json!(-1)),
            Some(json!(2.5)),
            Some(json!("abc")),
            Some(json!("")),
            Some(json!("NaN")),
            Some(json!("inf")),
            Some(json!(true)),
            Some(json!([1])),
            Some(json!(1e300)),
        ];
        for value in rejected {
            let err = coerce_day(value.as_ref()).unwrap_err();
            assert_eq!(err.to_string(), DAY_ERROR, "input {:?}", value);
        }
    }

    #[test]
    fn test_parse_day_path_segment() {
        assert_eq!(parse_day("5").unwrap(), 5);
        assert_eq!(parse_day("5.0").unwrap(), 5);
        assert!(parse_day("0").is_err());
        assert!(parse_day("-3").is_err());
        assert!(parse_day("five").is_err());
    }
}
