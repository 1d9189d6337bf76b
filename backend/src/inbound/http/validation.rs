//! Shared validation helpers for inbound HTTP adapters.
//!
//! Payload-shape checks happen here, before the domain service runs:
//! blank names, negative ages and unparsable bodies, queries or paths all
//! become `invalid_request` errors with a `details.code`.

use actix_web::error::{JsonPayloadError, PathError, QueryPayloadError};
use actix_web::{HttpRequest, web};
use serde_json::json;

use crate::domain::{Error, UserId};

/// Validation error codes reported in `details.code`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    EmptyField,
    NegativeAge,
    AgeOutOfRange,
    InvalidBody,
    InvalidQuery,
    InvalidPath,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::EmptyField => "empty_field",
            ErrorCode::NegativeAge => "negative_age",
            ErrorCode::AgeOutOfRange => "age_out_of_range",
            ErrorCode::InvalidBody => "invalid_body",
            ErrorCode::InvalidQuery => "invalid_query",
            ErrorCode::InvalidPath => "invalid_path",
        }
    }
}

/// Newtype wrapper for HTTP field names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(self) -> &'static str {
        self.0
    }
}

fn field_error(field: FieldName, code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({
        "field": field.as_str(),
        "code": code.as_str(),
    }))
}

fn request_error(code: ErrorCode, message: String) -> Error {
    Error::invalid_request(message).with_details(json!({ "code": code.as_str() }))
}

/// Reject empty or whitespace-only text.
pub(crate) fn require_non_blank(value: String, field: FieldName) -> Result<String, Error> {
    if value.trim().is_empty() {
        let name = field.as_str();
        return Err(field_error(
            field,
            ErrorCode::EmptyField,
            format!("{name} must not be empty"),
        ));
    }
    Ok(value)
}

/// Largest age every record store can hold; the database column is a
/// 32-bit signed integer.
const MAX_AGE: i64 = i32::MAX as i64;

/// Convert a client-supplied age, rejecting negatives and values no store
/// can hold.
pub(crate) fn parse_age(age: Option<i64>, field: FieldName) -> Result<Option<u32>, Error> {
    let Some(raw) = age else {
        return Ok(None);
    };
    let name = field.as_str();
    if raw < 0 {
        return Err(field_error(
            field,
            ErrorCode::NegativeAge,
            format!("{name} must not be negative"),
        ));
    }
    if raw > MAX_AGE {
        return Err(field_error(
            field,
            ErrorCode::AgeOutOfRange,
            format!("{name} must not exceed {MAX_AGE}"),
        ));
    }
    u32::try_from(raw).map(Some).map_err(|_| {
        field_error(
            field,
            ErrorCode::AgeOutOfRange,
            format!("{name} is too large"),
        )
    })
}

/// Resolve a path id. Non-positive ids can never exist, so they are
/// reported as missing.
pub(crate) fn parse_user_id(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(format!("user {raw} not found")))
}

fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    request_error(ErrorCode::InvalidBody, format!("invalid JSON body: {err}")).into()
}

fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    request_error(ErrorCode::InvalidQuery, format!("invalid query string: {err}")).into()
}

fn path_error_handler(err: PathError, _req: &HttpRequest) -> actix_web::Error {
    request_error(ErrorCode::InvalidPath, format!("invalid path parameter: {err}")).into()
}

/// JSON extractor config rendering failures as error envelopes.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}

/// Query extractor config rendering failures as error envelopes.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(query_error_handler)
}

/// Path extractor config rendering failures as error envelopes.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(path_error_handler)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode as DomainCode;
    use rstest::rstest;
    use serde_json::Value;

    const NAME: FieldName = FieldName::new("name");
    const AGE: FieldName = FieldName::new("age");

    fn detail_code(error: &Error) -> Option<&str> {
        error.details().and_then(|d| d.get("code")).and_then(Value::as_str)
    }

    #[rstest]
    #[case("")]
    #[case("  \t")]
    fn blank_values_are_rejected(#[case] value: &str) {
        let error = require_non_blank(value.to_owned(), NAME).expect_err("blank");
        assert_eq!(error.code(), DomainCode::InvalidRequest);
        assert_eq!(detail_code(&error), Some("empty_field"));
        assert_eq!(
            error.details().and_then(|d| d.get("field")).and_then(Value::as_str),
            Some("name")
        );
    }

    #[rstest]
    fn non_blank_values_pass_through_untrimmed() {
        assert_eq!(require_non_blank(" Ada ".to_owned(), NAME), Ok(" Ada ".to_owned()));
    }

    #[rstest]
    #[case(None, None)]
    #[case(Some(0), Some(0))]
    #[case(Some(42), Some(42))]
    #[case(Some(i64::from(i32::MAX)), Some(i32::MAX.unsigned_abs()))]
    fn valid_ages_convert(#[case] raw: Option<i64>, #[case] expected: Option<u32>) {
        assert_eq!(parse_age(raw, AGE), Ok(expected));
    }

    #[rstest]
    #[case(-1, "negative_age")]
    #[case(i64::from(i32::MAX) + 1, "age_out_of_range")]
    #[case(i64::from(u32::MAX) + 1, "age_out_of_range")]
    fn invalid_ages_are_rejected(#[case] raw: i64, #[case] code: &str) {
        let error = parse_age(Some(raw), AGE).expect_err("invalid age");
        assert_eq!(detail_code(&error), Some(code));
    }

    #[rstest]
    #[case(0)]
    #[case(-5)]
    fn non_positive_ids_are_not_found(#[case] raw: i64) {
        let error = parse_user_id(raw).expect_err("missing id");
        assert_eq!(error.code(), DomainCode::NotFound);
    }
}
