//! Path extractor for contact ids.

use axum::extract::{FromRequestParts, Path};
use axum::http::request::Parts;
use serde_json::json;

use crate::error::AppError;

/// A positive contact id taken from the `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactId(pub i64);

impl ContactId {
    /// Parses a raw path segment.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] unless the segment is a positive 64-bit integer.
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(AppError::bad_request(
                "Invalid contact id",
                json!({ "id": raw }),
            )),
        }
    }
}

impl<S> FromRequestParts<S> for ContactId
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(raw) = Path::<String>::from_request_parts(parts, state).await?;
        Self::parse(&raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_id() {
        assert_eq!(ContactId::parse("42").unwrap(), ContactId(42));
    }

    #[test]
    fn test_parse_rejects_invalid_ids() {
        for raw in ["abc", "0", "-3", "1.5", "", "99999999999999999999"] {
            assert!(ContactId::parse(raw).is_err(), "{raw} should be rejected");
        }
    }
}
