//! Success envelope shared by every contact endpoint.

use serde::Serialize;
use utoipa::ToSchema;

/// Wraps response data as `{"status": "success", "data": ...}`.
///
/// `ApiResponse<()>` serializes `data` as `null`.
#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    #[schema(value_type = String, example = "success")]
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            status: "success",
            data,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let body = serde_json::to_value(ApiResponse::success(json!({"a": 1}))).unwrap();
        assert_eq!(body, json!({"status": "success", "data": {"a": 1}}));
    }

    #[test]
    fn test_unit_data_is_null() {
        let body = serde_json::to_value(ApiResponse::success(())).unwrap();
        assert_eq!(body, json!({"status": "success", "data": null}));
    }
}
