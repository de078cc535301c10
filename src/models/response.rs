use serde::{Deserialize, Serialize};

/// 解题服务的响应
///
/// 成功时带 `solution`，失败时带 `error`；没有 `error` 即视为成功。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub solution: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServiceResponse {
    /// 成功响应
    pub fn solved(solution: impl Into<String>) -> Self {
        Self {
            success: Some(true),
            solution: Some(solution.into()),
            ..Default::default()
        }
    }

    /// 失败响应
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_backend_success_shape() {
        let response: ServiceResponse = serde_json::from_str(
            r#"{"success": true, "message": "题目处理成功", "solution": "x = 2"}"#,
        )
        .unwrap();

        assert_eq!(response.solution.as_deref(), Some("x = 2"));
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_null_error_is_absent() {
        let response: ServiceResponse =
            serde_json::from_str(r#"{"error": null, "solution": "ok"}"#).unwrap();
        assert_eq!(response.error, None);
    }

    #[test]
    fn test_failure_serializes_error_only() {
        let json = serde_json::to_string(&ServiceResponse::failure("bad input")).unwrap();
        assert_eq!(json, r#"{"error":"bad input"}"#);
    }
}
