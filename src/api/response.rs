//! API response types
//!
//! HTTP bodies use the `success` envelope; the one-shot CLI uses the
//! `status` envelope.

use serde::Serialize;

/// `{success: true, data}`
#[derive(Debug, Clone, Serialize)]
pub struct DataResponse<T> {
    pub success: bool,
    pub data: T,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// `{success: true, exists}`
#[derive(Debug, Clone, Serialize)]
pub struct ExistsResponse {
    pub success: bool,
    pub exists: bool,
}

impl ExistsResponse {
    pub fn new(exists: bool) -> Self {
        Self {
            success: true,
            exists,
        }
    }
}

/// Health check body
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// CLI success output
#[derive(Debug, Clone, Serialize)]
pub struct SuccessResponse<T> {
    pub status: &'static str,
    pub data: T,
}

impl<T: Serialize> SuccessResponse<T> {
    pub fn new(data: T) -> Self {
        Self { status: "ok", data }
    }
}

/// CLI error output
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub status: &'static str,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error",
            code: code.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelopes() {
        assert_eq!(
            serde_json::to_value(DataResponse::new(json!({"name": "John"}))).unwrap(),
            json!({"success": true, "data": {"name": "John"}})
        );
        assert_eq!(
            serde_json::to_value(ExistsResponse::new(false)).unwrap(),
            json!({"success": true, "exists": false})
        );
    }

    #[test]
    fn test_cli_envelopes() {
        assert_eq!(
            serde_json::to_value(SuccessResponse::new(1)).unwrap(),
            json!({"status": "ok", "data": 1})
        );
        assert_eq!(
            serde_json::to_value(ErrorResponse::new("CODE", "boom")).unwrap(),
            json!({"status": "error", "code": "CODE", "message": "boom"})
        );
    }
}
