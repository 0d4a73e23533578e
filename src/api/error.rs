// ==========================================
// 订单包装计算服务 - API层错误类型
// ==========================================
// 职责: 统一仓储/引擎错误,映射为状态码与 {"error": ...} 响应
// ==========================================

use crate::engine::error::PlannerError;
use crate::repository::error::RepositoryError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    // ==========================================
    // 请求格式错误
    // ==========================================
    #[error("Invalid request")]
    InvalidRequest(String),

    #[error("route not found: {0}")]
    NotFound(String),

    #[error("method {method} not allowed for {path}")]
    MethodNotAllowed { method: String, path: String },

    // ==========================================
    // 业务校验错误
    // ==========================================
    #[error("invalid pack size {value} at position {index}: pack sizes must be positive integers")]
    MalformedPackSize { index: usize, value: String },

    #[error("order amount must be a positive integer, got {0}")]
    MalformedOrderAmount(String),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    Planner(#[from] PlannerError),
}

impl ApiError {
    /// HTTP 状态码
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::InvalidRequest(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::MethodNotAllowed { .. } => 405,
            ApiError::MalformedPackSize { .. } | ApiError::MalformedOrderAmount(_) => 400,
            ApiError::Repository(_) => 400,
            ApiError::Planner(PlannerError::InsufficientPackSizes) => 422,
            ApiError::Planner(_) => 400,
        }
    }

    /// 错误响应体
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.to_string(),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

/// 错误响应（返回给前端）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_are_client_errors() {
        let errors = vec![
            ApiError::from(RepositoryError::EmptyPackSizeSet),
            ApiError::from(RepositoryError::InvalidPackSize { index: 0, value: -3 }),
            ApiError::from(PlannerError::InvalidOrderAmount(0)),
            ApiError::from(PlannerError::NoPackSizesConfigured),
            ApiError::InvalidRequest("expected value".to_string()),
            ApiError::MalformedOrderAmount("\"abc\"".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code(), 400, "{}", err);
        }
    }

    #[test]
    fn test_error_response_uses_display_message() {
        let err = ApiError::from(PlannerError::NoPackSizesConfigured);
        assert_eq!(err.to_response().error, "no pack sizes configured");

        // 解析细节只进日志,不回显给前端
        let err = ApiError::InvalidRequest("EOF while parsing".to_string());
        assert_eq!(err.to_response().error, "Invalid request");
    }
}
