//! 错误处理模块
//!
//! 定义应用程序的错误类型和错误处理逻辑。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::DataAccessError;

/// 应用程序错误类型
#[derive(Error, Debug)]
pub enum AppError {
    /// 数据存储访问错误
    #[error("数据访问错误: {0}")]
    DataAccess(#[from] DataAccessError),

    /// 资源不存在
    #[error("资源不存在: {0}")]
    NotFound(String),

    /// 参数验证错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),
}

/// Axum response implementation for AppError
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = (&self).into();
        let body = Json(ErrorResponse::new(&code, &self.to_string()));
        (
            StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            body,
        )
            .into_response()
    }
}

/// 错误响应
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,
    /// 错误消息
    pub message: String,
    /// 详细信息
    pub details: Option<String>,
}

impl ErrorResponse {
    /// 创建新错误响应
    pub fn new(code: &str, message: &str) -> Self {
        Self {
            code: code.to_string(),
            message: message.to_string(),
            details: None,
        }
    }
}

/// HTTP 状态码映射
impl From<&AppError> for (u16, String) {
    fn from(err: &AppError) -> (u16, String) {
        match err {
            AppError::NotFound(_) => (404, "NOT_FOUND".to_string()),
            AppError::Validation(_) => (400, "BAD_REQUEST".to_string()),
            AppError::DataAccess(_) => (503, "STORE_UNAVAILABLE".to_string()),
            AppError::Config(_) => (500, "CONFIG_ERROR".to_string()),
        }
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        let (status, code): (u16, String) = (&AppError::NotFound("company 9".into())).into();
        assert_eq!(status, 404);
        assert_eq!(code, "NOT_FOUND");

        let err = AppError::from(DataAccessError::Unavailable("offline".into()));
        let (status, code): (u16, String) = (&err).into();
        assert_eq!(status, 503);
        assert_eq!(code, "STORE_UNAVAILABLE");

        let err = AppError::Config("未知的存储后端: oracle".into());
        let (status, code): (u16, String) = (&err).into();
        assert_eq!(status, 500);
        assert_eq!(code, "CONFIG_ERROR");
    }
}
