// ==========================================
// KOL 导入系统 - API层错误类型
// ==========================================
// 职责: 汇总各层错误，转换为面向用户的错误消息
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 各层错误
    // ==========================================
    #[error("导入失败: {0}")]
    ImportError(#[from] ImportError),

    #[error("导出失败: {0}")]
    ExportError(#[from] ExportError),

    #[error("持久化失败: {0}")]
    RepositoryError(#[from] RepositoryError),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// API层Result类型
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_errors_convert() {
        let err: ApiError = ImportError::NotEnoughLines { found: 1 }.into();
        assert!(err.to_string().contains("导入失败"));

        let err: ApiError = RepositoryError::Rejected {
            status: 422,
            message: "name required".to_string(),
        }
        .into();
        assert!(err.to_string().contains("422"));

        let config_err: ConfigError = "bad value".into();
        let err: ApiError = config_err.into();
        assert!(matches!(err, ApiError::ConfigError(_)));
    }
}
