// ==========================================
// KOL 导入系统 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 覆盖: 本地 SQLite 存储 + 远端持久化服务（HTTP）
// ==========================================

use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 数据库错误 =====
    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    #[error("唯一约束违反: {0}")]
    UniqueConstraintViolation(String),

    // ===== 持久化服务错误 =====
    #[error("持久化服务拒绝请求 (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("持久化服务不可达: {0}")]
    Transport(String),

    #[error("持久化服务响应格式错误: {0}")]
    InvalidResponse(String),

    // ===== 数据错误 =====
    #[error("序列化失败: {0}")]
    SerializationError(String),
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        match err {
            rusqlite::Error::SqliteFailure(_, Some(msg)) if msg.contains("UNIQUE") => {
                RepositoryError::UniqueConstraintViolation(msg)
            }
            rusqlite::Error::SqliteFailure(_, Some(msg)) => {
                RepositoryError::DatabaseQueryError(msg)
            }
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

// 实现 From<reqwest::Error>
impl From<reqwest::Error> for RepositoryError {
    fn from(err: reqwest::Error) -> Self {
        match err.status() {
            Some(status) => RepositoryError::Rejected {
                status: status.as_u16(),
                message: err.to_string(),
            },
            None if err.is_decode() => RepositoryError::InvalidResponse(err.to_string()),
            None => RepositoryError::Transport(err.to_string()),
        }
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for RepositoryError {
    fn from(err: serde_json::Error) -> Self {
        RepositoryError::SerializationError(err.to_string())
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
