// ==========================================
// KOL 导入系统 - 导出模块错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("导出格式不支持: {0}（仅支持 csv/json）")]
    UnsupportedFormat(String),

    #[error("序列化失败: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("导出文件写入失败: {0}")]
    WriteError(#[from] std::io::Error),
}

pub type ExportResult<T> = Result<T, ExportError>;
