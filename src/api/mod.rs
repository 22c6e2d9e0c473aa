// ==========================================
// KOL 导入系统 - API层
// ==========================================
// 职责: 面向命令行的业务门面，组合导入器 / 导出器 / 仓储
// ==========================================

pub mod error;
pub mod export_api;
pub mod import_api;

pub use error::{ApiError, ApiResult};
pub use export_api::ExportApi;
pub use import_api::ImportApi;
