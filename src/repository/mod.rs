// ==========================================
// KOL 导入系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================
// 职责: 持久化边界，屏蔽本地数据库 / 远端服务细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod error;
pub mod http_kol_repo;
pub mod import_batch_repo;
pub mod kol_repo;
pub mod kol_repo_impl;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use http_kol_repo::HttpKolRepository;
pub use import_batch_repo::ImportBatchRepository;
pub use kol_repo::KolRepository;
pub use kol_repo_impl::SqliteKolRepository;
