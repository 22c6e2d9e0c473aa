// ==========================================
// KOL 导入系统 - 核心库
// ==========================================
// 技术栈: Rust + Tokio + SQLite / HTTP
// 系统定位: KOL 名录表格导入、归一化、批量提交与导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 持久化边界
pub mod repository;

// 导入层 - 外部表格数据
pub mod importer;

// 导出层 - CSV / JSON / 模板
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组件装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{ImportState, KolType, Platform};

// 领域实体
pub use domain::{
    ImportBatch, ImportOutcome, ImportProgress, NormalizedKolRecord, RawRow, RowOutcome,
    SkipReason,
};

// 导入器
pub use importer::{ImportError, KolImporter, KolImporterImpl};

// 导出器
pub use exporter::{export, ExportFormat};

// 仓储
pub use repository::{KolRepository, RepositoryError};

// ==========================================
// 系统常量
// ==========================================

/// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
