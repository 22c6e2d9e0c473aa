// ==========================================
// KOL 导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod import;
pub mod kol;
pub mod types;

// 重导出核心类型
pub use import::{
    ImportBatch, ImportOutcome, ImportProgress, RowFailure, RowOutcome, SkipReason,
};
pub use kol::{KolDraft, NormalizedKolRecord, RawRow};
pub use types::{ImportState, KolType, Platform};
