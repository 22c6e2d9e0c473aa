// ==========================================
// KOL 导入系统 - 导入批次 Repository Trait
// ==========================================
// 职责: 导入历史（批次汇总）读写
// ==========================================

use crate::domain::import::ImportBatch;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// ImportBatchRepository Trait
// ==========================================
// 实现者: SqliteKolRepository
#[async_trait]
pub trait ImportBatchRepository: Send + Sync {
    /// 写入一条批次汇总
    async fn insert_batch(&self, batch: &ImportBatch) -> RepositoryResult<()>;

    /// 最近的批次（按导入时间倒序）
    async fn list_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>>;
}
