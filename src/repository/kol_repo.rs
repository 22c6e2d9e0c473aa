// ==========================================
// KOL 导入系统 - KOL Repository Trait
// ==========================================
// 职责: 持久化边界（导入管道只依赖此接口）
// 红线: Repository 不含业务规则，只做数据读写
// 说明: 每次 create 视为服务端独立原子操作，不做跨行事务
// ==========================================

use crate::domain::kol::NormalizedKolRecord;
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;

// ==========================================
// KolRepository Trait
// ==========================================
// 实现者: HttpKolRepository（远端服务）, SqliteKolRepository（本地存储）
#[async_trait]
pub trait KolRepository: Send + Sync {
    /// 创建一条 KOL 记录
    ///
    /// # 返回
    /// - Ok(String): 服务端分配的记录 ID（服务端未返回时为空串）
    /// - Err: 校验被拒 / 网络不可达 / 超时
    async fn create_kol(&self, record: &NormalizedKolRecord) -> RepositoryResult<String>;

    /// 查询全部 KOL 记录（导出用）
    async fn list_kols(&self) -> RepositoryResult<Vec<NormalizedKolRecord>>;
}

// 共享实例（导入器与导出共用同一个仓储）
#[async_trait]
impl<T> KolRepository for std::sync::Arc<T>
where
    T: KolRepository + ?Sized,
{
    async fn create_kol(&self, record: &NormalizedKolRecord) -> RepositoryResult<String> {
        (**self).create_kol(record).await
    }

    async fn list_kols(&self) -> RepositoryResult<Vec<NormalizedKolRecord>> {
        (**self).list_kols().await
    }
}
