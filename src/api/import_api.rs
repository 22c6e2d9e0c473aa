// ==========================================
// KOL 导入API
// ==========================================
// 职责: 封装导入流程 + 导入历史记录
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::ImportConfigReader;
use crate::domain::import::{ImportBatch, ImportOutcome};
use crate::importer::{
    CancellationFlag, ImportProgressListener, InputFormat, KolImporter, KolImporterImpl,
};
use crate::repository::{ImportBatchRepository, KolRepository};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// 导入API
pub struct ImportApi {
    kol_repo: Arc<dyn KolRepository>,
    batch_repo: Arc<dyn ImportBatchRepository>,
    config: Arc<dyn ImportConfigReader>,
    listener: Option<Arc<dyn ImportProgressListener>>,
    cancellation: CancellationFlag,
}

impl ImportApi {
    /// 创建新的ImportApi实例
    pub fn new(
        kol_repo: Arc<dyn KolRepository>,
        batch_repo: Arc<dyn ImportBatchRepository>,
        config: Arc<dyn ImportConfigReader>,
    ) -> Self {
        Self {
            kol_repo,
            batch_repo,
            config,
            listener: None,
            cancellation: CancellationFlag::new(),
        }
    }

    /// 设置进度监听器
    pub fn with_listener(mut self, listener: Arc<dyn ImportProgressListener>) -> Self {
        self.listener = Some(listener);
        self
    }

    /// 取消标记（克隆后可在其他任务中调用 cancel）
    pub fn cancellation(&self) -> CancellationFlag {
        self.cancellation.clone()
    }

    fn create_importer(
        &self,
    ) -> KolImporterImpl<Arc<dyn KolRepository>, Arc<dyn ImportConfigReader>> {
        let importer = KolImporterImpl::with_defaults(self.kol_repo.clone(), self.config.clone())
            .with_cancellation(self.cancellation.clone());

        match &self.listener {
            Some(listener) => importer.with_listener(listener.clone()),
            None => importer,
        }
    }

    /// 导入文件
    ///
    /// # 参数
    /// - file_path: 文件路径（.csv/.txt/.json/.xlsx/.xls）
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 批次结果（单行失败已计入 failed）
    /// - Err(ApiError): 文件不存在 / 格式不支持 / 无法解析
    pub async fn import_file(&self, file_path: &Path) -> ApiResult<ImportOutcome> {
        if file_path.as_os_str().is_empty() {
            return Err(ApiError::InvalidInput("文件路径不能为空".to_string()));
        }
        if !file_path.is_file() {
            return Err(ApiError::NotFound(format!(
                "文件不存在: {}",
                file_path.display()
            )));
        }

        let outcome = self.create_importer().import_file(file_path).await?;
        self.record_batch(&outcome).await;
        Ok(outcome)
    }

    /// 导入内存中的文件内容
    pub async fn import_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        format: InputFormat,
    ) -> ApiResult<ImportOutcome> {
        let outcome = self
            .create_importer()
            .import_bytes(file_name, bytes, format)
            .await?;
        self.record_batch(&outcome).await;
        Ok(outcome)
    }

    /// 最近的导入批次
    pub async fn list_recent_batches(&self, limit: usize) -> ApiResult<Vec<ImportBatch>> {
        if limit == 0 {
            return Err(ApiError::InvalidInput("limit 必须大于 0".to_string()));
        }
        Ok(self.batch_repo.list_recent_batches(limit).await?)
    }

    /// 写入批次历史；失败只记日志
    async fn record_batch(&self, outcome: &ImportOutcome) {
        let batch = ImportBatch::from(outcome);
        match self.batch_repo.insert_batch(&batch).await {
            Ok(()) => info!(batch_id = %batch.batch_id, "导入批次已记录"),
            Err(e) => warn!(batch_id = %batch.batch_id, error = %e, "导入批次记录失败"),
        }
    }
}
