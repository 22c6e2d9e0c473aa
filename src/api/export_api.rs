// ==========================================
// KOL 导出API
// ==========================================
// 职责: 读取全部记录并导出为文件 / 生成导入模板
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::exporter::{self, ExportError, ExportFormat, TEMPLATE_CSV, TEMPLATE_FILE_NAME};
use crate::repository::KolRepository;
use chrono::{Local, NaiveDate};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::info;

/// 导出API
pub struct ExportApi {
    kol_repo: Arc<dyn KolRepository>,
}

impl ExportApi {
    pub fn new(kol_repo: Arc<dyn KolRepository>) -> Self {
        Self { kol_repo }
    }

    /// 导出为文本
    pub async fn export_text(&self, format: ExportFormat) -> ApiResult<String> {
        let records = self.kol_repo.list_kols().await?;
        Ok(exporter::export(&records, format)?)
    }

    /// 导出到目录（文件名按当天日期生成）
    pub async fn export_to_dir(&self, dir: &Path, format: ExportFormat) -> ApiResult<PathBuf> {
        self.export_to_dir_on(dir, format, Local::now().date_naive())
            .await
    }

    /// 导出到目录（指定日期）
    ///
    /// # 返回
    /// - Ok(PathBuf): 写入的文件路径
    pub async fn export_to_dir_on(
        &self,
        dir: &Path,
        format: ExportFormat,
        date: NaiveDate,
    ) -> ApiResult<PathBuf> {
        let records = self.kol_repo.list_kols().await?;
        let text = exporter::export(&records, format)?;

        let path = dir.join(exporter::export_file_name(format, date));
        write_text(dir, &path, &text).await?;

        info!(
            path = %path.display(),
            records = records.len(),
            format = %format,
            "KOL 数据已导出"
        );
        Ok(path)
    }

    /// 写出导入模板
    pub async fn write_template(&self, dir: &Path) -> ApiResult<PathBuf> {
        let path = dir.join(TEMPLATE_FILE_NAME);
        write_text(dir, &path, TEMPLATE_CSV).await?;

        info!(path = %path.display(), "导入模板已生成");
        Ok(path)
    }
}

async fn write_text(dir: &Path, path: &Path, text: &str) -> ApiResult<()> {
    if dir.exists() && !dir.is_dir() {
        return Err(ApiError::InvalidInput(format!(
            "输出路径不是目录: {}",
            dir.display()
        )));
    }

    tokio::fs::create_dir_all(dir)
        .await
        .map_err(ExportError::from)?;
    tokio::fs::write(path, text)
        .await
        .map_err(ExportError::from)?;
    Ok(())
}
