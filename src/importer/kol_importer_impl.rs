// ==========================================
// KOL 导入系统 - 批量导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到持久化边界
// 流程: 解析 → 映射 → 校验 → 归一/分类 → 逐行提交 → 汇总
// 状态: Idle → Running → Completed
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::import::{ImportOutcome, RowOutcome};
use crate::domain::kol::RawRow;
use crate::domain::types::ImportState;
use crate::importer::data_cleaner::{DataCleaner as DataCleanerImpl, DEFAULT_CURRENCY_MARKER};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::FieldMapper as FieldMapperImpl;
use crate::importer::file_parser::{InputFormat, UniversalFileParser};
use crate::importer::kol_importer_trait::{
    DataCleaner, FieldMapper, KolImporter, RowValidator, TypeClassifier,
};
use crate::importer::progress::{CancellationFlag, ImportProgressListener, NoopProgressListener};
use crate::importer::record_builder::build_record;
use crate::importer::row_validator::RowValidator as RowValidatorImpl;
use crate::importer::type_classifier::TypeClassifier as TypeClassifierImpl;
use crate::repository::KolRepository;
use async_trait::async_trait;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::{debug, error, info, instrument, warn};

/// 单次运行开始时读取的配置
#[derive(Debug, Clone)]
struct RunSettings {
    currency_marker: String,
    row_delay: Duration,
}

// ==========================================
// KolImporterImpl - 批量导入器实现
// ==========================================
pub struct KolImporterImpl<R, C>
where
    R: KolRepository,
    C: ImportConfigReader,
{
    // 持久化边界
    repo: R,

    // 配置读取器
    config: C,

    // 导入组件
    file_parser: UniversalFileParser,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: Box<dyn DataCleaner>,
    type_classifier: Box<dyn TypeClassifier>,
    row_validator: Box<dyn RowValidator>,

    // 运行时钩子
    listener: Arc<dyn ImportProgressListener>,
    cancellation: CancellationFlag,
    row_delay_override: Option<Duration>,

    // 当前状态（未运行过为 Idle）
    state: Mutex<ImportState>,
}

impl<R, C> KolImporterImpl<R, C>
where
    R: KolRepository,
    C: ImportConfigReader,
{
    /// 创建新的 KolImporter 实例
    ///
    /// # 参数
    /// - repo: 持久化边界
    /// - config: 配置读取器
    /// - field_mapper: 字段映射器
    /// - data_cleaner: 报价归一 / 多值拆分
    /// - type_classifier: 分类器
    /// - row_validator: 行校验器
    pub fn new(
        repo: R,
        config: C,
        field_mapper: Box<dyn FieldMapper>,
        data_cleaner: Box<dyn DataCleaner>,
        type_classifier: Box<dyn TypeClassifier>,
        row_validator: Box<dyn RowValidator>,
    ) -> Self {
        Self {
            repo,
            config,
            file_parser: UniversalFileParser,
            field_mapper,
            data_cleaner,
            type_classifier,
            row_validator,
            listener: Arc::new(NoopProgressListener),
            cancellation: CancellationFlag::new(),
            row_delay_override: None,
            state: Mutex::new(ImportState::Idle),
        }
    }

    /// 使用默认组件创建
    pub fn with_defaults(repo: R, config: C) -> Self {
        Self::new(
            repo,
            config,
            Box::new(FieldMapperImpl),
            Box::new(DataCleanerImpl),
            Box::new(TypeClassifierImpl),
            Box::new(RowValidatorImpl),
        )
    }

    /// 设置进度监听器
    pub fn with_listener(mut self, listener: Arc<dyn ImportProgressListener>) -> Self {
        self.listener = listener;
        self
    }

    /// 设置取消标记（调用方保留克隆，随时 cancel）
    pub fn with_cancellation(mut self, cancellation: CancellationFlag) -> Self {
        self.cancellation = cancellation;
        self
    }

    /// 覆盖配置中的行间等待
    pub fn with_row_delay(mut self, delay: Duration) -> Self {
        self.row_delay_override = Some(delay);
        self
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// 当前状态
    pub fn state(&self) -> ImportState {
        *self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn transition(&self, next: ImportState) {
        *self.state.lock().unwrap_or_else(|e| e.into_inner()) = next;
        self.listener.on_state(next);
    }

    /// 读取本次运行配置；读取失败时使用默认值，不中断导入
    async fn load_settings(&self) -> RunSettings {
        let currency_marker = match self.config.get_currency_marker().await {
            Ok(marker) => marker,
            Err(e) => {
                warn!(error = %e, "货币标记读取失败，使用默认值");
                DEFAULT_CURRENCY_MARKER.to_string()
            }
        };

        let row_delay = match self.row_delay_override {
            Some(delay) => delay,
            None => match self.config.get_row_delay_ms().await {
                Ok(ms) => Duration::from_millis(ms),
                Err(e) => {
                    warn!(error = %e, "行间等待读取失败，不等待");
                    Duration::ZERO
                }
            },
        };

        RunSettings {
            currency_marker,
            row_delay,
        }
    }

    /// 处理单行：映射 → 校验 → 构建 → 提交
    async fn process_row(
        &self,
        row: &RawRow,
        row_number: usize,
        settings: &RunSettings,
    ) -> RowOutcome {
        let draft = self.field_mapper.map_row(row, row_number);

        if let Err(reason) = self.row_validator.validate(&draft) {
            debug!(row_number = row_number, reason = %reason, "跳过行");
            return RowOutcome::Skipped(reason);
        }

        let record = build_record(
            &draft,
            self.data_cleaner.as_ref(),
            self.type_classifier.as_ref(),
            &settings.currency_marker,
        );

        match self.repo.create_kol(&record).await {
            Ok(id) => {
                debug!(
                    row_number = row_number,
                    name = %record.name,
                    kol_type = %record.kol_type,
                    id = %id,
                    "KOL 记录已提交"
                );
                RowOutcome::Submitted { id }
            }
            Err(e) => {
                warn!(
                    row_number = row_number,
                    name = %record.name,
                    error = %e,
                    "KOL 记录提交失败，继续处理下一行"
                );
                RowOutcome::Failed {
                    name: record.name,
                    reason: e.to_string(),
                }
            }
        }
    }
}

#[async_trait]
impl<R, C> KolImporter for KolImporterImpl<R, C>
where
    R: KolRepository,
    C: ImportConfigReader,
{
    #[instrument(skip(self, rows), fields(total_rows = rows.len()))]
    async fn import_rows(&self, file_name: &str, rows: Vec<RawRow>) -> ImportOutcome {
        let settings = self.load_settings().await;
        let mut outcome = ImportOutcome::new(file_name, rows.len());

        info!(
            batch_id = %outcome.batch_id,
            file_name = %file_name,
            total_rows = rows.len(),
            "开始导入 KOL 数据"
        );
        self.transition(ImportState::Running);

        for (idx, row) in rows.iter().enumerate() {
            if self.cancellation.is_cancelled() {
                outcome.cancelled = true;
                warn!(
                    batch_id = %outcome.batch_id,
                    rows_processed = outcome.rows_processed(),
                    "导入已取消，剩余行不再处理"
                );
                break;
            }

            let row_number = idx + 1;
            let row_outcome = self.process_row(row, row_number, &settings).await;
            outcome.record(row_number, &row_outcome);
            self.listener.on_progress(outcome.progress());

            if !settings.row_delay.is_zero() {
                tokio::time::sleep(settings.row_delay).await;
            }
        }

        outcome.finish();
        self.transition(ImportState::Completed);

        info!(
            batch_id = %outcome.batch_id,
            attempted = outcome.attempted,
            succeeded = outcome.succeeded,
            failed = outcome.failed,
            skipped = outcome.skipped,
            cancelled = outcome.cancelled,
            elapsed_ms = outcome.elapsed_ms,
            "KOL 数据导入完成"
        );

        outcome
    }

    async fn import_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        format: InputFormat,
    ) -> ImportResult<ImportOutcome> {
        let rows = self.file_parser.parse(format, bytes).map_err(|e| {
            error!(file_name = %file_name, error = %e, "文件解析失败");
            e
        })?;

        debug!(file_name = %file_name, rows = rows.len(), "文件解析完成");
        Ok(self.import_rows(file_name, rows).await)
    }

    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome> {
        let format = InputFormat::from_path(file_path)?;
        let bytes = tokio::fs::read(file_path).await.map_err(|e| {
            error!(file_path = %file_path.display(), error = %e, "文件读取失败");
            e
        })?;

        let file_name = file_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| file_path.display().to_string());

        self.import_bytes(&file_name, &bytes, format).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::domain::kol::NormalizedKolRecord;
    use crate::domain::types::KolType;
    use crate::importer::error::ImportError;
    use crate::repository::{RepositoryError, RepositoryResult};
    use std::sync::Mutex;

    // ===== 测试替身 =====

    #[derive(Default)]
    struct RecordingRepo {
        submitted: Mutex<Vec<NormalizedKolRecord>>,
        fail_names: Vec<String>,
    }

    #[async_trait]
    impl KolRepository for RecordingRepo {
        async fn create_kol(&self, record: &NormalizedKolRecord) -> RepositoryResult<String> {
            let mut submitted = self.submitted.lock().unwrap();
            submitted.push(record.clone());
            if self.fail_names.contains(&record.name) {
                return Err(RepositoryError::Rejected {
                    status: 422,
                    message: "invalid".to_string(),
                });
            }
            Ok(format!("id-{}", submitted.len()))
        }

        async fn list_kols(&self) -> RepositoryResult<Vec<NormalizedKolRecord>> {
            Ok(self.submitted.lock().unwrap().clone())
        }
    }

    struct FixedConfig {
        marker: &'static str,
        row_delay_ms: u64,
    }

    #[async_trait]
    impl ImportConfigReader for FixedConfig {
        async fn get_currency_marker(&self) -> Result<String, ConfigError> {
            Ok(self.marker.to_string())
        }
        async fn get_row_delay_ms(&self) -> Result<u64, ConfigError> {
            Ok(self.row_delay_ms)
        }
        async fn get_api_base_url(&self) -> Result<Option<String>, ConfigError> {
            Ok(None)
        }
        async fn get_api_timeout_secs(&self) -> Result<u64, ConfigError> {
            Ok(30)
        }
    }

    fn importer(repo: RecordingRepo) -> KolImporterImpl<RecordingRepo, FixedConfig> {
        KolImporterImpl::with_defaults(repo, FixedConfig { marker: "RM", row_delay_ms: 0 })
    }

    fn ig_row(name: &str) -> RawRow {
        RawRow::from_pairs([
            ("name", name.to_string()),
            ("instagram", format!("https://instagram.com/{}", name)),
        ])
    }

    #[tokio::test]
    async fn test_end_to_end_delimited_scenario() {
        let importer = importer(RecordingRepo::default());
        let text = "Name,IG Link,Rate for IG\nJohn,https://instagram.com/john,RM2500\nJane,,";

        let outcome = importer
            .import_bytes("kols.csv", text.as_bytes(), InputFormat::Delimited)
            .await
            .unwrap();

        assert_eq!(outcome.attempted, 1);
        assert_eq!(outcome.succeeded, 1);
        assert_eq!(outcome.failed, 0);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.finished_at.is_some());

        let submitted = importer.repository().submitted.lock().unwrap();
        assert_eq!(submitted[0].name, "John");
        assert_eq!(submitted[0].kol_type, KolType::Instagram);
        assert_eq!(submitted[0].rate, 2500.0);
    }

    #[tokio::test]
    async fn test_row_failure_does_not_stop_batch() {
        let repo = RecordingRepo {
            fail_names: vec!["kol5".to_string()],
            ..Default::default()
        };
        let importer = importer(repo);
        let rows: Vec<RawRow> = (1..=10).map(|i| ig_row(&format!("kol{}", i))).collect();

        let outcome = importer.import_rows("batch.csv", rows).await;

        assert_eq!(outcome.succeeded, 9);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.attempted, 10);
        assert_eq!(outcome.failures[0].row_number, 5);
        assert_eq!(outcome.failures[0].name, "kol5");

        let submitted = importer.repository().submitted.lock().unwrap();
        let names: Vec<&str> = submitted.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(&names[5..], &["kol6", "kol7", "kol8", "kol9", "kol10"]);
    }

    #[tokio::test]
    async fn test_unparsable_input_processes_nothing() {
        let importer = importer(RecordingRepo::default());
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let importer = importer.with_listener(Arc::new(move |p: crate::domain::ImportProgress| {
            sink.lock().unwrap().push(p)
        }));

        let result = importer
            .import_bytes("only_header.csv", b"name,instagram\n", InputFormat::Delimited)
            .await;

        assert!(matches!(result, Err(ImportError::NotEnoughLines { found: 1 })));
        assert!(seen.lock().unwrap().is_empty());
        assert!(importer.repository().submitted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_configured_currency_marker_is_used() {
        let importer = KolImporterImpl::with_defaults(
            RecordingRepo::default(),
            FixedConfig {
                marker: "USD",
                row_delay_ms: 0,
            },
        );
        let row = RawRow::from_pairs([
            ("name", "Lee"),
            ("tiktok", "https://tiktok.com/@lee"),
            ("tiktokRate", "USD 1,250"),
        ]);

        importer.import_rows("usd.csv", vec![row]).await;

        let submitted = importer.repository().submitted.lock().unwrap();
        assert_eq!(submitted[0].tiktok_rate, 1250.0);
        assert_eq!(submitted[0].kol_type, KolType::Tiktok);
    }

    #[tokio::test]
    async fn test_row_delay_comes_from_config_unless_overridden() {
        let config = || FixedConfig {
            marker: "RM",
            row_delay_ms: 40,
        };

        let from_config = KolImporterImpl::with_defaults(RecordingRepo::default(), config());
        assert_eq!(
            from_config.load_settings().await.row_delay,
            Duration::from_millis(40)
        );

        let overridden = KolImporterImpl::with_defaults(RecordingRepo::default(), config())
            .with_row_delay(Duration::ZERO);
        assert_eq!(overridden.load_settings().await.row_delay, Duration::ZERO);
    }

    #[tokio::test]
    async fn test_state_starts_idle_and_ends_completed() {
        let importer = importer(RecordingRepo::default());
        assert_eq!(importer.state(), ImportState::Idle);

        importer.import_rows("one.csv", vec![ig_row("amy")]).await;
        assert_eq!(importer.state(), ImportState::Completed);
    }

    #[tokio::test]
    async fn test_import_file_unsupported_extension() {
        let importer = importer(RecordingRepo::default());
        let result = importer.import_file(Path::new("kols.pdf")).await;
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
