// ==========================================
// KOL 导入系统 - 导入管道 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 解析 → 字段映射 → 归一/分类 → 校验 → 逐行提交
// ==========================================

use crate::domain::import::{ImportOutcome, SkipReason};
use crate::domain::kol::{KolDraft, RawRow};
use crate::domain::types::KolType;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::InputFormat;
use crate::importer::type_classifier::PlatformPresence;
use async_trait::async_trait;
use std::path::Path;

// ==========================================
// KolImporter Trait
// ==========================================
// 用途: 批量导入主接口
// 实现者: KolImporterImpl
#[async_trait]
pub trait KolImporter: Send + Sync {
    /// 导入已解析的原始行
    ///
    /// # 说明
    /// - 行按原顺序逐条处理，逐条 await 提交，不并发
    /// - 单行提交失败只计入 failed，不中断批次
    /// - 本方法不返回错误：整批致命错误只发生在解析阶段
    async fn import_rows(&self, file_name: &str, rows: Vec<RawRow>) -> ImportOutcome;

    /// 从内存中的文件内容导入
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 批次结果
    /// - Err: 文件无法解码/解析（任何行处理之前）
    async fn import_bytes(
        &self,
        file_name: &str,
        bytes: &[u8],
        format: InputFormat,
    ) -> ImportResult<ImportOutcome>;

    /// 从文件导入（按扩展名判定格式）
    async fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件内容 → 原始行
// 实现者: CsvParser, JsonParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 数据行（不含表头）
    /// - Err: 解码失败 / 文档结构错误 / 数据不足
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 原始行 → 草稿（按别名表解析各逻辑字段）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    fn map_row(&self, row: &RawRow, row_number: usize) -> KolDraft;
}

// ==========================================
// DataCleaner Trait
// ==========================================
// 用途: 报价归一 / 多值拆分 / NULL 标准化（全部静默容错）
// 实现者: DataCleanerImpl
pub trait DataCleaner: Send + Sync {
    /// 报价字符串 → 数值；无法解析时返回 0
    fn parse_rate(&self, input: &str, currency_marker: &str) -> f64;

    /// 多值字符串 → 标签序列；不含空项
    fn split_values(&self, input: &str) -> Vec<String>;

    /// 空/空白 → None，否则返回去空白后的值
    fn normalize_null(&self, value: &str) -> Option<String>;
}

// ==========================================
// TypeClassifier Trait
// ==========================================
// 用途: 平台填写情况 → kolType
// 实现者: TypeClassifierImpl
pub trait TypeClassifier: Send + Sync {
    fn classify(&self, presence: PlatformPresence) -> KolType;
}

// ==========================================
// RowValidator Trait
// ==========================================
// 用途: 判定行是否值得提交
// 实现者: RowValidatorImpl
pub trait RowValidator: Send + Sync {
    /// # 返回
    /// - Ok(()): 可提交
    /// - Err(SkipReason): 跳过（不计入 attempted）
    fn validate(&self, draft: &KolDraft) -> Result<(), SkipReason>;
}
