// ==========================================
// KOL 导入系统 - 导入批次领域模型
// ==========================================
// 职责: 单行结果 / 批次累加器 / 进度 / 历史批次记录
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

// ==========================================
// SkipReason - 跳过原因
// ==========================================
// 跳过 = 数据不足、未尝试提交；不计入 failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SkipReason {
    MissingName,    // 名称为空
    NoPlatformLink, // 没有任何平台链接
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingName => write!(f, "名称为空"),
            SkipReason::NoPlatformLink => write!(f, "没有任何平台链接"),
        }
    }
}

// ==========================================
// RowOutcome - 单行处理结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum RowOutcome {
    /// 提交成功（持久化服务返回的 ID，可能为空）
    Submitted { id: String },
    /// 未通过行校验，未提交
    Skipped(SkipReason),
    /// 已提交但被拒绝/不可达
    Failed { name: String, reason: String },
}

// ==========================================
// RowFailure - 提交失败明细（用于诊断）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowFailure {
    pub row_number: usize,
    pub name: String,
    pub reason: String,
}

// ==========================================
// ImportOutcome - 批次结果累加器
// ==========================================
// 不变量:
// - attempted = succeeded + failed
// - skipped 不计入 attempted
// - 运行期间各计数只增不减
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportOutcome {
    pub batch_id: String,
    pub file_name: String,
    pub total_rows: usize,
    pub attempted: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub cancelled: bool,
    pub failures: Vec<RowFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub elapsed_ms: i64,
}

impl ImportOutcome {
    pub fn new(file_name: impl Into<String>, total_rows: usize) -> Self {
        Self {
            batch_id: Uuid::new_v4().to_string(),
            file_name: file_name.into(),
            total_rows,
            attempted: 0,
            succeeded: 0,
            failed: 0,
            skipped: 0,
            cancelled: false,
            failures: Vec::new(),
            started_at: Utc::now(),
            finished_at: None,
            elapsed_ms: 0,
        }
    }

    /// 累加单行结果
    pub fn record(&mut self, row_number: usize, outcome: &RowOutcome) {
        match outcome {
            RowOutcome::Submitted { .. } => {
                self.attempted += 1;
                self.succeeded += 1;
            }
            RowOutcome::Skipped(_) => {
                self.skipped += 1;
            }
            RowOutcome::Failed { name, reason } => {
                self.attempted += 1;
                self.failed += 1;
                self.failures.push(RowFailure {
                    row_number,
                    name: name.clone(),
                    reason: reason.clone(),
                });
            }
        }
    }

    /// 已处理行数（成功 + 失败 + 跳过）
    pub fn rows_processed(&self) -> usize {
        self.attempted + self.skipped
    }

    pub fn progress(&self) -> ImportProgress {
        ImportProgress::new(self.rows_processed(), self.total_rows)
    }

    /// 收尾：写入结束时间与耗时
    pub fn finish(&mut self) {
        let now = Utc::now();
        self.elapsed_ms = (now - self.started_at).num_milliseconds();
        self.finished_at = Some(now);
    }
}

// ==========================================
// ImportProgress - 导入进度
// ==========================================
// percent = round(rows_processed / total_rows * 100)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportProgress {
    pub rows_processed: usize,
    pub total_rows: usize,
    pub percent: u8,
}

impl ImportProgress {
    pub fn new(rows_processed: usize, total_rows: usize) -> Self {
        let percent = if total_rows == 0 {
            0
        } else {
            let ratio = rows_processed.min(total_rows) as f64 / total_rows as f64;
            (ratio * 100.0).round() as u8
        };
        Self {
            rows_processed,
            total_rows,
            percent,
        }
    }
}

// ==========================================
// ImportBatch - 导入批次历史
// ==========================================
// 对齐: import_batch 表
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImportBatch {
    pub batch_id: String,
    pub file_name: String,
    pub total_rows: i64,
    pub attempted: i64,
    pub succeeded: i64,
    pub failed: i64,
    pub skipped: i64,
    pub cancelled: bool,
    pub imported_at: DateTime<Utc>,
    pub elapsed_ms: i64,
}

impl From<&ImportOutcome> for ImportBatch {
    fn from(outcome: &ImportOutcome) -> Self {
        Self {
            batch_id: outcome.batch_id.clone(),
            file_name: outcome.file_name.clone(),
            total_rows: outcome.total_rows as i64,
            attempted: outcome.attempted as i64,
            succeeded: outcome.succeeded as i64,
            failed: outcome.failed as i64,
            skipped: outcome.skipped as i64,
            cancelled: outcome.cancelled,
            imported_at: outcome.finished_at.unwrap_or(outcome.started_at),
            elapsed_ms: outcome.elapsed_ms,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_outcome_record_counts() {
        let mut outcome = ImportOutcome::new("kols.csv", 4);
        outcome.record(2, &RowOutcome::Submitted { id: "a".to_string() });
        outcome.record(3, &RowOutcome::Skipped(SkipReason::NoPlatformLink));
        outcome.record(
            4,
            &RowOutcome::Failed {
                name: "Bob".to_string(),
                reason: "HTTP 422".to_string(),
            },
        );
        outcome.record(5, &RowOutcome::Submitted { id: "b".to_string() });

        assert_eq!(outcome.attempted, 3);
        assert_eq!(outcome.succeeded, 2);
        assert_eq!(outcome.failed, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(outcome.attempted, outcome.succeeded + outcome.failed);
        assert_eq!(outcome.rows_processed(), 4);
        assert_eq!(outcome.failures.len(), 1);
        assert_eq!(outcome.failures[0].row_number, 4);
        assert_eq!(outcome.failures[0].name, "Bob");
    }

    #[test]
    fn test_progress_rounding() {
        assert_eq!(ImportProgress::new(1, 3).percent, 33);
        assert_eq!(ImportProgress::new(2, 3).percent, 67);
        assert_eq!(ImportProgress::new(3, 3).percent, 100);
        assert_eq!(ImportProgress::new(0, 0).percent, 0);
    }

    #[test]
    fn test_batch_from_outcome() {
        let mut outcome = ImportOutcome::new("kols.json", 2);
        outcome.record(1, &RowOutcome::Submitted { id: String::new() });
        outcome.finish();

        let batch = ImportBatch::from(&outcome);
        assert_eq!(batch.batch_id, outcome.batch_id);
        assert_eq!(batch.succeeded, 1);
        assert_eq!(batch.total_rows, 2);
        assert_eq!(Some(batch.imported_at), outcome.finished_at);
    }
}
