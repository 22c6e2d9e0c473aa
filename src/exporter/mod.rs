// ==========================================
// KOL 导入系统 - 导出层
// ==========================================
// 职责: 规范记录 → 分隔文本 / JSON 文档
// 约束: 导出结果可被导入器原样读回
// ==========================================

pub mod delimited;
pub mod error;
pub mod structured;
pub mod template;

use crate::domain::kol::NormalizedKolRecord;
use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

pub use delimited::{export_delimited, export_headers, ExportColumn, EXPORT_COLUMNS};
pub use error::{ExportError, ExportResult};
pub use structured::export_structured;
pub use template::{TEMPLATE_CSV, TEMPLATE_FILE_NAME};

/// 导出文件名前缀
const EXPORT_FILE_PREFIX: &str = "kol_export";

// ==========================================
// ExportFormat - 导出格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Csv,
    Json,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Json => "json",
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.extension())
    }
}

impl FromStr for ExportFormat {
    type Err = ExportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "json" => Ok(ExportFormat::Json),
            other => Err(ExportError::UnsupportedFormat(other.to_string())),
        }
    }
}

/// 导出记录集
pub fn export(records: &[NormalizedKolRecord], format: ExportFormat) -> ExportResult<String> {
    match format {
        ExportFormat::Csv => Ok(export_delimited(records)),
        ExportFormat::Json => export_structured(records),
    }
}

/// 导出文件名: kol_export_YYYY-MM-DD.csv|json
pub fn export_file_name(format: ExportFormat, date: NaiveDate) -> String {
    format!(
        "{}_{}.{}",
        EXPORT_FILE_PREFIX,
        date.format("%Y-%m-%d"),
        format.extension()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_export_file_name() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 7).unwrap();
        assert_eq!(
            export_file_name(ExportFormat::Csv, date),
            "kol_export_2024-03-07.csv"
        );
        assert_eq!(
            export_file_name(ExportFormat::Json, date),
            "kol_export_2024-03-07.json"
        );
    }

    #[test]
    fn test_export_format_from_str() {
        assert_eq!("CSV".parse::<ExportFormat>().unwrap(), ExportFormat::Csv);
        assert_eq!(" json ".parse::<ExportFormat>().unwrap(), ExportFormat::Json);
        assert!(matches!(
            "xml".parse::<ExportFormat>(),
            Err(ExportError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_export_empty_set() {
        let csv = export(&[], ExportFormat::Csv).unwrap();
        assert_eq!(csv.lines().count(), 1);

        let json = export(&[], ExportFormat::Json).unwrap();
        assert_eq!(json.trim(), "[]");
    }
}
