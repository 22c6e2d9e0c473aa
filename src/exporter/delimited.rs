// ==========================================
// KOL 导入系统 - 分隔文本导出
// ==========================================
// 输出: 表头行 + 每条记录一行（逗号分隔，按需加引号）
// 列名使用各字段别名列表中的规范名，保证可被导入器读回
// ==========================================

use crate::domain::kol::NormalizedKolRecord;
use crate::importer::alias_table::KolField;
use crate::importer::data_cleaner::join_values;
use crate::importer::tokenizer::{join_fields, DEFAULT_DELIMITER};

/// 导出列：逻辑字段，或只出现在导出中的分类列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportColumn {
    Field(KolField),
    KolType,
}

/// 导出列（固定顺序）
pub const EXPORT_COLUMNS: [ExportColumn; 24] = [
    ExportColumn::Field(KolField::Name),
    ExportColumn::KolType,
    ExportColumn::Field(KolField::InstagramUrl),
    ExportColumn::Field(KolField::InstagramRate),
    ExportColumn::Field(KolField::TiktokUrl),
    ExportColumn::Field(KolField::TiktokRate),
    ExportColumn::Field(KolField::FacebookUrl),
    ExportColumn::Field(KolField::FacebookRate),
    ExportColumn::Field(KolField::TwitterUrl),
    ExportColumn::Field(KolField::TwitterRate),
    ExportColumn::Field(KolField::ThreadUrl),
    ExportColumn::Field(KolField::ThreadRate),
    ExportColumn::Field(KolField::BlogUrl),
    ExportColumn::Field(KolField::BlogRate),
    ExportColumn::Field(KolField::Rate),
    ExportColumn::Field(KolField::Niches),
    ExportColumn::Field(KolField::Gender),
    ExportColumn::Field(KolField::HairStyle),
    ExportColumn::Field(KolField::Race),
    ExportColumn::Field(KolField::Address),
    ExportColumn::Field(KolField::ContactNumber),
    ExportColumn::Field(KolField::Pic),
    ExportColumn::Field(KolField::Notes),
    ExportColumn::Field(KolField::RateDetails),
];

impl ExportColumn {
    /// 列名：逻辑字段取别名列表第一项
    pub fn header(&self) -> &'static str {
        match self {
            ExportColumn::Field(field) => field.canonical_header(),
            ExportColumn::KolType => "kolType",
        }
    }

    fn value(&self, record: &NormalizedKolRecord) -> String {
        let field = match self {
            ExportColumn::KolType => return record.kol_type.as_str().to_string(),
            ExportColumn::Field(field) => field,
        };

        match field {
            KolField::Name => single_line(&record.name),
            KolField::InstagramUrl => single_line(&record.instagram),
            KolField::TiktokUrl => single_line(&record.tiktok),
            KolField::FacebookUrl => single_line(&record.facebook),
            KolField::TwitterUrl => single_line(&record.twitter),
            KolField::ThreadUrl => single_line(&record.thread),
            KolField::BlogUrl => single_line(&record.blog),
            KolField::InstagramRate => format_rate(record.instagram_rate),
            KolField::TiktokRate => format_rate(record.tiktok_rate),
            KolField::FacebookRate => format_rate(record.facebook_rate),
            KolField::TwitterRate => format_rate(record.twitter_rate),
            KolField::ThreadRate => format_rate(record.thread_rate),
            KolField::BlogRate => format_rate(record.blog_rate),
            KolField::Rate => format_rate(record.rate),
            KolField::Niches => single_line(&join_values(&record.niches)),
            KolField::Gender => optional(&record.gender),
            KolField::HairStyle => optional(&record.hair_style),
            KolField::Race => optional(&record.race),
            KolField::Address => optional(&record.address),
            KolField::ContactNumber => optional(&record.contact_number),
            KolField::Pic => optional(&record.pic),
            KolField::Notes => optional(&record.notes),
            KolField::RateDetails => optional(&record.rate_details),
        }
    }
}

/// 表头行的各列名
pub fn export_headers() -> Vec<&'static str> {
    EXPORT_COLUMNS.iter().map(ExportColumn::header).collect()
}

const LINE_SEPARATOR: &str = "\n";

pub fn export_delimited(records: &[NormalizedKolRecord]) -> String {
    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(join_fields(&export_headers(), DEFAULT_DELIMITER));

    for record in records {
        lines.push(join_fields(&record_fields(record), DEFAULT_DELIMITER));
    }

    let mut text = lines.join(LINE_SEPARATOR);
    text.push_str(LINE_SEPARATOR);
    text
}

fn record_fields(record: &NormalizedKolRecord) -> Vec<String> {
    EXPORT_COLUMNS
        .iter()
        .map(|column| column.value(record))
        .collect()
}

fn optional(value: &Option<String>) -> String {
    value.as_deref().map(single_line).unwrap_or_default()
}

/// 2500.0 → "2500"，3000.5 → "3000.5"
fn format_rate(rate: f64) -> String {
    rate.to_string()
}

// 导入按行切分，字段内换行替换为空格
fn single_line(value: &str) -> String {
    if value.contains(['\r', '\n']) {
        value
            .split(['\r', '\n'])
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" ")
    } else {
        value.to_string()
    }
}
