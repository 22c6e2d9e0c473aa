// ==========================================
// KOL 导入系统 - 文件解析器实现
// ==========================================
// 支持: 分隔文本 (.csv/.txt) / 结构化文本 (.json) / Excel (.xlsx/.xls)
// 输出: 数据行 RawRow 序列（表头不计入）
// ==========================================

use crate::domain::kol::RawRow;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::kol_importer_trait::FileParser;
use crate::importer::tokenizer::{tokenize, DEFAULT_DELIMITER};
use calamine::{open_workbook_auto_from_rs, Reader};
use serde_json::Value;
use std::io::Cursor;
use std::path::Path;

const UTF8_BOM: &str = "\u{feff}";

// ==========================================
// 输入格式
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Delimited,   // 分隔文本
    Structured,  // JSON 数组
    Spreadsheet, // Excel 工作簿
}

impl InputFormat {
    /// 按扩展名判定格式
    pub fn from_path(path: &Path) -> ImportResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" | "txt" => Ok(InputFormat::Delimited),
            "json" => Ok(InputFormat::Structured),
            "xlsx" | "xls" => Ok(InputFormat::Spreadsheet),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

/// 字节 → 文本（必须为 UTF-8，去掉开头的 BOM）
pub fn decode_text(bytes: &[u8]) -> ImportResult<&str> {
    let text = std::str::from_utf8(bytes).map_err(|e| ImportError::Unreadable(e.to_string()))?;
    Ok(text.strip_prefix(UTF8_BOM).unwrap_or(text))
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser {
    delimiter: char,
}

impl Default for CsvParser {
    fn default() -> Self {
        Self {
            delimiter: DEFAULT_DELIMITER,
        }
    }
}

impl CsvParser {
    /// 解析分隔文本
    ///
    /// - 第一条非空行为表头（单元格去空白）
    /// - 空白行忽略；`Jane,,` 这类只有分隔符的行不算空白
    /// - 超出表头宽度的字段丢弃，缺失的尾部字段不出现在 RawRow 中
    pub fn parse_text(&self, text: &str) -> ImportResult<Vec<RawRow>> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.len() < 2 {
            return Err(ImportError::NotEnoughLines { found: lines.len() });
        }

        let headers: Vec<String> = tokenize(lines[0], self.delimiter)
            .into_iter()
            .map(|h| h.trim().to_string())
            .collect();

        let rows = lines[1..]
            .iter()
            .map(|line| {
                let mut row = RawRow::new();
                for (col_idx, value) in tokenize(line, self.delimiter).into_iter().enumerate() {
                    if let Some(header) = headers.get(col_idx) {
                        row.push(header.clone(), value);
                    }
                }
                row
            })
            .collect();

        Ok(rows)
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        self.parse_text(decode_text(bytes)?)
    }
}

// ==========================================
// JSON Parser 实现
// ==========================================
// 输入: 对象数组，每个对象为扁平的 属性名 → 值
pub struct JsonParser;

impl JsonParser {
    pub fn parse_text(&self, text: &str) -> ImportResult<Vec<RawRow>> {
        let document: Value = serde_json::from_str(text)?;
        let items = match document {
            Value::Array(items) => items,
            _ => {
                return Err(ImportError::StructuredParseError(
                    "顶层必须是对象数组".to_string(),
                ))
            }
        };

        if items.is_empty() {
            return Err(ImportError::StructuredParseError(
                "文档不含任何记录".to_string(),
            ));
        }

        items
            .into_iter()
            .enumerate()
            .map(|(idx, item)| match item {
                Value::Object(map) => Ok(RawRow::from_pairs(
                    map.into_iter().map(|(k, v)| (k, value_to_text(&v))),
                )),
                other => Err(ImportError::StructuredParseError(format!(
                    "第 {} 个元素不是对象: {}",
                    idx + 1,
                    other
                ))),
            })
            .collect()
    }
}

impl FileParser for JsonParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        self.parse_text(decode_text(bytes)?)
    }
}

/// JSON 值 → 文本
///
/// 数组（如导出的 niches）用分号拼接，null 为空串
fn value_to_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .filter(|s| !s.trim().is_empty())
            .collect::<Vec<_>>()
            .join(";"),
        Value::Object(_) => value.to_string(),
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 读取第一个工作表，第一行为表头
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_to_raw_rows(&self, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or(ImportError::NotEnoughLines { found: 0 })?;

        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| cell.to_string().trim().to_string())
            .collect();

        // 读取数据行
        let mut records = Vec::new();
        for data_row in rows {
            let mut row = RawRow::new();
            for (col_idx, cell) in data_row.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.push(header.clone(), cell.to_string());
                }
            }

            // 跳过完全空白的行
            if row.iter().all(|(_, v)| v.trim().is_empty()) {
                continue;
            }

            records.push(row);
        }

        if records.is_empty() {
            return Err(ImportError::NotEnoughLines { found: 1 });
        }

        Ok(records)
    }
}

// ==========================================
// 通用文件解析器（根据格式自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    pub fn parse(&self, format: InputFormat, bytes: &[u8]) -> ImportResult<Vec<RawRow>> {
        match format {
            InputFormat::Delimited => CsvParser::default().parse_to_raw_rows(bytes),
            InputFormat::Structured => JsonParser.parse_to_raw_rows(bytes),
            InputFormat::Spreadsheet => ExcelParser.parse_to_raw_rows(bytes),
        }
    }
}
