// ==========================================
// KOL 导入系统 - 数据清洗器实现
// ==========================================
// 职责: 报价归一（货币前缀/千分位/空白）/ 多值拆分 / NULL 标准化
// 约束: 全部静默容错，无法解析时返回 0 / 空序列，不报错
// ==========================================

use crate::importer::kol_importer_trait::DataCleaner as DataCleanerTrait;

/// 默认货币标记
pub const DEFAULT_CURRENCY_MARKER: &str = "RM";

/// 多值字段可接受的分隔符
pub const VALUE_SEPARATORS: [char; 3] = [';', ',', '|'];

/// 导出时使用的唯一分隔符
pub const CANONICAL_VALUE_SEPARATOR: char = ';';

const THOUSANDS_SEPARATOR: char = ',';

pub struct DataCleaner;

impl DataCleanerTrait for DataCleaner {
    fn parse_rate(&self, input: &str, currency_marker: &str) -> f64 {
        parse_rate_with_marker(input, currency_marker)
    }

    fn split_values(&self, input: &str) -> Vec<String> {
        split_values(input)
    }

    fn normalize_null(&self, value: &str) -> Option<String> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        }
    }
}

/// 使用默认货币标记解析报价
pub fn parse_rate(input: &str) -> f64 {
    parse_rate_with_marker(input, DEFAULT_CURRENCY_MARKER)
}

/// 报价归一
///
/// 1. 空/空白 → 0
/// 2. 去掉所有货币标记、千分位逗号、空白
/// 3. 取第一段连续数字（可带一个小数点）解析为浮点数
/// 4. 找不到数字 → 0
pub fn parse_rate_with_marker(input: &str, currency_marker: &str) -> f64 {
    if input.trim().is_empty() {
        return 0.0;
    }

    let stripped = if currency_marker.is_empty() {
        input.to_string()
    } else {
        input.replace(currency_marker, "")
    };
    let cleaned: String = stripped
        .chars()
        .filter(|c| *c != THOUSANDS_SEPARATOR && !c.is_whitespace())
        .collect();

    extract_number(&cleaned)
        .and_then(|s| s.parse::<f64>().ok())
        .unwrap_or(0.0)
}

/// 提取第一段数字（digits[.digits]，或 .digits）
fn extract_number(text: &str) -> Option<String> {
    let chars: Vec<char> = text.chars().collect();
    let start = (0..chars.len()).find(|&i| {
        chars[i].is_ascii_digit()
            || (chars[i] == '.' && chars.get(i + 1).is_some_and(|c| c.is_ascii_digit()))
    })?;

    let mut number = String::new();
    let mut seen_dot = false;
    let mut i = start;
    while i < chars.len() {
        let c = chars[i];
        if c.is_ascii_digit() {
            number.push(c);
        } else if c == '.'
            && !seen_dot
            && chars.get(i + 1).is_some_and(|n| n.is_ascii_digit())
        {
            if number.is_empty() {
                number.push('0');
            }
            number.push('.');
            seen_dot = true;
        } else {
            break;
        }
        i += 1;
    }

    Some(number)
}

/// 多值拆分
///
/// 按 `;` `,` `|` 任一分隔，逐项去空白并丢弃空项；保持原顺序，不去重
pub fn split_values(input: &str) -> Vec<String> {
    if input.trim().is_empty() {
        return Vec::new();
    }

    input
        .split(|c: char| VALUE_SEPARATORS.contains(&c))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// 多值合并（导出用，统一使用分号）
pub fn join_values(values: &[String]) -> String {
    values.join(&CANONICAL_VALUE_SEPARATOR.to_string())
}
