// ==========================================
// KOL 导入系统 - 表格分词器
// ==========================================
// 职责: 单行分隔文本 → 字段序列（识别引号与转义引号）
// 以及其逆操作: 字段 → 可回读的单行文本
// ==========================================

/// 默认字段分隔符
pub const DEFAULT_DELIMITER: char = ',';

const QUOTE: char = '"';

/// 按分隔符切分一行文本
///
/// 规则:
/// - 引号切换 in_quotes；引号内连续两个引号表示一个字面引号
/// - 仅在引号外遇到分隔符时结束当前字段
/// - 行尾总是输出最后一个字段（可能为空）
/// - 未闭合的引号不报错，剩余内容归入最后一个字段
pub fn tokenize(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == QUOTE {
            if in_quotes && chars.peek() == Some(&QUOTE) {
                current.push(QUOTE);
                chars.next();
            } else {
                in_quotes = !in_quotes;
            }
        } else if c == delimiter && !in_quotes {
            fields.push(std::mem::take(&mut current));
        } else {
            current.push(c);
        }
    }

    fields.push(current);
    fields
}

/// 使用默认逗号分隔符切分
pub fn tokenize_line(line: &str) -> Vec<String> {
    tokenize(line, DEFAULT_DELIMITER)
}

/// 字段转义（tokenize 的逆操作）
///
/// 字段含分隔符或引号时加引号，内部引号双写；否则原样输出
pub fn escape_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains(QUOTE) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// 拼接一行（每个字段按 escape_field 转义）
pub fn join_fields<S: AsRef<str>>(fields: &[S], delimiter: char) -> String {
    fields
        .iter()
        .map(|f| escape_field(f.as_ref(), delimiter))
        .collect::<Vec<_>>()
        .join(&delimiter.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_quoted_delimiter() {
        assert_eq!(tokenize_line(r#"a,"b,c",d"#), vec!["a", "b,c", "d"]);
    }

    #[test]
    fn test_tokenize_escaped_quote() {
        assert_eq!(tokenize_line(r#"a,"b""c",d"#), vec!["a", "b\"c", "d"]);
    }

    #[test]
    fn test_tokenize_plain_and_trailing_empty() {
        assert_eq!(tokenize_line("plain"), vec!["plain"]);
        assert_eq!(tokenize_line("Jane,,"), vec!["Jane", "", ""]);
        assert_eq!(tokenize_line(""), vec![""]);
    }

    #[test]
    fn test_tokenize_unterminated_quote_is_tolerated() {
        assert_eq!(tokenize_line(r#"a,"b,c"#), vec!["a", "b,c"]);
    }

    #[test]
    fn test_tokenize_custom_delimiter() {
        assert_eq!(tokenize("a;\"b;c\";d", ';'), vec!["a", "b;c", "d"]);
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain", ','), "plain");
        assert_eq!(escape_field("a,b", ','), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\"", ','), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("", ','), "");
    }

    #[test]
    fn test_join_then_tokenize_preserves_fields() {
        let fields = vec!["Jane Doe", "Food, Travel", "5\" heels", ""];
        let line = join_fields(&fields, ',');
        assert_eq!(tokenize_line(&line), fields);
    }
}
