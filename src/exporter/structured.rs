// ==========================================
// KOL 导入系统 - JSON 导出
// ==========================================
// 输出: 缩进格式的 camelCase 记录数组，niches 为数组
// ==========================================

use crate::domain::kol::NormalizedKolRecord;
use crate::exporter::error::ExportResult;

pub fn export_structured(records: &[NormalizedKolRecord]) -> ExportResult<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::KolType;

    #[test]
    fn test_structured_export_shape() {
        let mut record = NormalizedKolRecord::named("Amy");
        record.kol_type = KolType::Blogger;
        record.blog = "https://amy.blog".to_string();
        record.niches = vec!["Food".to_string()];

        let text = export_structured(&[record]).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();

        assert_eq!(value[0]["kolType"], "blogger");
        assert_eq!(value[0]["niches"][0], "Food");
        assert!(value[0].get("gender").is_none());
        assert!(text.contains('\n'));
    }
}
