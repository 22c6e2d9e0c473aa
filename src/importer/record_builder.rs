// ==========================================
// KOL 导入系统 - 规范记录构建
// ==========================================
// 职责: KolDraft → NormalizedKolRecord
// 报价归一 + 多值拆分 + 分类 + 综合报价取最大值
// ==========================================

use crate::domain::kol::{KolDraft, NormalizedKolRecord, RawRow};
use crate::domain::types::Platform;
use crate::importer::data_cleaner::{DataCleaner, DEFAULT_CURRENCY_MARKER};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::kol_importer_trait::{
    DataCleaner as DataCleanerTrait, FieldMapper as FieldMapperTrait,
    TypeClassifier as TypeClassifierTrait,
};
use crate::importer::type_classifier::{PlatformPresence, TypeClassifier};

/// 由草稿构建规范记录
///
/// rate = max(六个平台报价, 显式报价)；全部缺失时为 0
pub fn build_record(
    draft: &KolDraft,
    cleaner: &dyn DataCleanerTrait,
    classifier: &dyn TypeClassifierTrait,
    currency_marker: &str,
) -> NormalizedKolRecord {
    let mut record = NormalizedKolRecord::named(draft.name.trim());

    let mut max_rate = cleaner.parse_rate(&draft.rate, currency_marker);
    for platform in Platform::ALL {
        record.set_link(platform, draft.link(platform).trim().to_string());

        let rate = cleaner.parse_rate(draft.raw_rate(platform), currency_marker);
        record.set_platform_rate(platform, rate);
        max_rate = max_rate.max(rate);
    }
    record.rate = max_rate;

    record.kol_type = classifier.classify(PlatformPresence::from_draft(draft));
    record.niches = cleaner.split_values(&draft.niches);

    record.gender = cleaner.normalize_null(&draft.gender);
    record.hair_style = cleaner.normalize_null(&draft.hair_style);
    record.race = cleaner.normalize_null(&draft.race);
    record.address = cleaner.normalize_null(&draft.address);
    record.contact_number = cleaner.normalize_null(&draft.contact_number);
    record.pic = cleaner.normalize_null(&draft.pic);
    record.notes = cleaner.normalize_null(&draft.notes);
    record.rate_details = cleaner.normalize_null(&draft.rate_details);

    record
}

/// 使用默认组件归一单行（不做行校验）
pub fn normalize_row(row: &RawRow, row_number: usize) -> (KolDraft, NormalizedKolRecord) {
    let draft = FieldMapper.map_row(row, row_number);
    let record = build_record(&draft, &DataCleaner, &TypeClassifier, DEFAULT_CURRENCY_MARKER);
    (draft, record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::KolType;

    #[test]
    fn test_build_record_rate_is_max() {
        let row = RawRow::from_pairs([
            ("name", "Aisyah"),
            ("instagram", "https://instagram.com/aisyah"),
            ("tiktok", "https://tiktok.com/@aisyah"),
            ("instagramRate", "RM1,200"),
            ("tiktokRate", "RM 3,000.50"),
            ("rate", "2000"),
        ]);

        let (_, record) = normalize_row(&row, 2);

        assert_eq!(record.instagram_rate, 1200.0);
        assert_eq!(record.tiktok_rate, 3000.5);
        assert_eq!(record.facebook_rate, 0.0);
        assert_eq!(record.rate, 3000.5);
        assert_eq!(record.kol_type, KolType::SocialMedia);
    }

    #[test]
    fn test_explicit_rate_wins_when_higher() {
        let row = RawRow::from_pairs([
            ("name", "Ben"),
            ("blog", "https://ben.blog"),
            ("blogRate", "300"),
            ("Rate", "RM5,000"),
        ]);

        let (_, record) = normalize_row(&row, 2);

        assert_eq!(record.rate, 5000.0);
        assert_eq!(record.kol_type, KolType::Blogger);
    }

    #[test]
    fn test_no_rates_means_zero() {
        let row = RawRow::from_pairs([("name", "Cat"), ("facebook", "https://fb.com/cat")]);
        let (_, record) = normalize_row(&row, 2);
        assert_eq!(record.rate, 0.0);
    }

    #[test]
    fn test_niches_and_optional_fields() {
        let row = RawRow::from_pairs([
            ("name", "Dina"),
            ("thread", "https://threads.net/@dina"),
            ("niches", "Beauty, ,Lifestyle|"),
            ("gender", "  "),
            ("race", "Malay"),
        ]);

        let (_, record) = normalize_row(&row, 2);

        assert_eq!(record.niches, vec!["Beauty", "Lifestyle"]);
        assert_eq!(record.gender, None);
        assert_eq!(record.race, Some("Malay".to_string()));
        assert_eq!(record.kol_type, KolType::TwitterThread);
    }
}
