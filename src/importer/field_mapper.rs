// ==========================================
// KOL 导入系统 - 字段映射器实现
// ==========================================
// 职责: RawRow → KolDraft（按别名表逐字段解析，值已去空白）
// ==========================================

use crate::domain::kol::{KolDraft, RawRow};
use crate::domain::types::Platform;
use crate::importer::alias_table::{resolve, KolField};
use crate::importer::kol_importer_trait::FieldMapper as FieldMapperTrait;

pub struct FieldMapper;

impl FieldMapperTrait for FieldMapper {
    fn map_row(&self, row: &RawRow, row_number: usize) -> KolDraft {
        let mut draft = KolDraft {
            row_number,
            name: resolve(row, KolField::Name),
            rate: resolve(row, KolField::Rate),
            niches: resolve(row, KolField::Niches),
            gender: resolve(row, KolField::Gender),
            hair_style: resolve(row, KolField::HairStyle),
            race: resolve(row, KolField::Race),
            address: resolve(row, KolField::Address),
            contact_number: resolve(row, KolField::ContactNumber),
            pic: resolve(row, KolField::Pic),
            notes: resolve(row, KolField::Notes),
            rate_details: resolve(row, KolField::RateDetails),
            ..KolDraft::default()
        };

        for platform in Platform::ALL {
            draft.links[platform.index()] = resolve(row, KolField::url_of(platform));
            draft.rates[platform.index()] = resolve(row, KolField::rate_of(platform));
        }

        draft
    }
}
