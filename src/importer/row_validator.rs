// ==========================================
// KOL 导入系统 - 行校验器实现
// ==========================================
// 职责: 判断一行是否值得提交（名称非空 + 至少一个平台链接）
// 说明: 未通过 → skipped（未尝试），不是 failed（已尝试被拒）
// ==========================================

use crate::domain::import::SkipReason;
use crate::domain::kol::KolDraft;
use crate::importer::kol_importer_trait::RowValidator as RowValidatorTrait;

pub struct RowValidator;

impl RowValidatorTrait for RowValidator {
    fn validate(&self, draft: &KolDraft) -> Result<(), SkipReason> {
        if draft.name.trim().is_empty() {
            return Err(SkipReason::MissingName);
        }
        if !draft.has_any_link() {
            return Err(SkipReason::NoPlatformLink);
        }
        Ok(())
    }
}

/// 是否可导入
pub fn is_importable(draft: &KolDraft) -> bool {
    RowValidator.validate(draft).is_ok()
}
