// ==========================================
// KOL 导入系统 - KOL 分类器实现
// ==========================================
// 职责: 根据已填写的平台链接推断 kolType
// 规则（先命中先返回，顺序不可调换）:
// 1. 无任何平台                         → social-media
// 2. IG 与 TikTok 同时填写，或 IG/TikTok 与其他平台混填 → social-media
// 3. 仅 TikTok                          → tiktok
// 4. 仅 Instagram                       → instagram
// 5. Twitter 或 Threads                 → twitter-thread
// 6. Blog                               → blogger
// 7. 其他（仅 Facebook 等）             → social-media
// ==========================================

use crate::domain::kol::KolDraft;
use crate::domain::types::{KolType, Platform};
use crate::importer::kol_importer_trait::TypeClassifier as TypeClassifierTrait;

/// 六个平台链接的填写情况
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlatformPresence {
    pub instagram: bool,
    pub tiktok: bool,
    pub facebook: bool,
    pub twitter: bool,
    pub thread: bool,
    pub blog: bool,
}

impl PlatformPresence {
    pub fn from_draft(draft: &KolDraft) -> Self {
        let has = |p: Platform| !draft.link(p).trim().is_empty();
        Self {
            instagram: has(Platform::Instagram),
            tiktok: has(Platform::Tiktok),
            facebook: has(Platform::Facebook),
            twitter: has(Platform::Twitter),
            thread: has(Platform::Thread),
            blog: has(Platform::Blog),
        }
    }

    fn count(&self) -> usize {
        [
            self.instagram,
            self.tiktok,
            self.facebook,
            self.twitter,
            self.thread,
            self.blog,
        ]
        .iter()
        .filter(|b| **b)
        .count()
    }
}

pub struct TypeClassifier;

impl TypeClassifierTrait for TypeClassifier {
    fn classify(&self, presence: PlatformPresence) -> KolType {
        classify(presence)
    }
}

/// 分类（见模块头部规则表）
pub fn classify(p: PlatformPresence) -> KolType {
    let populated = p.count();

    if populated == 0 {
        return KolType::SocialMedia;
    }
    if (p.instagram && p.tiktok) || ((p.instagram || p.tiktok) && populated > 1) {
        return KolType::SocialMedia;
    }
    if p.tiktok {
        return KolType::Tiktok;
    }
    if p.instagram {
        return KolType::Instagram;
    }
    if p.twitter || p.thread {
        return KolType::TwitterThread;
    }
    if p.blog {
        return KolType::Blogger;
    }
    KolType::SocialMedia
}
