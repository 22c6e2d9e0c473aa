// ==========================================
// KOL 导入系统 - 表头别名表
// ==========================================
// 职责: 逻辑字段 → 可接受的原始表头拼写（按优先级排序）
// 约束: 区分大小写，每种拼写显式列出，不做大小写归一
// 约束: 每个列表第一项为导出时使用的规范名
// ==========================================

use crate::domain::kol::RawRow;
use crate::domain::types::Platform;

/// 逻辑字段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KolField {
    Name,
    InstagramUrl,
    TiktokUrl,
    FacebookUrl,
    TwitterUrl,
    ThreadUrl,
    BlogUrl,
    InstagramRate,
    TiktokRate,
    FacebookRate,
    TwitterRate,
    ThreadRate,
    BlogRate,
    Rate,
    Niches,
    Gender,
    HairStyle,
    Race,
    Address,
    ContactNumber,
    Pic,
    Notes,
    RateDetails,
}

impl KolField {
    pub const ALL: [KolField; 23] = [
        KolField::Name,
        KolField::InstagramUrl,
        KolField::TiktokUrl,
        KolField::FacebookUrl,
        KolField::TwitterUrl,
        KolField::ThreadUrl,
        KolField::BlogUrl,
        KolField::InstagramRate,
        KolField::TiktokRate,
        KolField::FacebookRate,
        KolField::TwitterRate,
        KolField::ThreadRate,
        KolField::BlogRate,
        KolField::Rate,
        KolField::Niches,
        KolField::Gender,
        KolField::HairStyle,
        KolField::Race,
        KolField::Address,
        KolField::ContactNumber,
        KolField::Pic,
        KolField::Notes,
        KolField::RateDetails,
    ];

    /// 平台链接字段
    pub fn url_of(platform: Platform) -> Self {
        match platform {
            Platform::Instagram => KolField::InstagramUrl,
            Platform::Tiktok => KolField::TiktokUrl,
            Platform::Facebook => KolField::FacebookUrl,
            Platform::Twitter => KolField::TwitterUrl,
            Platform::Thread => KolField::ThreadUrl,
            Platform::Blog => KolField::BlogUrl,
        }
    }

    /// 平台报价字段
    pub fn rate_of(platform: Platform) -> Self {
        match platform {
            Platform::Instagram => KolField::InstagramRate,
            Platform::Tiktok => KolField::TiktokRate,
            Platform::Facebook => KolField::FacebookRate,
            Platform::Twitter => KolField::TwitterRate,
            Platform::Thread => KolField::ThreadRate,
            Platform::Blog => KolField::BlogRate,
        }
    }

    /// 导出列名（别名列表第一项）
    pub fn canonical_header(&self) -> &'static str {
        self.aliases()[0]
    }

    /// 可接受的原始表头，按优先级排序
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            KolField::Name => &["name", "Name", "KOL Name"],

            // ===== 平台链接 =====
            KolField::InstagramUrl => &[
                "instagram",
                "Instagram",
                "instagramUrl",
                "IG Link",
                "Instagram Link",
            ],
            KolField::TiktokUrl => &["tiktok", "TikTok", "Tiktok", "tiktokUrl", "TikTok Link"],
            KolField::FacebookUrl => &[
                "facebook",
                "Facebook",
                "facebookUrl",
                "FB Link",
                "Facebook Link",
            ],
            KolField::TwitterUrl => &[
                "twitter",
                "Twitter",
                "twitterUrl",
                "Twitter Link",
                "X Link",
            ],
            KolField::ThreadUrl => &[
                "thread",
                "Thread",
                "threads",
                "Threads",
                "threadUrl",
                "Threads Link",
            ],
            KolField::BlogUrl => &["blog", "Blog", "blogUrl", "Blog Link"],

            // ===== 平台报价 =====
            KolField::InstagramRate => &[
                "instagramRate",
                "instagram_rate",
                "Rate for Instagram",
                "Rate for IG",
            ],
            KolField::TiktokRate => &[
                "tiktokRate",
                "tiktok_rate",
                "Rate for TikTok",
                "Rate for Tiktok",
            ],
            KolField::FacebookRate => &[
                "facebookRate",
                "facebook_rate",
                "Rate for Facebook",
                "Rate for FB",
            ],
            KolField::TwitterRate => &[
                "twitterRate",
                "twitter_rate",
                "Rate for Twitter",
                "Rate for X",
            ],
            KolField::ThreadRate => &[
                "threadRate",
                "thread_rate",
                "Rate for Thread",
                "Rate for Threads",
            ],
            KolField::BlogRate => &["blogRate", "blog_rate", "Rate for Blog"],
            KolField::Rate => &["rate", "Rate"],

            // ===== 标签与其他 =====
            KolField::Niches => &["niches", "niche", "Niche", "Niches"],
            KolField::Gender => &["gender", "Gender"],
            KolField::HairStyle => &["hairStyle", "hair_style", "Hair Style"],
            KolField::Race => &["race", "Race"],
            KolField::Address => &["address", "Address"],
            KolField::ContactNumber => &["contactNumber", "contact_number", "Contact Number"],
            KolField::Pic => &["pic", "PIC"],
            KolField::Notes => &["notes", "Notes", "Remarks"],
            KolField::RateDetails => &["rateDetails", "rate_details", "Rate Details"],
        }
    }
}

/// 字段解析: 按别名顺序返回第一个去空白后非空的值；都没有则返回空串
pub fn resolve(row: &RawRow, field: KolField) -> String {
    field
        .aliases()
        .iter()
        .find_map(|alias| row.get_non_empty(alias))
        .map(str::to_string)
        .unwrap_or_default()
}
