// ==========================================
// KOL 导入系统 - 领域类型定义
// ==========================================
// 职责: 平台枚举 / KOL 分类标签 / 导入状态机
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 平台 (Platform)
// ==========================================
// 顺序固定: 平台链接/报价在草稿中按此顺序存放
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    Tiktok,
    Facebook,
    Twitter,
    Thread,
    Blog,
}

impl Platform {
    /// 全部平台（固定顺序）
    pub const ALL: [Platform; 6] = [
        Platform::Instagram,
        Platform::Tiktok,
        Platform::Facebook,
        Platform::Twitter,
        Platform::Thread,
        Platform::Blog,
    ];

    /// 在 ALL 中的下标
    pub fn index(self) -> usize {
        match self {
            Platform::Instagram => 0,
            Platform::Tiktok => 1,
            Platform::Facebook => 2,
            Platform::Twitter => 3,
            Platform::Thread => 4,
            Platform::Blog => 5,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::Tiktok => "tiktok",
            Platform::Facebook => "facebook",
            Platform::Twitter => "twitter",
            Platform::Thread => "thread",
            Platform::Blog => "blog",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// KOL 分类标签 (KOL Type)
// ==========================================
// 序列化格式: kebab-case（与持久化服务一致）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KolType {
    #[default]
    SocialMedia,   // 综合社媒（默认）
    Tiktok,        // TikTok 专属
    Instagram,     // Instagram 专属
    TwitterThread, // Twitter / Threads
    Blogger,       // 博主
}

impl KolType {
    pub fn as_str(&self) -> &'static str {
        match self {
            KolType::SocialMedia => "social-media",
            KolType::Tiktok => "tiktok",
            KolType::Instagram => "instagram",
            KolType::TwitterThread => "twitter-thread",
            KolType::Blogger => "blogger",
        }
    }

    /// 从存储字符串解析；未知值回退为默认分类
    pub fn from_str_or_default(value: &str) -> Self {
        match value.trim() {
            "tiktok" => KolType::Tiktok,
            "instagram" => KolType::Instagram,
            "twitter-thread" => KolType::TwitterThread,
            "blogger" => KolType::Blogger,
            _ => KolType::SocialMedia,
        }
    }
}

impl fmt::Display for KolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 导入状态 (Import State)
// ==========================================
// Idle → Running → Completed（无 Cancelled 终态，取消仍以 Completed 收尾）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportState {
    #[default]
    Idle,
    Running,
    Completed,
}

impl fmt::Display for ImportState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImportState::Idle => write!(f, "IDLE"),
            ImportState::Running => write!(f, "RUNNING"),
            ImportState::Completed => write!(f, "COMPLETED"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_index_matches_all() {
        for (idx, platform) in Platform::ALL.iter().enumerate() {
            assert_eq!(platform.index(), idx);
        }
    }

    #[test]
    fn test_kol_type_serde_kebab_case() {
        let json = serde_json::to_string(&KolType::TwitterThread).unwrap();
        assert_eq!(json, "\"twitter-thread\"");

        let parsed: KolType = serde_json::from_str("\"social-media\"").unwrap();
        assert_eq!(parsed, KolType::SocialMedia);
    }

    #[test]
    fn test_kol_type_from_str_or_default() {
        assert_eq!(KolType::from_str_or_default("blogger"), KolType::Blogger);
        assert_eq!(KolType::from_str_or_default("unknown"), KolType::SocialMedia);
    }
}
