// ==========================================
// KOL 导入系统 - KOL 领域模型
// ==========================================
// 导入管道分三段: RawRow（原始行）→ KolDraft（已解析字符串）
// → NormalizedKolRecord（强类型规范记录，交给持久化边界）
// ==========================================

use crate::domain::types::{KolType, Platform};
use serde::{Deserialize, Serialize};

// ==========================================
// RawRow - 原始行
// ==========================================
// 表头 → 原始值，保持文件中的列顺序
// 生命周期: 仅在单行解析阶段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: Vec<(String, String)>,
}

impl RawRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn push(&mut self, header: impl Into<String>, value: impl Into<String>) {
        self.cells.push((header.into(), value.into()));
    }

    /// 按表头取第一个单元格（区分大小写）
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(h, _)| h == header)
            .map(|(_, v)| v.as_str())
    }

    /// 按表头取第一个去空白后非空的值（已去空白）
    ///
    /// 同名表头重复出现时，跳过空值继续向后找
    pub fn get_non_empty(&self, header: &str) -> Option<&str> {
        self.cells
            .iter()
            .filter(|(h, _)| h == header)
            .map(|(_, v)| v.trim())
            .find(|v| !v.is_empty())
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.cells.iter().map(|(h, v)| (h.as_str(), v.as_str()))
    }
}

// ==========================================
// KolDraft - 导入中间结构体
// ==========================================
// 用途: 字段解析后的松散类型草稿（全部为已去空白的字符串）
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KolDraft {
    pub row_number: usize, // 数据行序号（从 1 开始，表头不计）

    pub name: String,
    pub links: [String; 6], // 按 Platform::ALL 顺序
    pub rates: [String; 6], // 按 Platform::ALL 顺序，未解析的原始报价
    pub rate: String,       // 显式综合报价
    pub niches: String,

    pub gender: String,
    pub hair_style: String,
    pub race: String,
    pub address: String,
    pub contact_number: String,
    pub pic: String,
    pub notes: String,
    pub rate_details: String,
}

impl KolDraft {
    pub fn link(&self, platform: Platform) -> &str {
        &self.links[platform.index()]
    }

    pub fn raw_rate(&self, platform: Platform) -> &str {
        &self.rates[platform.index()]
    }

    /// 是否至少填写了一个平台链接
    pub fn has_any_link(&self) -> bool {
        self.links.iter().any(|l| !l.trim().is_empty())
    }
}

// ==========================================
// NormalizedKolRecord - 规范 KOL 记录
// ==========================================
// 不变量:
// - rate = max(各平台报价 ∪ {显式报价})，无报价时为 0
// - niches 不含空串/纯空白项
// 对齐: 持久化服务 create 接口的请求体（camelCase）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedKolRecord {
    // ===== 身份 =====
    pub name: String,
    #[serde(default)]
    pub kol_type: KolType,

    // ===== 平台链接 =====
    #[serde(default)]
    pub instagram: String,
    #[serde(default)]
    pub tiktok: String,
    #[serde(default)]
    pub facebook: String,
    #[serde(default)]
    pub twitter: String,
    #[serde(default)]
    pub thread: String,
    #[serde(default)]
    pub blog: String,

    // ===== 报价 =====
    #[serde(default)]
    pub instagram_rate: f64,
    #[serde(default)]
    pub tiktok_rate: f64,
    #[serde(default)]
    pub facebook_rate: f64,
    #[serde(default)]
    pub twitter_rate: f64,
    #[serde(default)]
    pub thread_rate: f64,
    #[serde(default)]
    pub blog_rate: f64,
    #[serde(default)]
    pub rate: f64,

    // ===== 标签 =====
    #[serde(default)]
    pub niches: Vec<String>,

    // ===== 人口/联系信息 =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hair_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub race: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pic: Option<String>,

    // ===== 备注 =====
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rate_details: Option<String>,
}

impl NormalizedKolRecord {
    /// 创建只有名称的空记录（其余字段取默认值）
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kol_type: KolType::default(),
            instagram: String::new(),
            tiktok: String::new(),
            facebook: String::new(),
            twitter: String::new(),
            thread: String::new(),
            blog: String::new(),
            instagram_rate: 0.0,
            tiktok_rate: 0.0,
            facebook_rate: 0.0,
            twitter_rate: 0.0,
            thread_rate: 0.0,
            blog_rate: 0.0,
            rate: 0.0,
            niches: Vec::new(),
            gender: None,
            hair_style: None,
            race: None,
            address: None,
            contact_number: None,
            pic: None,
            notes: None,
            rate_details: None,
        }
    }

    pub fn set_link(&mut self, platform: Platform, value: String) {
        match platform {
            Platform::Instagram => self.instagram = value,
            Platform::Tiktok => self.tiktok = value,
            Platform::Facebook => self.facebook = value,
            Platform::Twitter => self.twitter = value,
            Platform::Thread => self.thread = value,
            Platform::Blog => self.blog = value,
        }
    }

    pub fn set_platform_rate(&mut self, platform: Platform, value: f64) {
        match platform {
            Platform::Instagram => self.instagram_rate = value,
            Platform::Tiktok => self.tiktok_rate = value,
            Platform::Facebook => self.facebook_rate = value,
            Platform::Twitter => self.twitter_rate = value,
            Platform::Thread => self.thread_rate = value,
            Platform::Blog => self.blog_rate = value,
        }
    }
}
