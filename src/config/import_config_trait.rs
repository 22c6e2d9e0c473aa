// ==========================================
// KOL 导入系统 - 导入配置读取 Trait
// ==========================================
// 职责: 定义导入管道所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use async_trait::async_trait;
use std::error::Error;

/// 配置读取错误（跨 await 传递，要求 Send + Sync）
pub type ConfigError = Box<dyn Error + Send + Sync>;

// ==========================================
// ImportConfigReader Trait
// ==========================================
// 用途: 导入管道 / 持久化客户端所需的配置读取接口
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait ImportConfigReader: Send + Sync {
    // ===== 报价归一 =====

    /// 获取货币标记（报价前缀，解析时剥离）
    ///
    /// # 默认值
    /// - "RM"
    async fn get_currency_marker(&self) -> Result<String, ConfigError>;

    // ===== 导入节奏 =====

    /// 获取逐行提交后的等待时长（毫秒）
    ///
    /// # 默认值
    /// - 0（不等待）
    async fn get_row_delay_ms(&self) -> Result<u64, ConfigError>;

    // ===== 持久化服务 =====

    /// 获取持久化服务地址
    ///
    /// # 返回
    /// - Some(url): 使用远端服务
    /// - None: 使用本地存储
    async fn get_api_base_url(&self) -> Result<Option<String>, ConfigError>;

    /// 获取持久化服务请求超时（秒）
    ///
    /// # 默认值
    /// - 30
    async fn get_api_timeout_secs(&self) -> Result<u64, ConfigError>;
}

#[async_trait]
impl<T> ImportConfigReader for std::sync::Arc<T>
where
    T: ImportConfigReader + ?Sized,
{
    async fn get_currency_marker(&self) -> Result<String, ConfigError> {
        (**self).get_currency_marker().await
    }

    async fn get_row_delay_ms(&self) -> Result<u64, ConfigError> {
        (**self).get_row_delay_ms().await
    }

    async fn get_api_base_url(&self) -> Result<Option<String>, ConfigError> {
        (**self).get_api_base_url().await
    }

    async fn get_api_timeout_secs(&self) -> Result<u64, ConfigError> {
        (**self).get_api_timeout_secs().await
    }
}
