// ==========================================
// KOL 导入系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::import_config_trait::{ConfigError, ImportConfigReader};
use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::importer::data_cleaner::DEFAULT_CURRENCY_MARKER;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 创建新的 ConfigManager 实例（必要时建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> Result<Self, ConfigError> {
        let conn = open_sqlite_connection(db_path)?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Result<Self, ConfigError> {
        {
            let conn_guard = conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
            configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    /// 从 config_kv 表读取配置值（scope_id='global'）
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 读取 global scope 的配置值（公开方法，供 CLI 复用）
    pub fn get_global_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        self.get_config_value(key)
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key = key.trim();
        if key.is_empty() {
            return Err("配置键不能为空".into());
        }

        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::debug!(config_key = key, "配置已更新");
        Ok(())
    }

    /// 所有 global 配置（按键排序）
    pub fn list_global_configs(&self) -> Result<BTreeMap<String, String>, ConfigError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;
        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut configs = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            configs.insert(key, value);
        }
        Ok(configs)
    }

    /// 从 config_kv 表读取配置值，带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> Result<String, ConfigError> {
        Ok(self.get_config_value(key)?.unwrap_or_else(|| default.to_string()))
    }
}

// ==========================================
// ImportConfigReader Trait 实现
// ==========================================
#[async_trait]
impl ImportConfigReader for ConfigManager {
    async fn get_currency_marker(&self) -> Result<String, ConfigError> {
        let value =
            self.get_config_or_default(config_keys::CURRENCY_MARKER, DEFAULT_CURRENCY_MARKER)?;
        Ok(value.trim().to_string())
    }

    async fn get_row_delay_ms(&self) -> Result<u64, ConfigError> {
        let value = self.get_config_or_default(config_keys::ROW_DELAY_MS, "0")?;
        Ok(value.trim().parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!(
                config_key = config_keys::ROW_DELAY_MS,
                raw_value = %value,
                "行间等待配置格式错误，使用 0"
            );
            0
        }))
    }

    async fn get_api_base_url(&self) -> Result<Option<String>, ConfigError> {
        let value = self.get_config_or_default(config_keys::API_BASE_URL, "")?;
        let trimmed = value.trim().trim_end_matches('/');
        if trimmed.is_empty() {
            Ok(None)
        } else {
            Ok(Some(trimmed.to_string()))
        }
    }

    async fn get_api_timeout_secs(&self) -> Result<u64, ConfigError> {
        let value = self.get_config_or_default(config_keys::API_TIMEOUT_SECS, "30")?;
        match value.trim().parse::<u64>() {
            Ok(secs) if secs > 0 => Ok(secs),
            _ => Ok(30),
        }
    }
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 报价归一
    pub const CURRENCY_MARKER: &str = "currency_marker";

    // 导入节奏
    pub const ROW_DELAY_MS: &str = "row_delay_ms";

    // 持久化服务
    pub const API_BASE_URL: &str = "api_base_url";
    pub const API_TIMEOUT_SECS: &str = "api_timeout_secs";

    /// 已知配置键（CLI 展示用）
    pub const ALL: [&str; 4] = [CURRENCY_MARKER, ROW_DELAY_MS, API_BASE_URL, API_TIMEOUT_SECS];
}
