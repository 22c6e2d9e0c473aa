// ==========================================
// KOL 导入系统 - 应用状态
// ==========================================
// 职责: 组装共享连接、配置、仓储与API实例
// 规则: 配置了 api_base_url 时 KOL 记录走远端服务，否则写本地库
//       导入历史始终写本地库
// ==========================================

use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::api::{ApiError, ApiResult, ExportApi, ImportApi};
use crate::config::{ConfigManager, ImportConfigReader};
use crate::db::{init_schema, open_sqlite_connection};
use crate::importer::ImportProgressListener;
use crate::repository::{HttpKolRepository, KolRepository, SqliteKolRepository};
use tracing::info;

/// 应用状态
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 导入API
    pub import_api: Arc<ImportApi>,

    /// 导出API
    pub export_api: Arc<ExportApi>,
}

impl AppState {
    /// 打开数据库并组装各组件
    pub async fn new(db_path: &str) -> ApiResult<Self> {
        Self::with_import_listener(db_path, None).await
    }

    /// 同 new，并为导入API挂上进度监听器
    pub async fn with_import_listener(
        db_path: &str,
        listener: Option<Arc<dyn ImportProgressListener>>,
    ) -> ApiResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| ApiError::InternalError(format!("数据库打开失败: {}", e)))?;
        init_schema(&conn)
            .map_err(|e| ApiError::InternalError(format!("数据库初始化失败: {}", e)))?;
        let conn = Arc::new(Mutex::new(conn));

        let config = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let local_repo = Arc::new(SqliteKolRepository::from_connection(conn)?);

        let kol_repo: Arc<dyn KolRepository> = match config.get_api_base_url().await? {
            Some(base_url) => {
                let timeout = Duration::from_secs(config.get_api_timeout_secs().await?);
                info!(base_url = %base_url, "使用远端持久化服务");
                Arc::new(HttpKolRepository::new(base_url, timeout)?)
            }
            None => {
                info!(db_path = %db_path, "使用本地存储");
                local_repo.clone()
            }
        };

        let mut import_api = ImportApi::new(kol_repo.clone(), local_repo, config.clone());
        if let Some(listener) = listener {
            import_api = import_api.with_listener(listener);
        }
        let export_api = ExportApi::new(kol_repo);

        Ok(Self {
            db_path: db_path.to_string(),
            config,
            import_api: Arc::new(import_api),
            export_api: Arc::new(export_api),
        })
    }
}
