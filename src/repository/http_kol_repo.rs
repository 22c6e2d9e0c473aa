// ==========================================
// KOL 导入系统 - 远端 KOL Repository 实现
// ==========================================
// 职责: 通过持久化服务（HTTP + JSON）读写 KOL 记录
// 接口:
// - POST {base}/kols   请求体为 camelCase 记录，2xx 视为成功
// - GET  {base}/kols   返回记录数组
// ==========================================

use crate::domain::kol::NormalizedKolRecord;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::kol_repo::KolRepository;
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use std::time::Duration;
use tracing::debug;

/// 连接超时上限（秒）
const MAX_CONNECT_TIMEOUT_SECS: u64 = 10;

/// 错误响应体截断长度
const MAX_ERROR_BODY_CHARS: usize = 200;

#[derive(Debug, Deserialize)]
struct CreateResponse {
    #[serde(default)]
    id: Option<serde_json::Value>,
}

/// 错误响应中常见的消息字段
#[derive(Debug, Deserialize)]
struct ErrorResponse {
    #[serde(default, alias = "error")]
    message: Option<String>,
}

// ==========================================
// HttpKolRepository
// ==========================================
#[derive(Debug, Clone)]
pub struct HttpKolRepository {
    client: Client,
    base_url: String,
}

impl HttpKolRepository {
    /// 创建客户端
    ///
    /// # 参数
    /// - base_url: 服务地址（末尾斜杠会被去掉）
    /// - timeout: 单次请求超时
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> RepositoryResult<Self> {
        let connect_timeout = timeout.min(Duration::from_secs(MAX_CONNECT_TIMEOUT_SECS));
        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .user_agent(concat!("kol-import/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| RepositoryError::Transport(format!("HTTP 客户端初始化失败: {}", e)))?;

        Ok(Self::with_client(client, base_url))
    }

    /// 使用外部构造的 Client
    pub fn with_client(client: Client, base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into().trim().to_string();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn kols_endpoint(&self) -> String {
        format!("{}/kols", self.base_url)
    }

    /// 非 2xx → Rejected（尽量带上服务端给出的消息）
    async fn ensure_success(response: Response) -> RepositoryResult<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&body)
            .ok()
            .and_then(|e| e.message)
            .unwrap_or_else(|| {
                let trimmed = body.trim();
                if trimmed.is_empty() {
                    status.canonical_reason().unwrap_or("unknown").to_string()
                } else {
                    trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect()
                }
            });

        Err(RepositoryError::Rejected {
            status: status.as_u16(),
            message,
        })
    }
}

/// 响应中的 id 可能是字符串或数字
fn id_to_string(id: Option<serde_json::Value>) -> String {
    match id {
        Some(serde_json::Value::String(s)) => s,
        Some(serde_json::Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

#[async_trait]
impl KolRepository for HttpKolRepository {
    async fn create_kol(&self, record: &NormalizedKolRecord) -> RepositoryResult<String> {
        let url = self.kols_endpoint();
        debug!(url = %url, name = %record.name, "提交 KOL 记录");

        let response = self
            .client
            .post(&url)
            .json(record)
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        let response = Self::ensure_success(response).await?;

        // 成功响应体不是 JSON 对象时，视为未返回 ID
        let body = response
            .text()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;
        let id = serde_json::from_str::<CreateResponse>(&body)
            .map(|r| id_to_string(r.id))
            .unwrap_or_default();

        Ok(id)
    }

    async fn list_kols(&self) -> RepositoryResult<Vec<NormalizedKolRecord>> {
        let url = self.kols_endpoint();
        debug!(url = %url, "查询 KOL 记录");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| RepositoryError::Transport(e.to_string()))?;

        let response = Self::ensure_success(response).await?;

        response
            .json::<Vec<NormalizedKolRecord>>()
            .await
            .map_err(|e| RepositoryError::InvalidResponse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_trailing_slashes_trimmed() {
        let repo = HttpKolRepository::with_client(Client::new(), " http://localhost:3000/api// ");
        assert_eq!(repo.base_url(), "http://localhost:3000/api");
        assert_eq!(repo.kols_endpoint(), "http://localhost:3000/api/kols");
    }

    #[test]
    fn test_id_to_string() {
        assert_eq!(id_to_string(Some(serde_json::json!("abc"))), "abc");
        assert_eq!(id_to_string(Some(serde_json::json!(42))), "42");
        assert_eq!(id_to_string(Some(serde_json::Value::Null)), "");
        assert_eq!(id_to_string(None), "");
    }

    #[tokio::test]
    async fn test_unreachable_service_is_transport_error() {
        let repo =
            HttpKolRepository::new("http://127.0.0.1:1", Duration::from_millis(500)).unwrap();

        let result = repo.create_kol(&NormalizedKolRecord::named("Amy")).await;
        assert!(matches!(result, Err(RepositoryError::Transport(_))));
    }
}
