// ==========================================
// KOL 导入系统 - 本地 KOL Repository 实现
// ==========================================
// 职责: 实现 KOL 记录 / 导入批次的本地存储（使用 rusqlite）
// 红线: Repository 不含业务规则，只做数据 CRUD
// 说明: 未配置持久化服务地址时使用；测试也使用本实现
// ==========================================

use crate::db::{init_schema, open_sqlite_connection};
use crate::domain::import::ImportBatch;
use crate::domain::kol::NormalizedKolRecord;
use crate::domain::types::KolType;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::import_batch_repo::ImportBatchRepository;
use crate::repository::kol_repo::KolRepository;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, Row};
use std::sync::{Arc, Mutex, MutexGuard};
use uuid::Uuid;

const KOL_COLUMNS: &str = "name, kol_type, \
    instagram, instagram_rate, tiktok, tiktok_rate, facebook, facebook_rate, \
    twitter, twitter_rate, thread, thread_rate, blog, blog_rate, \
    rate, niches, gender, hair_style, race, address, contact_number, pic, \
    notes, rate_details";

// ==========================================
// SqliteKolRepository
// ==========================================
pub struct SqliteKolRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteKolRepository {
    /// 创建新的 Repository 实例（必要时建表）
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（与 ConfigManager 共享同一连接）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            init_schema(&guard)?;
        }
        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 记录总数
    pub fn count_kols(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM kol_record", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    fn insert_record(&self, record: &NormalizedKolRecord) -> RepositoryResult<String> {
        let niches = serde_json::to_string(&record.niches)?;
        let id = Uuid::new_v4().to_string();

        let conn = self.lock()?;
        conn.execute(
            &format!(
                "INSERT INTO kol_record (id, {}, created_at) VALUES (\
                 ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, \
                 ?16, ?17, ?18, ?19, ?20, ?21, ?22, ?23, ?24, ?25, ?26)",
                KOL_COLUMNS
            ),
            params![
                id,
                record.name,
                record.kol_type.as_str(),
                record.instagram,
                record.instagram_rate,
                record.tiktok,
                record.tiktok_rate,
                record.facebook,
                record.facebook_rate,
                record.twitter,
                record.twitter_rate,
                record.thread,
                record.thread_rate,
                record.blog,
                record.blog_rate,
                record.rate,
                niches,
                record.gender,
                record.hair_style,
                record.race,
                record.address,
                record.contact_number,
                record.pic,
                record.notes,
                record.rate_details,
                Utc::now().to_rfc3339(),
            ],
        )?;

        Ok(id)
    }
}

/// 行 → 记录（列顺序与 KOL_COLUMNS 一致）
fn map_kol_row(row: &Row<'_>) -> rusqlite::Result<(NormalizedKolRecord, String)> {
    let kol_type: String = row.get(1)?;
    let niches: String = row.get(15)?;

    let record = NormalizedKolRecord {
        name: row.get(0)?,
        kol_type: KolType::from_str_or_default(&kol_type),
        instagram: row.get(2)?,
        instagram_rate: row.get(3)?,
        tiktok: row.get(4)?,
        tiktok_rate: row.get(5)?,
        facebook: row.get(6)?,
        facebook_rate: row.get(7)?,
        twitter: row.get(8)?,
        twitter_rate: row.get(9)?,
        thread: row.get(10)?,
        thread_rate: row.get(11)?,
        blog: row.get(12)?,
        blog_rate: row.get(13)?,
        rate: row.get(14)?,
        niches: Vec::new(),
        gender: row.get(16)?,
        hair_style: row.get(17)?,
        race: row.get(18)?,
        address: row.get(19)?,
        contact_number: row.get(20)?,
        pic: row.get(21)?,
        notes: row.get(22)?,
        rate_details: row.get(23)?,
    };

    Ok((record, niches))
}

fn map_batch_row(row: &Row<'_>) -> rusqlite::Result<ImportBatch> {
    Ok(ImportBatch {
        batch_id: row.get(0)?,
        file_name: row.get(1)?,
        total_rows: row.get(2)?,
        attempted: row.get(3)?,
        succeeded: row.get(4)?,
        failed: row.get(5)?,
        skipped: row.get(6)?,
        cancelled: row.get::<_, i64>(7)? != 0,
        imported_at: row.get::<_, DateTime<Utc>>(8)?,
        elapsed_ms: row.get(9)?,
    })
}

// ==========================================
// KolRepository 实现
// ==========================================
#[async_trait]
impl KolRepository for SqliteKolRepository {
    async fn create_kol(&self, record: &NormalizedKolRecord) -> RepositoryResult<String> {
        self.insert_record(record)
    }

    async fn list_kols(&self) -> RepositoryResult<Vec<NormalizedKolRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM kol_record ORDER BY created_at, rowid",
            KOL_COLUMNS
        ))?;

        let rows = stmt.query_map([], map_kol_row)?;

        let mut records = Vec::new();
        for row in rows {
            let (mut record, niches) = row?;
            record.niches = serde_json::from_str(&niches)?;
            records.push(record);
        }
        Ok(records)
    }
}

// ==========================================
// ImportBatchRepository 实现
// ==========================================
#[async_trait]
impl ImportBatchRepository for SqliteKolRepository {
    async fn insert_batch(&self, batch: &ImportBatch) -> RepositoryResult<()> {
        let conn = self.lock()?;
        conn.execute(
            r#"
            INSERT INTO import_batch (
                batch_id, file_name, total_rows, attempted, succeeded, failed,
                skipped, cancelled, imported_at, elapsed_ms
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                batch.batch_id,
                batch.file_name,
                batch.total_rows,
                batch.attempted,
                batch.succeeded,
                batch.failed,
                batch.skipped,
                batch.cancelled as i64,
                batch.imported_at.to_rfc3339(),
                batch.elapsed_ms,
            ],
        )?;
        Ok(())
    }

    async fn list_recent_batches(&self, limit: usize) -> RepositoryResult<Vec<ImportBatch>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT batch_id, file_name, total_rows, attempted, succeeded, failed,
                   skipped, cancelled, imported_at, elapsed_ms
            FROM import_batch
            ORDER BY imported_at DESC
            LIMIT ?1
            "#,
        )?;

        let rows = stmt.query_map(params![limit as i64], map_batch_row)?;

        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }
}
