// ==========================================
// 问答系统数据访问层 - SQLite 连接管理
// ==========================================
// 目标:
// - 统一所有连接的 PRAGMA 行为 (foreign_keys / busy_timeout)
// - 提供显式注入的连接句柄，以及进程级共享实例
// - 打开时校验所需数据表，避免在错误的库上静默运行
// ==========================================

use crate::config::DbConfig;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::sync::{Arc, Mutex, OnceLock};
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 本层依赖的数据表
pub const REQUIRED_TABLES: [&str; 5] = [
    "users",
    "questions",
    "replies",
    "question_follows",
    "question_likes",
];

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：
/// - foreign_keys 需要“每个连接”单独开启
/// - busy_timeout 需要“每个连接”单独配置
pub fn configure_sqlite_connection(conn: &Connection, busy_timeout_ms: u64) -> rusqlite::Result<()> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_millis(busy_timeout_ms))?;
    Ok(())
}

/// 以只读方式打开 SQLite 连接并应用统一配置
///
/// 本层没有写操作；只读打开使不存在的文件直接报错，而不是新建空库。
pub fn open_sqlite_connection(db_path: &str, busy_timeout_ms: u64) -> rusqlite::Result<Connection> {
    let conn = Connection::open_with_flags(
        db_path,
        OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_URI | OpenFlags::SQLITE_OPEN_NO_MUTEX,
    )?;
    configure_sqlite_connection(&conn, busy_timeout_ms)?;
    Ok(conn)
}

/// 校验所需数据表是否存在
///
/// # 返回
/// - Ok(()): 全部存在
/// - Err(SchemaMismatch): 缺失的第一张表
/// - Err(其他): 文件无法读取 (如非 SQLite 文件)
pub fn verify_schema(conn: &Connection) -> RepositoryResult<()> {
    for table in REQUIRED_TABLES {
        let found: Option<i64> = conn
            .query_row(
                "SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1 LIMIT 1",
                [table],
                |row| row.get(0),
            )
            .optional()?;

        if found.is_none() {
            return Err(RepositoryError::SchemaMismatch {
                table: table.to_string(),
            });
        }
    }
    Ok(())
}

// ==========================================
// QuestionsDbConnection - 连接句柄
// ==========================================
/// 问答库连接句柄
///
/// 内部为 `Arc<Mutex<Connection>>`：多个仓储共享同一连接，访问按互斥锁串行化。
pub struct QuestionsDbConnection {
    conn: Arc<Mutex<Connection>>,
    db_path: String,
}

static INSTANCE: OnceLock<Result<QuestionsDbConnection, String>> = OnceLock::new();

impl QuestionsDbConnection {
    /// 打开指定路径的数据库 (busy_timeout 取默认值)
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        Self::open_with_config(&DbConfig::with_path(db_path))
    }

    /// 按配置打开数据库
    ///
    /// # 错误
    /// - StorageUnavailable: 文件不存在/无法打开/不是 SQLite 文件
    /// - SchemaMismatch: 缺少所需数据表
    pub fn open_with_config(config: &DbConfig) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(&config.db_path, config.busy_timeout_ms).map_err(|e| {
            tracing::warn!("无法打开数据库 {}: {}", config.db_path, e);
            RepositoryError::StorageUnavailable(format!("{}: {}", config.db_path, e))
        })?;

        match verify_schema(&conn) {
            Ok(()) => {}
            Err(e @ RepositoryError::SchemaMismatch { .. }) => return Err(e),
            Err(e) => {
                tracing::warn!("数据库不可读 {}: {}", config.db_path, e);
                return Err(RepositoryError::StorageUnavailable(format!(
                    "{}: {}",
                    config.db_path, e
                )));
            }
        }

        tracing::info!("已打开问答数据库: {}", config.db_path);
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path: config.db_path.clone(),
        })
    }

    /// 从已有连接创建句柄 (内存库/测试隔离)
    ///
    /// 说明：会再次应用统一 PRAGMA，但不校验数据表。
    pub fn from_connection(conn: Connection) -> RepositoryResult<Self> {
        configure_sqlite_connection(&conn, DEFAULT_BUSY_TIMEOUT_MS)?;
        let db_path = conn
            .path()
            .filter(|p| !p.is_empty())
            .unwrap_or(":memory:")
            .to_string();
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
            db_path,
        })
    }

    /// 进程级共享实例
    ///
    /// 首次调用时按环境变量配置 (见 `DbConfig::from_env`) 打开；
    /// 打开失败会被记住，之后每次调用都返回同一个 StorageUnavailable，不重试。
    pub fn instance() -> RepositoryResult<&'static QuestionsDbConnection> {
        let slot = INSTANCE.get_or_init(|| {
            let config = DbConfig::from_env();
            QuestionsDbConnection::open_with_config(&config).map_err(|e| e.to_string())
        });

        slot.as_ref()
            .map_err(|msg| RepositoryError::StorageUnavailable(msg.clone()))
    }

    /// 共享连接 (供仓储使用)
    pub fn shared(&self) -> Arc<Mutex<Connection>> {
        Arc::clone(&self.conn)
    }

    pub fn db_path(&self) -> &str {
        &self.db_path
    }

    /// 显式关闭连接
    ///
    /// 若仍有仓储持有该连接，返回 LockError 且不关闭。
    pub fn close(self) -> RepositoryResult<()> {
        let mutex = Arc::try_unwrap(self.conn).map_err(|_| {
            RepositoryError::LockError("连接仍被其他仓储持有，无法关闭".to_string())
        })?;
        let conn = mutex
            .into_inner()
            .map_err(|e| RepositoryError::LockError(e.to_string()))?;

        conn.close().map_err(|(_, e)| RepositoryError::from(e))?;
        tracing::debug!("数据库连接已关闭: {}", self.db_path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_missing_file_is_storage_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.db");

        let result = QuestionsDbConnection::open(path.to_str().unwrap());
        assert!(matches!(result, Err(RepositoryError::StorageUnavailable(_))));
    }

    #[test]
    fn test_open_without_tables_is_schema_mismatch() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.db");
        {
            let conn = Connection::open(&path).unwrap();
            conn.execute_batch("CREATE TABLE users (id INTEGER PRIMARY KEY, fname TEXT, lname TEXT);")
                .unwrap();
        }

        let result = QuestionsDbConnection::open(path.to_str().unwrap());
        match result {
            Err(RepositoryError::SchemaMismatch { table }) => assert_eq!(table, "questions"),
            Err(e) => panic!("应为 SchemaMismatch, 实际: {:?}", e),
            Ok(_) => panic!("应为 SchemaMismatch, 实际打开成功"),
        }
    }

    #[test]
    fn test_from_connection_and_close() {
        let handle = QuestionsDbConnection::from_connection(Connection::open_in_memory().unwrap()).unwrap();
        assert_eq!(handle.db_path(), ":memory:");

        let shared = handle.shared();
        drop(shared);
        assert!(handle.close().is_ok());
    }

    #[test]
    fn test_close_while_shared_fails() {
        let handle = QuestionsDbConnection::from_connection(Connection::open_in_memory().unwrap()).unwrap();
        let _held = handle.shared();
        assert!(matches!(handle.close(), Err(RepositoryError::LockError(_))));
    }
}
