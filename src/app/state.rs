// ==========================================
// 问答系统数据访问层 - 仓储集合
// ==========================================
// 职责: 管理共享连接与全部仓储实例
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::config::DbConfig;
use crate::db::QuestionsDbConnection;
use crate::repository::{
    QuestionFollowRepository, QuestionLikeRepository, QuestionRepository, ReplyRepository,
    RepositoryResult, UserRepository,
};

/// 问答库
///
/// 五个仓储共享同一个连接
pub struct QuestionsDb {
    /// 数据库路径 (内存库为 ":memory:")
    pub db_path: String,

    pub users: UserRepository,

    pub questions: QuestionRepository,

    pub replies: ReplyRepository,

    pub question_follows: QuestionFollowRepository,

    pub question_likes: QuestionLikeRepository,
}

impl QuestionsDb {
    /// 打开数据库文件
    ///
    /// # 错误
    /// - StorageUnavailable: 文件无法打开
    /// - SchemaMismatch: 缺少数据表
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        Self::open_with_config(&DbConfig::with_path(db_path))
    }

    pub fn open_with_config(config: &DbConfig) -> RepositoryResult<Self> {
        let handle = QuestionsDbConnection::open_with_config(config)?;
        Ok(Self::from_handle(&handle))
    }

    /// 使用进程级共享连接 (见 `QuestionsDbConnection::instance`)
    pub fn instance() -> RepositoryResult<Self> {
        let handle = QuestionsDbConnection::instance()?;
        Ok(Self::from_handle(handle))
    }

    /// 从已有连接创建 (内存库/测试隔离)
    pub fn from_connection(conn: Connection) -> RepositoryResult<Self> {
        let handle = QuestionsDbConnection::from_connection(conn)?;
        Ok(Self::from_handle(&handle))
    }

    /// 在同一连接句柄上组装全部仓储
    pub fn from_handle(handle: &QuestionsDbConnection) -> Self {
        tracing::debug!("初始化仓储集合: {}", handle.db_path());
        Self::from_shared(handle.db_path().to_string(), handle.shared())
    }

    fn from_shared(db_path: String, conn: Arc<Mutex<Connection>>) -> Self {
        Self {
            db_path,
            users: UserRepository::from_connection(Arc::clone(&conn)),
            questions: QuestionRepository::from_connection(Arc::clone(&conn)),
            replies: ReplyRepository::from_connection(Arc::clone(&conn)),
            question_follows: QuestionFollowRepository::from_connection(Arc::clone(&conn)),
            question_likes: QuestionLikeRepository::from_connection(conn),
        }
    }
}
