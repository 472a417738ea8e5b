// ==========================================
// 问答系统数据访问层 - 回复数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只负责数据访问
// 回复的父子关系只按 id 查询，整棵回复树见 thread_for_question
// ==========================================

use crate::db::QuestionsDbConnection;
use crate::domain::{Question, Reply, ReplyTree, User};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::question_repo::QuestionRepository;
use crate::repository::row::{query_all, query_optional, FromRow};
use crate::repository::user_repo::UserRepository;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

impl FromRow for Reply {
    const ENTITY: &'static str = "Reply";
    const COLUMNS: &'static [&'static str] = &["id", "parent_id", "body", "question_id", "user_id"];

    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(Reply {
            id: row.get("id")?,
            question_id: row.get("question_id")?,
            parent_id: row.get("parent_id")?,
            body: row.get("body")?,
            user_id: row.get("user_id")?,
        })
    }
}

// ==========================================
// ReplyRepository - 回复仓储
// ==========================================
pub struct ReplyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ReplyRepository {
    /// 打开数据库文件并创建仓储
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let db = QuestionsDbConnection::open(db_path)?;
        Ok(Self::from_connection(db.shared()))
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 按主键查询；未找到时为 None
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Reply>> {
        tracing::debug!("查询回复: id={}", id);
        let conn = self.get_conn()?;
        query_optional(&conn, "SELECT * FROM replies WHERE id = ?1", params![id])
    }

    pub fn find_by_user_id(&self, user_id: i64) -> RepositoryResult<Vec<Reply>> {
        tracing::debug!("查询用户回复: user_id={}", user_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM replies WHERE user_id = ?1",
            params![user_id],
        )
    }

    pub fn find_by_question_id(&self, question_id: i64) -> RepositoryResult<Vec<Reply>> {
        tracing::debug!("查询问题回复: question_id={}", question_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM replies WHERE question_id = ?1",
            params![question_id],
        )
    }

    /// 查询直接子回复
    pub fn find_by_parent_id(&self, parent_id: i64) -> RepositoryResult<Vec<Reply>> {
        tracing::debug!("查询子回复: parent_id={}", parent_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM replies WHERE parent_id = ?1",
            params![parent_id],
        )
    }

    /// 问题下的完整回复树
    ///
    /// 一次查询取出问题的全部回复，在内存中按 parent_id 组装；
    /// parent_id 成环时返回 InvalidReplyTree。
    pub fn thread_for_question(&self, question_id: i64) -> RepositoryResult<ReplyTree> {
        let replies = self.find_by_question_id(question_id)?;
        let tree = ReplyTree::from_replies(replies).map_err(|e| {
            tracing::warn!("回复树无效: question_id={}, {}", question_id, e);
            RepositoryError::from(e)
        })?;
        Ok(tree)
    }

    // ==========================================
    // 关系遍历 (每次调用额外执行一条查询)
    // ==========================================

    pub fn author(&self, reply: &Reply) -> RepositoryResult<Option<User>> {
        UserRepository::from_connection(Arc::clone(&self.conn)).find_by_id(reply.user_id)
    }

    pub fn question(&self, reply: &Reply) -> RepositoryResult<Option<Question>> {
        QuestionRepository::from_connection(Arc::clone(&self.conn)).find_by_id(reply.question_id)
    }

    /// 上级回复；顶层回复不查询，直接返回 None
    pub fn parent_reply(&self, reply: &Reply) -> RepositoryResult<Option<Reply>> {
        match reply.parent_id {
            Some(parent_id) => self.find_by_id(parent_id),
            None => Ok(None),
        }
    }

    pub fn child_replies(&self, reply: &Reply) -> RepositoryResult<Vec<Reply>> {
        self.find_by_parent_id(reply.id)
    }
}
