// ==========================================
// 问答系统数据访问层 - 问题数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只负责数据访问
// ==========================================

use crate::db::QuestionsDbConnection;
use crate::domain::{Question, Reply, User};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::question_follow_repo::QuestionFollowRepository;
use crate::repository::question_like_repo::QuestionLikeRepository;
use crate::repository::reply_repo::ReplyRepository;
use crate::repository::row::{query_all, query_optional, FromRow};
use crate::repository::user_repo::UserRepository;
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

impl FromRow for Question {
    const ENTITY: &'static str = "Question";
    const COLUMNS: &'static [&'static str] = &["id", "title", "body", "user_id"];

    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(Question {
            id: row.get("id")?,
            title: row.get("title")?,
            body: row.get("body")?,
            user_id: row.get("user_id")?,
        })
    }
}

// ==========================================
// QuestionRepository - 问题仓储
// ==========================================
/// 问题仓储
/// 职责: questions 表的查询，以及以问题为起点的关系遍历
///
/// 关系遍历方法每次调用都执行一条额外查询 (N+1)，
/// 批量场景请直接使用关注/点赞仓储的联表查询。
pub struct QuestionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl QuestionRepository {
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

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(Question)): 找到问题
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Question>> {
        tracing::debug!("查询问题: id={}", id);
        let conn = self.get_conn()?;
        query_optional(&conn, "SELECT * FROM questions WHERE id = ?1", params![id])
    }

    /// 查询用户提出的全部问题 (顺序不保证)
    pub fn find_by_author_id(&self, user_id: i64) -> RepositoryResult<Vec<Question>> {
        tracing::debug!("查询用户提问: user_id={}", user_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM questions WHERE user_id = ?1",
            params![user_id],
        )
    }

    /// 关注数最多的前 n 个问题
    pub fn most_followed(&self, n: usize) -> RepositoryResult<Vec<Question>> {
        QuestionFollowRepository::from_connection(Arc::clone(&self.conn)).most_followed_questions(n)
    }

    /// 点赞数最多的前 n 个问题
    pub fn most_liked(&self, n: usize) -> RepositoryResult<Vec<Question>> {
        QuestionLikeRepository::from_connection(Arc::clone(&self.conn)).most_liked_questions(n)
    }

    // ==========================================
    // 关系遍历
    // ==========================================

    /// 提问者；作者行已不存在时为 None
    pub fn author(&self, question: &Question) -> RepositoryResult<Option<User>> {
        UserRepository::from_connection(Arc::clone(&self.conn)).find_by_id(question.user_id)
    }

    /// 问题下的全部回复
    pub fn replies(&self, question: &Question) -> RepositoryResult<Vec<Reply>> {
        ReplyRepository::from_connection(Arc::clone(&self.conn)).find_by_question_id(question.id)
    }

    /// 关注该问题的用户
    pub fn followers(&self, question: &Question) -> RepositoryResult<Vec<User>> {
        QuestionFollowRepository::from_connection(Arc::clone(&self.conn))
            .followers_for_question_id(question.id)
    }

    /// 点赞该问题的用户
    pub fn likers(&self, question: &Question) -> RepositoryResult<Vec<User>> {
        QuestionLikeRepository::from_connection(Arc::clone(&self.conn))
            .likers_for_question_id(question.id)
    }

    /// 点赞数
    pub fn num_likes(&self, question: &Question) -> RepositoryResult<i64> {
        QuestionLikeRepository::from_connection(Arc::clone(&self.conn))
            .num_likes_for_question_id(question.id)
    }
}
