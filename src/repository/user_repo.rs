// ==========================================
// 问答系统数据访问层 - 用户数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑，只负责数据访问
// 约束: 所有查询使用参数化
// ==========================================

use crate::db::QuestionsDbConnection;
use crate::domain::{Question, QuestionLike, Reply, User};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::question_follow_repo::QuestionFollowRepository;
use crate::repository::question_like_repo::QuestionLikeRepository;
use crate::repository::question_repo::QuestionRepository;
use crate::repository::reply_repo::ReplyRepository;
use crate::repository::row::{query_optional, FromRow};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

impl FromRow for User {
    const ENTITY: &'static str = "User";
    const COLUMNS: &'static [&'static str] = &["id", "fname", "lname"];

    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(User {
            id: row.get("id")?,
            fname: row.get("fname")?,
            lname: row.get("lname")?,
        })
    }
}

// ==========================================
// UserRepository - 用户仓储
// ==========================================
/// 用户仓储
/// 职责: users 表的查询，以及以用户为起点的关系遍历
pub struct UserRepository {
    conn: Arc<Mutex<Connection>>,
}

impl UserRepository {
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
    /// - Ok(Some(User)): 找到用户
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<User>> {
        tracing::debug!("查询用户: id={}", id);
        let conn = self.get_conn()?;
        query_optional(&conn, "SELECT * FROM users WHERE id = ?1", params![id])
    }

    /// 按姓名查询 (同名时返回数据库返回的第一行)
    pub fn find_by_name(&self, fname: &str, lname: &str) -> RepositoryResult<Option<User>> {
        tracing::debug!("查询用户: fname={}, lname={}", fname, lname);
        let conn = self.get_conn()?;
        query_optional(
            &conn,
            "SELECT * FROM users WHERE fname = ?1 AND lname = ?2",
            params![fname, lname],
        )
    }

    // ==========================================
    // 关系遍历 (每次调用额外执行一条查询)
    // ==========================================

    /// 用户提出的问题
    pub fn authored_questions(&self, user: &User) -> RepositoryResult<Vec<Question>> {
        QuestionRepository::from_connection(Arc::clone(&self.conn)).find_by_author_id(user.id)
    }

    /// 用户发表的回复
    pub fn authored_replies(&self, user: &User) -> RepositoryResult<Vec<Reply>> {
        ReplyRepository::from_connection(Arc::clone(&self.conn)).find_by_user_id(user.id)
    }

    /// 用户关注的问题
    pub fn followed_questions(&self, user: &User) -> RepositoryResult<Vec<Question>> {
        QuestionFollowRepository::from_connection(Arc::clone(&self.conn))
            .followed_questions_for_user_id(user.id)
    }

    /// 用户点赞的问题
    pub fn liked_questions(&self, user: &User) -> RepositoryResult<Vec<Question>> {
        QuestionLikeRepository::from_connection(Arc::clone(&self.conn))
            .liked_questions_for_user_id(user.id)
    }

    /// 平均 karma: 用户所提问题获得的点赞总数 / 问题数
    ///
    /// # 返回
    /// - 用户没有提问时为 0.0
    pub fn average_karma(&self, user: &User) -> RepositoryResult<f64> {
        let conn = self.get_conn()?;
        let karma: Option<f64> = conn.query_row(
            r#"
            SELECT
                CAST(COUNT(question_likes.id) AS REAL) / COUNT(DISTINCT questions.id) AS karma
            FROM questions
            LEFT OUTER JOIN question_likes ON question_likes.question_id = questions.id
            WHERE questions.user_id = ?1
            "#,
            params![user.id],
            |row| row.get(0),
        )
        .map_err(|e| RepositoryError::from_row_error(QuestionLike::ENTITY, e))?;

        Ok(karma.unwrap_or(0.0))
    }
}
