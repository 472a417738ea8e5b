// ==========================================
// 问答系统数据访问层 - 点赞关系仓储
// ==========================================
// 联表查询: users ⋈ question_likes ⋈ questions
// ==========================================

use crate::db::QuestionsDbConnection;
use crate::domain::{Question, QuestionLike, User};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{query_all, query_optional, FromRow};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

impl FromRow for QuestionLike {
    const ENTITY: &'static str = "QuestionLike";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "question_id"];

    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(QuestionLike {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            question_id: row.get("question_id")?,
        })
    }
}

// ==========================================
// QuestionLikeRepository - 点赞关系仓储
// ==========================================
pub struct QuestionLikeRepository {
    conn: Arc<Mutex<Connection>>,
}

impl QuestionLikeRepository {
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

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<QuestionLike>> {
        tracing::debug!("查询点赞记录: id={}", id);
        let conn = self.get_conn()?;
        query_optional(
            &conn,
            "SELECT * FROM question_likes WHERE id = ?1",
            params![id],
        )
    }

    /// 用户的全部点赞记录
    pub fn find_by_user_id(&self, user_id: i64) -> RepositoryResult<Vec<QuestionLike>> {
        tracing::debug!("查询用户点赞记录: user_id={}", user_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM question_likes WHERE user_id = ?1",
            params![user_id],
        )
    }

    /// 问题的全部点赞记录
    pub fn find_by_question_id(&self, question_id: i64) -> RepositoryResult<Vec<QuestionLike>> {
        tracing::debug!("查询问题点赞记录: question_id={}", question_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM question_likes WHERE question_id = ?1",
            params![question_id],
        )
    }

    /// 点赞某问题的用户 (不去重)
    pub fn likers_for_question_id(&self, question_id: i64) -> RepositoryResult<Vec<User>> {
        tracing::debug!("查询问题点赞者: question_id={}", question_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            r#"
            SELECT users.*
            FROM users
            INNER JOIN question_likes ON question_likes.user_id = users.id
            INNER JOIN questions ON questions.id = question_likes.question_id
            WHERE questions.id = ?1
            "#,
            params![question_id],
        )
    }

    /// 问题的点赞数
    ///
    /// # 返回
    /// - 没有点赞 (或问题不存在) 时为 0
    pub fn num_likes_for_question_id(&self, question_id: i64) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let count: i64 = conn.query_row(
            r#"
            SELECT COUNT(*) AS likes
            FROM users
            INNER JOIN question_likes ON question_likes.user_id = users.id
            INNER JOIN questions ON questions.id = question_likes.question_id
            WHERE questions.id = ?1
            "#,
            params![question_id],
            |row| row.get(0),
        )
        .map_err(|e| RepositoryError::from_row_error(QuestionLike::ENTITY, e))?;

        tracing::debug!("问题点赞数: question_id={}, likes={}", question_id, count);
        Ok(count)
    }

    /// 用户点赞的问题
    pub fn liked_questions_for_user_id(&self, user_id: i64) -> RepositoryResult<Vec<Question>> {
        tracing::debug!("查询用户点赞的问题: user_id={}", user_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            r#"
            SELECT questions.*
            FROM questions
            INNER JOIN question_likes ON question_likes.question_id = questions.id
            INNER JOIN users ON users.id = question_likes.user_id
            WHERE users.id = ?1
            "#,
            params![user_id],
        )
    }

    /// 点赞数最多的前 n 个问题 (按 questions.id 分组，同数按 id 升序)
    pub fn most_liked_questions(&self, n: usize) -> RepositoryResult<Vec<Question>> {
        tracing::debug!("查询点赞数最多的问题: n={}", n);
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            r#"
            SELECT questions.*
            FROM questions
            INNER JOIN question_likes ON question_likes.question_id = questions.id
            INNER JOIN users ON users.id = question_likes.user_id
            GROUP BY questions.id
            ORDER BY COUNT(*) DESC, questions.id ASC
            LIMIT ?1
            "#,
            params![limit],
        )
    }
}
