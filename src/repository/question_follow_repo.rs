// ==========================================
// 问答系统数据访问层 - 关注关系仓储
// ==========================================
// 联表查询: users ⋈ question_follows ⋈ questions
// 每个查询只有两个 INNER JOIN 和一个绑定参数
// ==========================================

use crate::db::QuestionsDbConnection;
use crate::domain::{Question, QuestionFollow, User};
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::row::{query_all, query_optional, FromRow};
use rusqlite::{params, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

impl FromRow for QuestionFollow {
    const ENTITY: &'static str = "QuestionFollow";
    const COLUMNS: &'static [&'static str] = &["id", "user_id", "question_id"];

    fn from_row(row: &Row<'_>) -> SqliteResult<Self> {
        Ok(QuestionFollow {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            question_id: row.get("question_id")?,
        })
    }
}

// ==========================================
// QuestionFollowRepository - 关注关系仓储
// ==========================================
pub struct QuestionFollowRepository {
    conn: Arc<Mutex<Connection>>,
}

impl QuestionFollowRepository {
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

    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<QuestionFollow>> {
        tracing::debug!("查询关注记录: id={}", id);
        let conn = self.get_conn()?;
        query_optional(
            &conn,
            "SELECT * FROM question_follows WHERE id = ?1",
            params![id],
        )
    }

    /// 用户的全部关注记录
    pub fn find_by_user_id(&self, user_id: i64) -> RepositoryResult<Vec<QuestionFollow>> {
        tracing::debug!("查询用户关注记录: user_id={}", user_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM question_follows WHERE user_id = ?1",
            params![user_id],
        )
    }

    /// 问题的全部关注记录
    pub fn find_by_question_id(&self, question_id: i64) -> RepositoryResult<Vec<QuestionFollow>> {
        tracing::debug!("查询问题关注记录: question_id={}", question_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            "SELECT * FROM question_follows WHERE question_id = ?1",
            params![question_id],
        )
    }

    /// 关注某问题的用户 (不去重)
    pub fn followers_for_question_id(&self, question_id: i64) -> RepositoryResult<Vec<User>> {
        tracing::debug!("查询问题关注者: question_id={}", question_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            r#"
            SELECT users.*
            FROM users
            INNER JOIN question_follows ON question_follows.user_id = users.id
            INNER JOIN questions ON questions.id = question_follows.question_id
            WHERE questions.id = ?1
            "#,
            params![question_id],
        )
    }

    /// 用户关注的问题
    pub fn followed_questions_for_user_id(&self, user_id: i64) -> RepositoryResult<Vec<Question>> {
        tracing::debug!("查询用户关注的问题: user_id={}", user_id);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            r#"
            SELECT questions.*
            FROM questions
            INNER JOIN question_follows ON question_follows.question_id = questions.id
            INNER JOIN users ON users.id = question_follows.user_id
            WHERE users.id = ?1
            "#,
            params![user_id],
        )
    }

    /// 关注数最多的前 n 个问题
    ///
    /// # 说明
    /// - 按 questions.id 分组：正文相同的不同问题分别计数
    /// - 关注数降序，同数时按 id 升序
    pub fn most_followed_questions(&self, n: usize) -> RepositoryResult<Vec<Question>> {
        tracing::debug!("查询关注数最多的问题: n={}", n);
        let limit = i64::try_from(n).unwrap_or(i64::MAX);
        let conn = self.get_conn()?;
        query_all(
            &conn,
            r#"
            SELECT questions.*
            FROM questions
            INNER JOIN question_follows ON question_follows.question_id = questions.id
            INNER JOIN users ON users.id = question_follows.user_id
            GROUP BY questions.id
            ORDER BY COUNT(*) DESC, questions.id ASC
            LIMIT ?1
            "#,
            params![limit],
        )
    }
}
