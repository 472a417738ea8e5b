// ==========================================
// 问答系统数据访问层 - 仓储层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::reply_tree::ReplyTreeError;
use thiserror::Error;

/// 仓储层错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    // ===== 存储错误 =====
    #[error("数据库不可用: {0}")]
    StorageUnavailable(String),

    #[error("数据表缺失: {table}")]
    SchemaMismatch { table: String },

    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库查询失败: {0}")]
    DatabaseQueryError(String),

    // ===== 数据错误 =====
    #[error("记录未找到: {entity} with id={id}")]
    NotFound { entity: String, id: String },

    #[error("行数据不完整 (entity={entity}, column={column}): {reason}")]
    MalformedRow {
        entity: String,
        column: String,
        reason: String,
    },

    #[error("回复树无效: {0}")]
    InvalidReplyTree(#[from] ReplyTreeError),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RepositoryError {
    /// 为行映射错误补充实体名
    ///
    /// rusqlite 在闭包内只能返回自身的错误类型，列名/类型错误在这里
    /// 带上实体名后再转换为 MalformedRow。
    pub fn from_row_error(entity: &str, err: rusqlite::Error) -> Self {
        match RepositoryError::from(err) {
            RepositoryError::MalformedRow { column, reason, .. } => RepositoryError::MalformedRow {
                entity: entity.to_string(),
                column,
                reason,
            },
            other => other,
        }
    }
}

/// 从 SQLite 报错文本中取出缺失的列名
///
/// 语句准备阶段引用了不存在的列时，SQLite 报 "no such column: <列>"，
/// 列名可能带表名前缀 (question_likes.question_id)，也可能后跟 " in <SQL>"。
pub fn missing_column(message: &str) -> Option<String> {
    const MARKER: &str = "no such column: ";
    let start = message.find(MARKER)? + MARKER.len();
    let qualified = message[start..].split_whitespace().next()?;
    let column = qualified.rsplit('.').next().unwrap_or(qualified);
    if column.is_empty() {
        None
    } else {
        Some(column.to_string())
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for RepositoryError {
    fn from(err: rusqlite::Error) -> Self {
        // 准备语句时的缺列错误与取值时的缺列错误同属表结构漂移
        if let Some(column) = missing_column(&err.to_string()) {
            return RepositoryError::MalformedRow {
                entity: "Unknown".to_string(),
                column,
                reason: "列不存在".to_string(),
            };
        }

        match err {
            rusqlite::Error::InvalidColumnName(column) => RepositoryError::MalformedRow {
                entity: "Unknown".to_string(),
                column,
                reason: "列不存在".to_string(),
            },
            rusqlite::Error::InvalidColumnType(_, column, ty) => RepositoryError::MalformedRow {
                entity: "Unknown".to_string(),
                column,
                reason: format!("列类型不匹配: {}", ty),
            },
            rusqlite::Error::FromSqlConversionFailure(idx, ty, e) => RepositoryError::MalformedRow {
                entity: "Unknown".to_string(),
                column: format!("#{}", idx),
                reason: format!("类型转换失败 ({}): {}", ty, e),
            },
            rusqlite::Error::IntegralValueOutOfRange(idx, v) => RepositoryError::MalformedRow {
                entity: "Unknown".to_string(),
                column: format!("#{}", idx),
                reason: format!("整数越界: {}", v),
            },
            rusqlite::Error::SqliteFailure(_, Some(msg)) => RepositoryError::DatabaseQueryError(msg),
            rusqlite::Error::QueryReturnedNoRows => RepositoryError::NotFound {
                entity: "Unknown".to_string(),
                id: "Unknown".to_string(),
            },
            _ => RepositoryError::DatabaseQueryError(err.to_string()),
        }
    }
}

/// Result 类型别名
pub type RepositoryResult<T> = Result<T, RepositoryError>;
