// ==========================================
// 问答系统数据访问层 - 数据库配置
// ==========================================

use crate::db::DEFAULT_BUSY_TIMEOUT_MS;

/// 数据库路径环境变量
pub const DB_PATH_ENV: &str = "QUESTIONS_DB_PATH";

/// busy_timeout 环境变量（毫秒）
pub const BUSY_TIMEOUT_ENV: &str = "QUESTIONS_DB_BUSY_TIMEOUT_MS";

/// 默认数据库文件名（相对当前工作目录）
pub const DEFAULT_DB_FILE: &str = "questions.db";

// ==========================================
// DbConfig - 数据库连接配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DbConfig {
    pub db_path: String,
    pub busy_timeout_ms: u64,
}

impl Default for DbConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_FILE.to_string(),
            busy_timeout_ms: DEFAULT_BUSY_TIMEOUT_MS,
        }
    }
}

impl DbConfig {
    /// 指定路径，其余参数取默认值
    pub fn with_path(db_path: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            ..Self::default()
        }
    }

    /// 从环境变量读取配置
    ///
    /// # 环境变量
    /// - QUESTIONS_DB_PATH: 数据库文件路径（默认: questions.db）
    /// - QUESTIONS_DB_BUSY_TIMEOUT_MS: busy_timeout 毫秒数（默认: 5000）
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意 key → value 查找函数读取配置（便于测试，不依赖进程环境）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup(DB_PATH_ENV)
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .unwrap_or_else(|| DEFAULT_DB_FILE.to_string());

        let busy_timeout_ms = match lookup(BUSY_TIMEOUT_ENV) {
            Some(raw) => match raw.trim().parse::<u64>() {
                Ok(ms) => ms,
                Err(e) => {
                    tracing::warn!(
                        "{} 无法解析 ({}): {}，使用默认值 {}",
                        BUSY_TIMEOUT_ENV,
                        raw,
                        e,
                        DEFAULT_BUSY_TIMEOUT_MS
                    );
                    DEFAULT_BUSY_TIMEOUT_MS
                }
            },
            None => DEFAULT_BUSY_TIMEOUT_MS,
        };

        Self {
            db_path,
            busy_timeout_ms,
        }
    }
}

/// 获取默认数据库路径
///
/// 允许通过环境变量 QUESTIONS_DB_PATH 显式指定，否则为 ./questions.db
pub fn get_default_db_path() -> String {
    DbConfig::from_env().db_path
}
