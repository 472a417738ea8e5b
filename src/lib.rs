// ==========================================
// 问答系统数据访问层 - 核心库
// ==========================================
// 技术栈: Rust + SQLite (rusqlite)
// 实体: 用户 / 问题 / 回复 / 关注 / 点赞
// 本层只读: 每个查询方法执行一条固定的参数化 SQL
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 配置层 - 数据库路径与连接参数
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 应用层 - 仓储集合
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use app::QuestionsDb;
pub use config::DbConfig;
pub use db::QuestionsDbConnection;
pub use domain::{Question, QuestionFollow, QuestionLike, Reply, ReplyTree, ReplyTreeError, User};
pub use repository::{
    QuestionFollowRepository, QuestionLikeRepository, QuestionRepository, ReplyRepository,
    RepositoryError, RepositoryResult, UserRepository,
};

// ==========================================
// 常量定义
// ==========================================

// 版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
