// ==========================================
// 问答系统数据访问层 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入；本层只读
// ==========================================

pub mod error;
pub mod question_follow_repo;
pub mod question_like_repo;
pub mod question_repo;
pub mod reply_repo;
pub mod row;
pub mod user_repo;

#[cfg(test)]
pub(crate) mod test_support;

// 重导出核心仓储
pub use error::{RepositoryError, RepositoryResult};
pub use question_follow_repo::QuestionFollowRepository;
pub use question_like_repo::QuestionLikeRepository;
pub use question_repo::QuestionRepository;
pub use reply_repo::ReplyRepository;
pub use row::FromRow;
pub use user_repo::UserRepository;
