// ==========================================
// 问答系统数据访问层 - 领域模型层
// ==========================================
// 职责: 定义实体 (一行数据对应一个值对象)
// 红线: 不含数据访问逻辑
// ==========================================

pub mod question;
pub mod question_follow;
pub mod question_like;
pub mod reply;
pub mod reply_tree;
pub mod user;

// 重导出核心类型
pub use question::Question;
pub use question_follow::QuestionFollow;
pub use question_like::QuestionLike;
pub use reply::Reply;
pub use reply_tree::{ReplyTree, ReplyTreeError};
pub use user::User;
