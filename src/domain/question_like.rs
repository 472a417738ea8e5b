// ==========================================
// 问答系统数据访问层 - 点赞关系
// ==========================================
// 对齐: question_likes 表 (users ↔ questions 关联表)
// ==========================================

use serde::{Deserialize, Serialize};

/// 一条 (用户, 问题) 点赞记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionLike {
    pub id: i64,
    pub user_id: i64,
    pub question_id: i64,
}
