// ==========================================
// 问答系统数据访问层 - 回复领域模型
// ==========================================
// 对齐: replies 表
// parent_id 自引用，构成森林 (见 reply_tree)
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Reply - 回复
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reply {
    pub id: i64,                // 主键
    pub question_id: i64,       // 所属问题 (FK → questions.id)
    pub parent_id: Option<i64>, // 上级回复 (FK → replies.id, null 表示顶层回复)
    pub body: String,           // 正文
    pub user_id: i64,           // 作者 (FK → users.id)
}

impl Reply {
    /// 是否为顶层回复 (直接回复问题)
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}
