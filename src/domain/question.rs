// ==========================================
// 问答系统数据访问层 - 问题领域模型
// ==========================================
// 对齐: questions 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Question - 问题
// ==========================================
// title/body 只在内存中可改，无回写
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: i64,       // 主键
    pub title: String, // 标题
    pub body: String,  // 正文
    pub user_id: i64,  // 作者 (FK → users.id)
}

impl Question {
    /// 判断是否为指定用户所写
    pub fn is_authored_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}
