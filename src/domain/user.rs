// ==========================================
// 问答系统数据访问层 - 用户领域模型
// ==========================================
// 对齐: users 表
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// User - 用户
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,       // 主键 (不可变)
    pub fname: String, // 名
    pub lname: String, // 姓
}

impl User {
    /// 显示用全名 ("fname lname")
    pub fn full_name(&self) -> String {
        format!("{} {}", self.fname, self.lname)
    }
}
