// ==========================================
// 问答系统数据访问层 - 应用层
// ==========================================
// 职责: 把各仓储组装到同一连接上，供上层应用使用
// ==========================================

pub mod state;

// 重导出
pub use state::QuestionsDb;
