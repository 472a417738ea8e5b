// ==========================================
// 问答系统数据访问层 - 配置层
// ==========================================
// 职责: 数据库路径与连接参数
// 来源: 环境变量 (未设置时使用默认值)
// ==========================================

pub mod db_config;

// 重导出
pub use db_config::{get_default_db_path, DbConfig};
