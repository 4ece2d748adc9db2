// ==========================================
// 生产单报表 - 配置层
// ==========================================
// 职责: 报表渲染、会话上下文、语言配置
// 存储: config_kv 表
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, ConfigManager};
