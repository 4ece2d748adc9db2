// ==========================================
// 生产单报表 - 领域模型层
// ==========================================
// 职责: 定义生产单、公司、日期区间等领域类型
// 红线: 不含数据访问逻辑,不含报表渲染逻辑
// ==========================================

pub mod company;
pub mod date_range;
pub mod production;
pub mod types;

// 重导出核心类型
pub use company::{Company, SessionContext};
pub use date_range::{week_end_for, week_start_for, DateRange};
pub use production::{NewProduction, ProductionRecord};
pub use types::ProductionState;
