// ==========================================
// 生产单报表 - 引擎层
// ==========================================
// 职责: 报表数据组装（按日分组）+ 外部协作者接口
// 红线: 引擎不直接拼接 SQL，不渲染 HTML
// ==========================================

pub mod date_bucketer;
pub mod lookup;

// 重导出
pub use date_bucketer::{bucket, date_span, DayBuckets};
pub use lookup::{CompanyContext, ProductionLookup, SessionCompany};
