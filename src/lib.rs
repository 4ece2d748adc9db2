// ==========================================
// 生产单报表 - 核心库
// ==========================================
// 按日期区间汇总生产单，按日分组后经 wkhtmltopdf 输出 PDF
// 技术栈: Rust + SQLite + wkhtmltopdf
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 按日分组 + 协作者接口
pub mod engine;

// 报表层 - 模板与渲染
pub mod report;

// 向导层 - 日期区间输入
pub mod wizard;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{Company, DateRange, ProductionRecord, ProductionState, SessionContext};
pub use engine::{bucket, date_span, DayBuckets, ProductionLookup};
pub use report::{ReportAction, ReportError, ReportRequest, ReportService, PRODUCTIONS_REPORT, PRODUCTION_REPORT};
pub use wizard::{ProductionsReportWizard, WizardState};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "production-report";
