// ==========================================
// 生产单报表 - 报表层
// ==========================================
// 职责: 报表注册/执行、HTML 模板、PDF 渲染与页脚品牌化
// ==========================================

pub mod branding;
pub mod error;
pub mod options;
pub mod production_report;
pub mod productions_report;
pub mod renderer;
pub mod service;
pub mod template;

/// 区间报表名称
pub const PRODUCTIONS_REPORT: &str = "report.productions";
/// 生产单明细报表名称
pub const PRODUCTION_REPORT: &str = "production.report";

// 重导出
pub use branding::BrandedRenderer;
pub use error::{ReportError, ReportResult};
pub use options::{footer_options, OptionValue, RenderOptions};
pub use production_report::ProductionReport;
pub use productions_report::{ProductionsContext, ProductionsReport};
pub use renderer::{PdfRenderer, WkhtmltopdfRenderer};
pub use service::{RenderedReport, Report, ReportAction, ReportRequest, ReportService};
