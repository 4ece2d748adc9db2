// ==========================================
// 生产单报表 - 向导层
// ==========================================
// 职责: 日期区间输入 + 报表动作触发（与具体 UI 无关）
// ==========================================

pub mod productions_wizard;
pub mod start_form;

// 重导出
pub use productions_wizard::{Button, ProductionsReportWizard, StateView, WizardState};
pub use start_form::{FieldDef, FieldType, ProductionsReportWizardStart};
