// ==========================================
// 生产单报表 - 导入层
// ==========================================
// 职责: 将外部 CSV 生产单写入本地记录存储
// ==========================================

pub mod error;
pub mod production_importer;

pub use error::{ImportError, ImportResult};
pub use production_importer::{ImportSummary, ProductionImporter, RowRejection};
