// ==========================================
// 生产单报表 - 应用层
// ==========================================

pub mod state;

pub use state::{get_default_db_path, AppState};
