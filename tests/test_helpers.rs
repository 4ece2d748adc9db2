// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试数据库初始化、测试数据生成、替身渲染器
// ==========================================

#![allow(dead_code)]

use chrono::NaiveDate;
use production_report::app::AppState;
use production_report::db::{init_schema, open_sqlite_connection};
use production_report::domain::{NewProduction, ProductionState};
use production_report::report::{PdfRenderer, RenderOptions, ReportResult};
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 创建基于临时数据库的 AppState
pub fn create_test_state() -> Result<(NamedTempFile, AppState), Box<dyn Error>> {
    let (temp_file, db_path) = create_test_db()?;
    let state = AppState::new(db_path)?;
    Ok((temp_file, state))
}

pub fn d(y: i32, m: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, day).unwrap()
}

/// 构造待写入生产单
pub fn new_production(number: &str, planned_date: NaiveDate, state: ProductionState) -> NewProduction {
    NewProduction {
        number: number.to_string(),
        product: format!("Product of {}", number),
        quantity: 100.0,
        uom: "Unit".to_string(),
        planned_date,
        state,
        reference: None,
        warehouse: Some("WH".to_string()),
    }
}

/// 标准测试数据: 2024-06-02 ~ 2024-06-10 之间的不同状态生产单
///
/// | number | planned_date | state    |
/// |--------|--------------|----------|
/// | MO001  | 2024-06-02   | done     | 区间外（前）
/// | MO002  | 2024-06-03   | draft    |
/// | MO003  | 2024-06-05   | done     |
/// | MO004  | 2024-06-05   | running  |
/// | MO005  | 2024-06-05   | cancel   | 排除
/// | MO006  | 2024-06-06   | request  | 排除
/// | MO007  | 2024-06-08   | waiting  |
/// | MO008  | 2024-06-09   | assigned | 区间外（后）
pub fn standard_productions() -> Vec<NewProduction> {
    vec![
        new_production("MO001", d(2024, 6, 2), ProductionState::Done),
        new_production("MO002", d(2024, 6, 3), ProductionState::Draft),
        new_production("MO003", d(2024, 6, 5), ProductionState::Done),
        new_production("MO004", d(2024, 6, 5), ProductionState::Running),
        new_production("MO005", d(2024, 6, 5), ProductionState::Cancel),
        new_production("MO006", d(2024, 6, 6), ProductionState::Request),
        new_production("MO007", d(2024, 6, 8), ProductionState::Waiting),
        new_production("MO008", d(2024, 6, 9), ProductionState::Assigned),
    ]
}

// ==========================================
// RecordingRenderer - 记录调用的替身渲染器
// ==========================================

#[derive(Debug, Clone)]
pub struct RenderCall {
    pub html: String,
    pub options: RenderOptions,
}

#[derive(Clone, Default)]
pub struct RecordingRenderer {
    pub calls: Arc<Mutex<Vec<RenderCall>>>,
}

impl RecordingRenderer {
    pub fn last_call(&self) -> Option<RenderCall> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl PdfRenderer for RecordingRenderer {
    fn html_to_pdf(&self, html: &str, options: &RenderOptions) -> ReportResult<Vec<u8>> {
        self.calls.lock().unwrap().push(RenderCall {
            html: html.to_string(),
            options: options.clone(),
        });
        Ok(b"%PDF-1.4\n%fake\n".to_vec())
    }
}
