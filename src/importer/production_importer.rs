// ==========================================
// 生产单报表 - 生产单 CSV 导入
// ==========================================
// 表头: number,product,quantity,uom,planned_date,state,reference,warehouse
// 日期格式: YYYY-MM-DD；状态: 小写状态名
// 校验失败的行被拒绝并记录行号，其余行单事务写入
// ==========================================

use crate::domain::production::NewProduction;
use crate::domain::types::ProductionState;
use crate::importer::error::{ImportError, ImportResult};
use crate::repository::ProductionRepository;
use chrono::NaiveDate;
use serde::Serialize;
use std::io::Read;
use std::path::Path;
use std::sync::Arc;
use tracing::instrument;

/// 期望的 CSV 表头
pub const EXPECTED_HEADERS: [&str; 8] = [
    "number",
    "product",
    "quantity",
    "uom",
    "planned_date",
    "state",
    "reference",
    "warehouse",
];

/// 被拒绝的行
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowRejection {
    pub row_number: usize,
    pub reason: String,
}

/// 导入汇总
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ImportSummary {
    pub total_rows: usize,
    pub inserted: usize,
    pub rejected: Vec<RowRejection>,
}

pub struct ProductionImporter {
    repo: Arc<ProductionRepository>,
}

impl ProductionImporter {
    pub fn new(repo: Arc<ProductionRepository>) -> Self {
        Self { repo }
    }

    /// 从 CSV 文件导入
    #[instrument(skip(self, file_path), fields(path = %file_path.as_ref().display()))]
    pub fn import_from_csv(&self, file_path: impl AsRef<Path>) -> ImportResult<ImportSummary> {
        let path = file_path.as_ref();
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }
        let file = std::fs::File::open(path)?;
        self.import_from_reader(file)
    }

    /// 从任意读取器导入
    pub fn import_from_reader<R: Read>(&self, reader: R) -> ImportResult<ImportSummary> {
        let (rows, mut summary) = parse_csv(reader)?;

        summary.inserted = if rows.is_empty() {
            0
        } else {
            self.repo.insert_batch(&rows)?
        };

        tracing::info!(
            total = summary.total_rows,
            inserted = summary.inserted,
            rejected = summary.rejected.len(),
            "生产单导入完成"
        );
        Ok(summary)
    }
}

/// 解析 CSV，返回有效行与汇总（inserted 由调用方填写）
pub fn parse_csv<R: Read>(reader: R) -> ImportResult<(Vec<NewProduction>, ImportSummary)> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers: Vec<String> = reader.headers()?.iter().map(|h| h.to_lowercase()).collect();
    if headers.len() < EXPECTED_HEADERS.len()
        || headers.iter().zip(EXPECTED_HEADERS.iter()).any(|(a, b)| a != b)
    {
        return Err(ImportError::HeaderMismatch {
            expected: EXPECTED_HEADERS.join(","),
            actual: headers.join(","),
        });
    }

    let mut rows = Vec::new();
    let mut summary = ImportSummary::default();

    for (row_idx, result) in reader.records().enumerate() {
        let record = result?;
        let row_number = row_idx + 2; // +2 因为行号从1开始,且跳过header
        summary.total_rows += 1;

        match parse_record(&record) {
            Ok(production) => rows.push(production),
            Err(reason) => {
                tracing::warn!(row = row_number, reason = %reason, "拒绝导入行");
                summary.rejected.push(RowRejection { row_number, reason });
            }
        }
    }

    Ok((rows, summary))
}

fn get_string_field(record: &csv::StringRecord, index: usize) -> Option<String> {
    record
        .get(index)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn parse_record(record: &csv::StringRecord) -> Result<NewProduction, String> {
    let number = get_string_field(record, 0).ok_or_else(|| "number 为空".to_string())?;
    let product = get_string_field(record, 1).ok_or_else(|| "product 为空".to_string())?;

    let quantity_raw = get_string_field(record, 2).ok_or_else(|| "quantity 为空".to_string())?;
    let quantity = quantity_raw
        .parse::<f64>()
        .map_err(|_| format!("quantity 非法: {}", quantity_raw))?;
    if !quantity.is_finite() || quantity < 0.0 {
        return Err(format!("quantity 超出范围: {}", quantity_raw));
    }

    let uom = get_string_field(record, 3).ok_or_else(|| "uom 为空".to_string())?;

    let date_raw = get_string_field(record, 4).ok_or_else(|| "planned_date 为空".to_string())?;
    let planned_date = NaiveDate::parse_from_str(&date_raw, "%Y-%m-%d")
        .map_err(|_| format!("planned_date 格式错误: 期望 YYYY-MM-DD，实际 {}", date_raw))?;

    let state_raw = get_string_field(record, 5).ok_or_else(|| "state 为空".to_string())?;
    let state = ProductionState::from_str(&state_raw)
        .ok_or_else(|| format!("未知的生产单状态: {}", state_raw))?;

    Ok(NewProduction {
        number,
        product,
        quantity,
        uom,
        planned_date,
        state,
        reference: get_string_field(record, 6),
        warehouse: get_string_field(record, 7),
    })
}
