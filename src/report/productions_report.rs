// ==========================================
// 生产单报表 - 区间报表 (report.productions)
// ==========================================
// 流程: 查询区间内生产单 → 按日分组 → 渲染 HTML
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::types::ProductionState;
use crate::engine::date_bucketer::{bucket, date_span, DayBuckets};
use crate::engine::lookup::ProductionLookup;
use crate::report::error::{ReportError, ReportResult};
use crate::report::service::{Report, ReportRequest};
use crate::report::template::render_productions;
use crate::report::PRODUCTIONS_REPORT;
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;

/// 报表上下文（模板输入）
#[derive(Debug, Clone, PartialEq)]
pub struct ProductionsContext {
    pub range: DateRange,
    pub dates: Vec<NaiveDate>,
    pub productions_by_date: DayBuckets,
}

impl ProductionsContext {
    /// 区间内生产单总数
    pub fn total(&self) -> usize {
        self.productions_by_date.values().map(Vec::len).sum()
    }
}

pub struct ProductionsReport {
    lookup: Arc<dyn ProductionLookup>,
    excluded_states: Vec<ProductionState>,
}

impl ProductionsReport {
    pub fn new(lookup: Arc<dyn ProductionLookup>, excluded_states: Vec<ProductionState>) -> Self {
        Self {
            lookup,
            excluded_states,
        }
    }

    pub fn excluded_states(&self) -> &[ProductionState] {
        &self.excluded_states
    }

    /// 组装报表上下文
    #[instrument(skip(self, range), fields(range = %range))]
    pub fn parse(&self, range: DateRange) -> ReportResult<ProductionsContext> {
        let records = self
            .lookup
            .search(range.start_date, range.end_date, &self.excluded_states)?;
        let fetched = records.len();

        let dates = date_span(range.start_date, range.end_date);
        let productions_by_date = bucket(records, range.start_date, range.end_date);

        if range.is_inverted() {
            tracing::warn!(range = %range, "结束日期早于开始日期，报表无日期");
        }
        tracing::info!(days = dates.len(), productions = fetched, "区间报表数据已组装");

        Ok(ProductionsContext {
            range,
            dates,
            productions_by_date,
        })
    }
}

impl Report for ProductionsReport {
    fn name(&self) -> &'static str {
        PRODUCTIONS_REPORT
    }

    fn render_html(&self, request: &ReportRequest) -> ReportResult<String> {
        let range = request
            .data
            .ok_or_else(|| ReportError::MissingData("start_date/end_date".to_string()))?;
        let context = self.parse(range)?;
        Ok(render_productions(
            &context.range,
            &context.dates,
            &context.productions_by_date,
        ))
    }
}
