// ==========================================
// 生产单报表 - 生产单明细 (production.report)
// ==========================================

use crate::engine::lookup::ProductionLookup;
use crate::report::error::{ReportError, ReportResult};
use crate::report::service::{Report, ReportRequest};
use crate::report::template::render_production_sheets;
use crate::report::PRODUCTION_REPORT;
use std::sync::Arc;

pub struct ProductionReport {
    lookup: Arc<dyn ProductionLookup>,
}

impl ProductionReport {
    pub fn new(lookup: Arc<dyn ProductionLookup>) -> Self {
        Self { lookup }
    }
}

impl Report for ProductionReport {
    fn name(&self) -> &'static str {
        PRODUCTION_REPORT
    }

    fn render_html(&self, request: &ReportRequest) -> ReportResult<String> {
        if request.record_ids.is_empty() {
            return Err(ReportError::MissingData("record_ids".to_string()));
        }
        let records = self.lookup.browse(&request.record_ids)?;
        Ok(render_production_sheets(&records))
    }
}
