// ==========================================
// 生产单报表 - 报表注册与执行
// ==========================================
// 流程: 按名称查找报表 → 生成 HTML → 品牌化渲染为 PDF
// ==========================================

use crate::domain::date_range::DateRange;
use crate::report::error::{ReportError, ReportResult};
use crate::report::options::RenderOptions;
use crate::report::renderer::PdfRenderer;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::instrument;
use uuid::Uuid;

/// 报表动作（按名称触发）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportAction {
    pub report_name: String,
}

impl ReportAction {
    pub fn new(report_name: impl Into<String>) -> Self {
        Self {
            report_name: report_name.into(),
        }
    }
}

/// 报表请求
///
/// - record_ids: 按记录生成的报表使用
/// - data: 按日期区间生成的报表使用
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportRequest {
    pub record_ids: Vec<i64>,
    pub data: Option<DateRange>,
}

impl ReportRequest {
    pub fn for_range(range: DateRange) -> Self {
        Self {
            record_ids: Vec::new(),
            data: Some(range),
        }
    }

    pub fn for_records(ids: Vec<i64>) -> Self {
        Self {
            record_ids: ids,
            data: None,
        }
    }
}

/// 渲染结果
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub report_id: Uuid,
    pub report_name: String,
    pub format: String,
    pub content: Vec<u8>,
}

/// 报表接口
pub trait Report: Send + Sync {
    /// 报表名称（动作标识）
    fn name(&self) -> &'static str;

    /// 生成 HTML
    fn render_html(&self, request: &ReportRequest) -> ReportResult<String>;
}

// ==========================================
// ReportService - 报表服务
// ==========================================
pub struct ReportService {
    reports: BTreeMap<&'static str, Box<dyn Report>>,
    renderer: Box<dyn PdfRenderer>,
}

impl ReportService {
    pub fn new(renderer: Box<dyn PdfRenderer>) -> Self {
        Self {
            reports: BTreeMap::new(),
            renderer,
        }
    }

    /// 注册报表（同名覆盖）
    pub fn register(&mut self, report: Box<dyn Report>) {
        self.reports.insert(report.name(), report);
    }

    pub fn report_names(&self) -> Vec<&'static str> {
        self.reports.keys().copied().collect()
    }

    /// 执行报表动作
    #[instrument(skip(self, request), fields(report = %action.report_name))]
    pub fn execute(
        &self,
        action: &ReportAction,
        request: &ReportRequest,
    ) -> ReportResult<RenderedReport> {
        let report = self
            .reports
            .get(action.report_name.as_str())
            .ok_or_else(|| ReportError::UnknownReport(action.report_name.clone()))?;

        let report_id = Uuid::new_v4();
        let html = report.render_html(request)?;
        let content = self.renderer.html_to_pdf(&html, &RenderOptions::new())?;

        tracing::info!(
            report_id = %report_id,
            report_name = %action.report_name,
            html_bytes = html.len(),
            pdf_bytes = content.len(),
            "报表生成完成"
        );

        Ok(RenderedReport {
            report_id,
            report_name: action.report_name.clone(),
            format: "pdf".to_string(),
            content,
        })
    }
}
