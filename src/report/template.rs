// ==========================================
// 生产单报表 - HTML 模板
// ==========================================
// 输出完整 HTML 文档，交给 wkhtmltopdf 转换
// 模板: maud（动态文本自动转义）
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::production::ProductionRecord;
use crate::engine::date_bucketer::DayBuckets;
use crate::i18n::{t, t_with_args};
use chrono::NaiveDate;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const STYLE: &str = r#"
    body { font-family: "DejaVu Sans", Arial, sans-serif; font-size: 11px; color: #222; }
    h1 { font-size: 18px; margin: 0 0 4px 0; }
    h2 { font-size: 13px; margin: 16px 0 4px 0; border-bottom: 1px solid #999; }
    .period { color: #555; margin-bottom: 12px; }
    .empty { color: #888; font-style: italic; }
    table { width: 100%; border-collapse: collapse; page-break-inside: auto; }
    tr { page-break-inside: avoid; }
    th, td { border: 1px solid #ccc; padding: 3px 6px; text-align: left; }
    th { background: #f0f0f0; }
    td.num { text-align: right; }
    .sheet { page-break-after: always; }
    .sheet:last-child { page-break-after: auto; }
"#;

/// 区间报表表头
const TABLE_COLUMNS: [&str; 5] = [
    "report.number",
    "report.product",
    "report.quantity",
    "report.uom",
    "report.state",
];

fn document(title: &str, body: Markup) -> String {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { (title) }
                style { (PreEscaped(STYLE)) }
            }
            body { (body) }
        }
    }
    .into_string()
}

fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 {
        format!("{:.0}", quantity)
    } else {
        format!("{:.2}", quantity)
    }
}

fn day_heading(date: NaiveDate) -> String {
    date.format("%A, %Y-%m-%d").to_string()
}

fn productions_table(records: &[ProductionRecord]) -> Markup {
    html! {
        table {
            thead {
                tr {
                    @for key in TABLE_COLUMNS {
                        th { (t(key)) }
                    }
                }
            }
            tbody {
                @for record in records {
                    tr {
                        td { (record.number) }
                        td { (record.product) }
                        td.num { (format_quantity(record.quantity)) }
                        td { (record.uom) }
                        td { (record.state.to_db_str()) }
                    }
                }
            }
        }
    }
}

/// 生产单区间报表
///
/// `dates` 决定输出顺序；`buckets` 中缺失的日期按空列表处理
pub fn render_productions(range: &DateRange, dates: &[NaiveDate], buckets: &DayBuckets) -> String {
    let title = t("report.productions_title");
    let start = range.start_date.to_string();
    let end = range.end_date.to_string();
    let period = t_with_args("report.period", &[("start", start.as_str()), ("end", end.as_str())]);
    let no_productions = t("report.no_productions");

    let body = html! {
        h1 { (title) }
        div.period { (period) }
        @for date in dates {
            @let records = buckets.get(date).map(Vec::as_slice).unwrap_or(&[]);
            section.day data-date=(date.to_string()) {
                h2 { (day_heading(*date)) }
                @if records.is_empty() {
                    p.empty { (no_productions) }
                } @else {
                    (productions_table(records))
                }
            }
        }
    };

    document(&title, body)
}

fn sheet_rows(record: &ProductionRecord) -> [(&'static str, String); 7] {
    [
        ("report.product", record.product.clone()),
        (
            "report.quantity",
            format!("{} {}", format_quantity(record.quantity), record.uom),
        ),
        ("report.planned_date", record.planned_date.to_string()),
        ("report.state", record.state.to_string()),
        ("report.reference", record.reference.clone().unwrap_or_default()),
        ("report.warehouse", record.warehouse.clone().unwrap_or_default()),
        ("report.number", record.number.clone()),
    ]
}

/// 生产单明细（每单一页）
pub fn render_production_sheets(records: &[ProductionRecord]) -> String {
    let title = t("report.production_title");

    let body = html! {
        @for record in records {
            div.sheet {
                h1 { (title) " " (record.number) }
                table {
                    @for (key, value) in sheet_rows(record) {
                        tr {
                            th { (t(key)) }
                            td { (value) }
                        }
                    }
                }
            }
        }
    };

    document(&title, body)
}
