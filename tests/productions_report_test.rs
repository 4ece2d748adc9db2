// ==========================================
// 区间报表端到端测试
// ==========================================
// 测试目标: 查询 → 按日分组 → HTML → 品牌化渲染
// ==========================================

mod test_helpers;

use chrono::NaiveDate;
use production_report::config::config_keys;
use production_report::domain::{DateRange, ProductionState, SessionContext};
use production_report::report::{
    footer_options, OptionValue, ProductionsReport, ReportAction, ReportError, ReportRequest,
    PRODUCTIONS_REPORT, PRODUCTION_REPORT,
};
use test_helpers::{create_test_state, d, standard_productions, RecordingRenderer};

#[test]
fn test_parse_buckets_every_day() {
    let (_temp_file, state) = create_test_state().unwrap();
    state.production_repo.insert_batch(&standard_productions()).unwrap();

    let report = ProductionsReport::new(
        state.production_repo.clone(),
        ProductionState::REPORT_EXCLUDED.to_vec(),
    );
    let context = report
        .parse(DateRange::new(d(2024, 6, 3), d(2024, 6, 8)))
        .unwrap();

    assert_eq!(context.dates.len(), 6);
    assert_eq!(context.productions_by_date.len(), 6);
    assert_eq!(context.total(), 4);

    let numbers = |day: NaiveDate| {
        context.productions_by_date[&day]
            .iter()
            .map(|r| r.number.clone())
            .collect::<Vec<_>>()
    };
    assert_eq!(numbers(d(2024, 6, 3)), vec!["MO002"]);
    assert!(numbers(d(2024, 6, 4)).is_empty());
    assert_eq!(numbers(d(2024, 6, 5)), vec!["MO003", "MO004"]);
    assert!(numbers(d(2024, 6, 6)).is_empty());
    assert!(numbers(d(2024, 6, 7)).is_empty());
    assert_eq!(numbers(d(2024, 6, 8)), vec!["MO007"]);
}

#[test]
fn test_execute_productions_report_with_company_footer() {
    let (_temp_file, state) = create_test_state().unwrap();
    state.production_repo.insert_batch(&standard_productions()).unwrap();
    let company_id = state.company_repo.create("ACME Manufacturing").unwrap();

    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::with_company(company_id))
        .unwrap();

    let rendered = service
        .execute(
            &ReportAction::new(PRODUCTIONS_REPORT),
            &ReportRequest::for_range(DateRange::new(d(2024, 6, 3), d(2024, 6, 8))),
        )
        .unwrap();

    assert_eq!(rendered.report_name, "report.productions");
    assert!(rendered.content.starts_with(b"%PDF"));

    let call = renderer.last_call().expect("renderer should be called");
    assert_eq!(call.options, footer_options("ACME Manufacturing"));
    assert!(call.html.contains("MO003"));
    assert!(!call.html.contains("MO005"), "cancel 状态应被排除");
    assert!(!call.html.contains("MO001"), "区间外记录不应出现");
    assert_eq!(call.html.matches("<section class=\"day\"").count(), 6);
}

#[test]
fn test_footer_company_blank_without_context() {
    let (_temp_file, state) = create_test_state().unwrap();

    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::default())
        .unwrap();
    service
        .execute(
            &ReportAction::new(PRODUCTIONS_REPORT),
            &ReportRequest::for_range(DateRange::new(d(2024, 6, 3), d(2024, 6, 3))),
        )
        .unwrap();

    let call = renderer.last_call().unwrap();
    assert_eq!(
        call.options.get("footer-left"),
        Some(&OptionValue::Text(String::new()))
    );
}

#[test]
fn test_unknown_company_propagates_error() {
    let (_temp_file, state) = create_test_state().unwrap();

    let service = state
        .report_service_with_renderer(RecordingRenderer::default(), SessionContext::with_company(42))
        .unwrap();
    let err = service
        .execute(
            &ReportAction::new(PRODUCTIONS_REPORT),
            &ReportRequest::for_range(DateRange::new(d(2024, 6, 3), d(2024, 6, 8))),
        )
        .unwrap_err();

    assert!(matches!(err, ReportError::Repository(_)));
}

#[test]
fn test_configured_excluded_states() {
    let (_temp_file, state) = create_test_state().unwrap();
    state.production_repo.insert_batch(&standard_productions()).unwrap();
    state
        .config
        .set_global_config_value(config_keys::EXCLUDED_STATES, r#"["draft"]"#)
        .unwrap();

    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::default())
        .unwrap();
    service
        .execute(
            &ReportAction::new(PRODUCTIONS_REPORT),
            &ReportRequest::for_range(DateRange::new(d(2024, 6, 3), d(2024, 6, 8))),
        )
        .unwrap();

    let html = renderer.last_call().unwrap().html;
    assert!(!html.contains("MO002"));
    assert!(html.contains("MO005"));
    assert!(html.contains("MO006"));
}

#[test]
fn test_missing_range_is_error() {
    let (_temp_file, state) = create_test_state().unwrap();
    let service = state
        .report_service_with_renderer(RecordingRenderer::default(), SessionContext::default())
        .unwrap();

    let err = service
        .execute(&ReportAction::new(PRODUCTIONS_REPORT), &ReportRequest::default())
        .unwrap_err();
    assert!(matches!(err, ReportError::MissingData(_)));
}

#[test]
fn test_production_sheet_report() {
    let (_temp_file, state) = create_test_state().unwrap();
    state.production_repo.insert_batch(&standard_productions()).unwrap();

    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::default())
        .unwrap();
    service
        .execute(
            &ReportAction::new(PRODUCTION_REPORT),
            &ReportRequest::for_records(vec![3, 1]),
        )
        .unwrap();

    let call = renderer.last_call().unwrap();
    let pos_mo003 = call.html.find("MO003").unwrap();
    let pos_mo001 = call.html.find("MO001").unwrap();
    assert!(pos_mo003 < pos_mo001, "明细应按请求顺序输出");
    assert_eq!(call.options, footer_options(""));
}
