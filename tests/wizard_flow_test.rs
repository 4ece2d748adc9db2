// ==========================================
// 区间报表向导流程测试
// ==========================================
// 测试目标: start → generate → end / start → end
// ==========================================

mod test_helpers;

use production_report::domain::SessionContext;
use production_report::report::{footer_options, ReportError};
use production_report::wizard::{ProductionsReportWizard, WizardState};
use test_helpers::{create_test_state, d, standard_productions, RecordingRenderer};

#[test]
fn test_generate_with_default_week() {
    let (_temp_file, state) = create_test_state().unwrap();
    state.production_repo.insert_batch(&standard_productions()).unwrap();
    let company_id = state.company_repo.create("ACME Manufacturing").unwrap();

    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::with_company(company_id))
        .unwrap();

    // 2024-06-05 为周三，默认区间 2024-06-03 ~ 2024-06-08
    let mut wizard = ProductionsReportWizard::new(d(2024, 6, 5));
    assert_eq!(wizard.start.start_date, Some(d(2024, 6, 3)));
    assert_eq!(wizard.start.end_date, Some(d(2024, 6, 8)));

    let rendered = wizard
        .submit(WizardState::Generate, &service)
        .unwrap()
        .expect("generate should produce a report");

    assert_eq!(rendered.report_name, "report.productions");
    assert!(wizard.is_finished());

    let call = renderer.last_call().unwrap();
    assert_eq!(call.options, footer_options("ACME Manufacturing"));
    assert_eq!(call.html.matches("<section class=\"day\"").count(), 6);
    assert!(call.html.contains("data-date=\"2024-06-03\""));
    assert!(call.html.contains("data-date=\"2024-06-08\""));
}

#[test]
fn test_cancel_renders_nothing() {
    let (_temp_file, state) = create_test_state().unwrap();
    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::default())
        .unwrap();

    let mut wizard = ProductionsReportWizard::new(d(2024, 6, 5));
    let result = wizard.submit(WizardState::End, &service).unwrap();

    assert!(result.is_none());
    assert_eq!(wizard.state(), WizardState::End);
    assert!(renderer.calls.lock().unwrap().is_empty());
}

#[test]
fn test_user_edited_range() {
    let (_temp_file, state) = create_test_state().unwrap();
    state.production_repo.insert_batch(&standard_productions()).unwrap();
    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::default())
        .unwrap();

    let mut wizard = ProductionsReportWizard::new(d(2024, 6, 5));
    wizard.start.start_date = Some(d(2024, 6, 5));
    wizard.start.end_date = Some(d(2024, 6, 5));
    wizard.submit(WizardState::Generate, &service).unwrap();

    let html = renderer.last_call().unwrap().html;
    assert_eq!(html.matches("<section class=\"day\"").count(), 1);
    assert!(html.contains("MO003"));
    assert!(html.contains("MO004"));
    assert!(!html.contains("MO002"));
}

#[test]
fn test_missing_field_keeps_start() {
    let (_temp_file, state) = create_test_state().unwrap();
    let renderer = RecordingRenderer::default();
    let service = state
        .report_service_with_renderer(renderer.clone(), SessionContext::default())
        .unwrap();

    let mut wizard = ProductionsReportWizard::new(d(2024, 6, 5));
    wizard.start.end_date = None;

    let err = wizard.submit(WizardState::Generate, &service).unwrap_err();
    assert!(matches!(err, ReportError::RequiredField(_)));
    assert_eq!(wizard.state(), WizardState::Start);
    assert!(renderer.calls.lock().unwrap().is_empty());

    // 补齐字段后可继续生成
    wizard.start.end_date = Some(d(2024, 6, 8));
    assert!(wizard.submit(WizardState::Generate, &service).unwrap().is_some());
}

#[test]
fn test_finished_wizard_rejects_buttons() {
    let (_temp_file, state) = create_test_state().unwrap();
    let service = state
        .report_service_with_renderer(RecordingRenderer::default(), SessionContext::default())
        .unwrap();

    let mut wizard = ProductionsReportWizard::new(d(2024, 6, 5));
    wizard.submit(WizardState::End, &service).unwrap();

    let err = wizard.submit(WizardState::Generate, &service).unwrap_err();
    assert!(matches!(err, ReportError::InvalidStateTransition { .. }));
}
