// ==========================================
// 生产单报表 - 区间报表向导
// ==========================================
// 状态机: start → generate → end
//         start --取消--> end
// generate 为动作状态: 打包 {start_date, end_date} 触发 report.productions
// ==========================================

use crate::i18n::t;
use crate::report::error::{ReportError, ReportResult};
use crate::report::service::{RenderedReport, ReportAction, ReportRequest, ReportService};
use crate::report::PRODUCTIONS_REPORT;
use crate::wizard::start_form::{FieldDef, ProductionsReportWizardStart};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 向导状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardState {
    Start,    // 显示日期表单
    Generate, // 动作状态
    End,      // 终止
}

impl fmt::Display for WizardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WizardState::Start => write!(f, "start"),
            WizardState::Generate => write!(f, "generate"),
            WizardState::End => write!(f, "end"),
        }
    }
}

/// 视图按钮
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label_key: &'static str,
    pub target: WizardState,
    pub icon: &'static str,
    pub default: bool,
}

impl Button {
    pub fn label(&self) -> String {
        t(self.label_key)
    }
}

/// 视图状态描述（交由宿主 UI 渲染）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateView {
    pub model: &'static str,
    pub view_id: &'static str,
    pub fields: Vec<FieldDef>,
    pub buttons: Vec<Button>,
    pub values: ProductionsReportWizardStart,
}

impl StateView {
    pub fn default_button(&self) -> Option<&Button> {
        self.buttons.iter().find(|b| b.default)
    }
}

// ==========================================
// ProductionsReportWizard - 区间报表向导
// ==========================================
pub struct ProductionsReportWizard {
    state: WizardState,
    pub start: ProductionsReportWizardStart,
}

impl ProductionsReportWizard {
    pub const NAME: &'static str = "report.productions.wizard";
    pub const START_VIEW_ID: &'static str = "production_report.report_productions_view_form";

    /// 以 `today` 计算表单默认值
    pub fn new(today: NaiveDate) -> Self {
        Self {
            state: WizardState::Start,
            start: ProductionsReportWizardStart::with_defaults(today),
        }
    }

    pub fn state(&self) -> WizardState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state == WizardState::End
    }

    /// 起始视图按钮
    pub fn buttons() -> Vec<Button> {
        vec![
            Button {
                label_key: "wizard.cancel",
                target: WizardState::End,
                icon: "tryton-cancel",
                default: false,
            },
            Button {
                label_key: "wizard.generate",
                target: WizardState::Generate,
                icon: "tryton-ok",
                default: true,
            },
        ]
    }

    /// 起始视图
    pub fn start_view(&self) -> StateView {
        StateView {
            model: ProductionsReportWizardStart::MODEL,
            view_id: Self::START_VIEW_ID,
            fields: ProductionsReportWizardStart::fields(),
            buttons: Self::buttons(),
            values: self.start.clone(),
        }
    }

    /// 打包报表动作与数据
    pub fn do_generate(&self) -> ReportResult<(ReportAction, ReportRequest)> {
        let range = self.start.to_date_range()?;
        Ok((
            ReportAction::new(PRODUCTIONS_REPORT),
            ReportRequest::for_range(range),
        ))
    }

    /// generate 之后无条件结束
    pub fn transition_generate(&self) -> WizardState {
        WizardState::End
    }

    /// 点击按钮
    ///
    /// # 返回
    /// - Ok(None): 取消，向导结束
    /// - Ok(Some((action, request))): 生成，向导结束，调用方执行报表动作
    /// - Err: 非 start 状态点击、目标非法或必填字段缺失（保持 start）
    pub fn press(&mut self, target: WizardState) -> ReportResult<Option<(ReportAction, ReportRequest)>> {
        if self.state != WizardState::Start {
            return Err(ReportError::InvalidStateTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            });
        }

        match target {
            WizardState::End => {
                tracing::debug!(wizard = Self::NAME, "向导已取消");
                self.state = WizardState::End;
                Ok(None)
            }
            WizardState::Generate => {
                let packaged = self.do_generate()?;
                self.state = WizardState::Generate;
                tracing::debug!(wizard = Self::NAME, state = %self.state, "报表动作已打包");
                self.state = self.transition_generate();
                Ok(Some(packaged))
            }
            WizardState::Start => Err(ReportError::InvalidStateTransition {
                from: self.state.to_string(),
                to: target.to_string(),
            }),
        }
    }

    /// 点击按钮并执行报表动作
    pub fn submit(
        &mut self,
        target: WizardState,
        service: &ReportService,
    ) -> ReportResult<Option<RenderedReport>> {
        match self.press(target)? {
            Some((action, request)) => service.execute(&action, &request).map(Some),
            None => Ok(None),
        }
    }
}
