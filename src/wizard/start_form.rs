// ==========================================
// 生产单报表 - 向导起始表单
// ==========================================
// 两个必填日期字段；未填写时取本周周一 / 周六
// ==========================================

use crate::domain::date_range::{week_end_for, week_start_for, DateRange};
use crate::i18n::t;
use crate::report::error::{ReportError, ReportResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 表单字段类型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    Date,
}

/// 表单字段定义
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDef {
    pub name: &'static str,
    pub label_key: &'static str,
    pub field_type: FieldType,
    pub required: bool,
}

impl FieldDef {
    /// 当前语言下的字段标签
    pub fn label(&self) -> String {
        t(self.label_key)
    }
}

pub const START_DATE_FIELD: &str = "start_date";
pub const END_DATE_FIELD: &str = "end_date";

/// 起始表单（日期区间输入）
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionsReportWizardStart {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl ProductionsReportWizardStart {
    pub const MODEL: &'static str = "report.productions.wizard.start";

    /// 字段定义
    pub fn fields() -> Vec<FieldDef> {
        vec![
            FieldDef {
                name: START_DATE_FIELD,
                label_key: "wizard.start_date",
                field_type: FieldType::Date,
                required: true,
            },
            FieldDef {
                name: END_DATE_FIELD,
                label_key: "wizard.end_date",
                field_type: FieldType::Date,
                required: true,
            },
        ]
    }

    /// 以 `today` 计算默认值的表单
    pub fn with_defaults(today: NaiveDate) -> Self {
        Self {
            start_date: Some(Self::default_start_date(today)),
            end_date: Some(Self::default_end_date(today)),
        }
    }

    /// 默认开始日期: 本周周一（周日取上周周一）
    pub fn default_start_date(today: NaiveDate) -> NaiveDate {
        week_start_for(today)
    }

    /// 默认结束日期: 本周周六（周日取上周周六）
    pub fn default_end_date(today: NaiveDate) -> NaiveDate {
        week_end_for(today)
    }

    /// 提交为日期区间
    ///
    /// 只校验必填，不校验先后顺序
    pub fn to_date_range(&self) -> ReportResult<DateRange> {
        let start_date = self
            .start_date
            .ok_or_else(|| ReportError::RequiredField(START_DATE_FIELD.to_string()))?;
        let end_date = self
            .end_date
            .ok_or_else(|| ReportError::RequiredField(END_DATE_FIELD.to_string()))?;
        Ok(DateRange::new(start_date, end_date))
    }
}
