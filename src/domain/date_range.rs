// ==========================================
// 生产单报表 - 日期区间
// ==========================================
// 报表数据载荷: {"start_date": "YYYY-MM-DD", "end_date": "YYYY-MM-DD"}
// 约定 start_date <= end_date，但不做强制校验（倒置区间得到空日期序列）
// ==========================================

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// 报表日期区间（闭区间）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl DateRange {
    pub fn new(start_date: NaiveDate, end_date: NaiveDate) -> Self {
        Self {
            start_date,
            end_date,
        }
    }

    /// 区间覆盖的天数；倒置区间为 0
    pub fn num_days(&self) -> usize {
        let days = (self.end_date - self.start_date).num_days() + 1;
        days.max(0) as usize
    }

    /// 日期是否落在区间内（含两端）
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn is_inverted(&self) -> bool {
        self.end_date < self.start_date
    }

    /// 以 `today` 所在周计算默认区间（周一 ~ 周六）
    pub fn current_week(today: NaiveDate) -> Self {
        Self::new(week_start_for(today), week_end_for(today))
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ~ {}", self.start_date, self.end_date)
    }
}

// ==========================================
// 周区间默认值
// ==========================================
// 基于公历序数 (0001-01-01 = 1, 周一):
// - ordinal % 7 == 0 为周日，归入上一周，先回退 7 天
// - 周一 = ordinal - ordinal % 7 + 1
// - 周六 = ordinal - ordinal % 7 + 6

fn reference_ordinal(today: NaiveDate) -> i32 {
    let ordinal = today.num_days_from_ce();
    if ordinal.rem_euclid(7) == 0 {
        ordinal - 7
    } else {
        ordinal
    }
}

fn week_day_offset(today: NaiveDate, offset: i32) -> NaiveDate {
    let ordinal = reference_ordinal(today);
    NaiveDate::from_num_days_from_ce_opt(ordinal - ordinal.rem_euclid(7) + offset)
        .unwrap_or(today)
}

/// 本周周一（周日取上周周一）
pub fn week_start_for(today: NaiveDate) -> NaiveDate {
    week_day_offset(today, 1)
}

/// 本周周六（周日取上周周六）
pub fn week_end_for(today: NaiveDate) -> NaiveDate {
    week_day_offset(today, 6)
}
