// ==========================================
// 生产单报表 - 按日分组引擎
// ==========================================
// 输入: 生产单列表 + 日期区间
// 输出: 区间内每个自然日 → 当日生产单列表（有序）
// ==========================================
// 约束:
// - 区间内每一天都有键，无记录的日期为空列表
// - 每个键持有独立分配的 Vec，互不共享
// - 区间外的记录不进入任何分组
// ==========================================

use crate::domain::date_range::DateRange;
use crate::domain::production::ProductionRecord;
use chrono::NaiveDate;
use std::collections::BTreeMap;
use tracing::instrument;

/// 按日分组结果
pub type DayBuckets = BTreeMap<NaiveDate, Vec<ProductionRecord>>;

/// 区间内的全部自然日（含两端，升序）；倒置区间返回空
pub fn date_span(start_date: NaiveDate, end_date: NaiveDate) -> Vec<NaiveDate> {
    let days = DateRange::new(start_date, end_date).num_days();
    start_date.iter_days().take(days).collect()
}

/// 按计划日期分组
#[instrument(skip(records), fields(count = records.len()))]
pub fn bucket(
    records: Vec<ProductionRecord>,
    start_date: NaiveDate,
    end_date: NaiveDate,
) -> DayBuckets {
    let mut buckets: DayBuckets = date_span(start_date, end_date)
        .into_iter()
        .map(|date| (date, Vec::new()))
        .collect();

    let mut sorted = records;
    sorted.sort_by_key(|r| r.planned_date);

    for (date, group) in group_by_planned_date(sorted) {
        match buckets.get_mut(&date) {
            Some(slot) => *slot = group,
            None => tracing::debug!(date = %date, dropped = group.len(), "区间外记录已忽略"),
        }
    }

    buckets
}

/// 对已按 planned_date 排序的记录做相邻分组
fn group_by_planned_date(sorted: Vec<ProductionRecord>) -> Vec<(NaiveDate, Vec<ProductionRecord>)> {
    let mut groups: Vec<(NaiveDate, Vec<ProductionRecord>)> = Vec::new();

    for record in sorted {
        if let Some((date, group)) = groups.last_mut() {
            if *date == record.planned_date {
                group.push(record);
                continue;
            }
        }
        groups.push((record.planned_date, vec![record]));
    }

    groups
}
