// ==========================================
// 生产单报表 - 生产单领域模型
// ==========================================
// 报表只读: 仅 planned_date 与 state 参与筛选/分组
// ==========================================

use crate::domain::types::ProductionState;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionRecord - 生产单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionRecord {
    pub id: i64,                    // 主键
    pub number: String,             // 生产单号
    pub product: String,            // 产品名称
    pub quantity: f64,              // 计划数量
    pub uom: String,                // 计量单位
    pub planned_date: NaiveDate,    // 计划日期
    pub state: ProductionState,     // 状态
    pub reference: Option<String>,  // 外部参考号
    pub warehouse: Option<String>,  // 仓库
}

// ==========================================
// NewProduction - 待写入的生产单 (无主键)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduction {
    pub number: String,
    pub product: String,
    pub quantity: f64,
    pub uom: String,
    pub planned_date: NaiveDate,
    pub state: ProductionState,
    pub reference: Option<String>,
    pub warehouse: Option<String>,
}

impl NewProduction {
    /// 绑定主键，得到完整的生产单
    pub fn with_id(self, id: i64) -> ProductionRecord {
        ProductionRecord {
            id,
            number: self.number,
            product: self.product,
            quantity: self.quantity,
            uom: self.uom,
            planned_date: self.planned_date,
            state: self.state,
            reference: self.reference,
            warehouse: self.warehouse,
        }
    }
}
