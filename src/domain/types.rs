// ==========================================
// 生产单报表 - 领域类型定义
// ==========================================
// 生产单生命周期状态，存储格式为小写字符串
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 生产单状态 (Production State)
// ==========================================
// 顺序即生命周期: request → draft → waiting → assigned → running → done
// cancel 为终止分支
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProductionState {
    Request,  // 生产请求
    Draft,    // 草稿
    Waiting,  // 等待物料
    Assigned, // 已分配
    Running,  // 生产中
    Done,     // 完工
    Cancel,   // 已取消
}

impl fmt::Display for ProductionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl ProductionState {
    /// 全部状态（按生命周期顺序）
    pub const ALL: [ProductionState; 7] = [
        ProductionState::Request,
        ProductionState::Draft,
        ProductionState::Waiting,
        ProductionState::Assigned,
        ProductionState::Running,
        ProductionState::Done,
        ProductionState::Cancel,
    ];

    /// 报表默认排除的状态
    pub const REPORT_EXCLUDED: [ProductionState; 2] =
        [ProductionState::Request, ProductionState::Cancel];

    /// 从字符串解析状态
    ///
    /// 未知字符串返回 None，由调用方决定是否拒绝
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "request" => Some(ProductionState::Request),
            "draft" => Some(ProductionState::Draft),
            "waiting" => Some(ProductionState::Waiting),
            "assigned" => Some(ProductionState::Assigned),
            "running" => Some(ProductionState::Running),
            "done" => Some(ProductionState::Done),
            "cancel" => Some(ProductionState::Cancel),
            _ => None,
        }
    }

    /// 转换为数据库存储的字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            ProductionState::Request => "request",
            ProductionState::Draft => "draft",
            ProductionState::Waiting => "waiting",
            ProductionState::Assigned => "assigned",
            ProductionState::Running => "running",
            ProductionState::Done => "done",
            ProductionState::Cancel => "cancel",
        }
    }
}
