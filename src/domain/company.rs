// ==========================================
// 生产单报表 - 公司与会话上下文
// ==========================================

use serde::{Deserialize, Serialize};

/// 公司（页脚左侧显示其 party 名称）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub id: i64,
    pub party_name: String,
}

/// 会话上下文
///
/// 对应宿主平台事务上下文中的 `company` 键，未设置时为 None
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub company: Option<i64>,
}

impl SessionContext {
    pub fn with_company(company_id: i64) -> Self {
        Self {
            company: Some(company_id),
        }
    }
}
