// ==========================================
// 生产单报表 - 外部协作者接口
// ==========================================
// 职责: 将记录存储与公司上下文抽象为可注入的 trait
// 默认实现: SQLite 仓储
// ==========================================

use crate::domain::company::SessionContext;
use crate::domain::production::ProductionRecord;
use crate::domain::types::ProductionState;
use crate::repository::{CompanyRepository, ProductionRepository, RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use std::sync::Arc;

/// 生产单查询接口
pub trait ProductionLookup: Send + Sync {
    /// 计划日期落在 [start_date, end_date] 且状态不在 `excluded_states` 中的生产单
    fn search(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        excluded_states: &[ProductionState],
    ) -> RepositoryResult<Vec<ProductionRecord>>;

    /// 按主键列表读取生产单
    fn browse(&self, ids: &[i64]) -> RepositoryResult<Vec<ProductionRecord>>;
}

impl ProductionLookup for ProductionRepository {
    fn search(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        excluded_states: &[ProductionState],
    ) -> RepositoryResult<Vec<ProductionRecord>> {
        self.search_by_planned_date(start_date, end_date, excluded_states)
    }

    fn browse(&self, ids: &[i64]) -> RepositoryResult<Vec<ProductionRecord>> {
        self.find_by_ids(ids)
    }
}

/// 当前公司上下文
pub trait CompanyContext: Send + Sync {
    /// 当前会话所属公司的名称；未设置公司时返回空字符串
    fn company_name(&self) -> RepositoryResult<String>;
}

/// 基于会话上下文 + 公司仓储的公司解析
pub struct SessionCompany {
    context: SessionContext,
    companies: Arc<CompanyRepository>,
}

impl SessionCompany {
    pub fn new(context: SessionContext, companies: Arc<CompanyRepository>) -> Self {
        Self { context, companies }
    }
}

impl CompanyContext for SessionCompany {
    fn company_name(&self) -> RepositoryResult<String> {
        // 0 视同未设置公司
        let Some(company_id) = self.context.company.filter(|id| *id != 0) else {
            return Ok(String::new());
        };

        let company = self
            .companies
            .find_by_id(company_id)?
            .ok_or_else(|| RepositoryError::NotFound {
                entity: "company".to_string(),
                id: company_id.to_string(),
            })?;
        Ok(company.party_name)
    }
}

/// 固定公司名（测试或无数据库场景）
impl CompanyContext for String {
    fn company_name(&self) -> RepositoryResult<String> {
        Ok(self.clone())
    }
}
