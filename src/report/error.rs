// ==========================================
// 生产单报表 - 报表层错误类型
// ==========================================
// 职责: 汇总报表执行/向导/渲染过程中的错误
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 报表层错误类型
#[derive(Error, Debug)]
pub enum ReportError {
    // ===== 报表调度错误 =====
    #[error("未注册的报表: {0}")]
    UnknownReport(String),

    #[error("报表数据缺失: {0}")]
    MissingData(String),

    // ===== 向导错误 =====
    #[error("必填字段缺失: {0}")]
    RequiredField(String),

    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    // ===== 渲染错误 =====
    #[error("PDF 渲染失败: {0}")]
    RenderError(String),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    // ===== 数据访问错误 =====
    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type ReportResult<T> = Result<T, ReportError>;
