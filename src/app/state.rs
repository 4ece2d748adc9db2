// ==========================================
// 生产单报表 - 应用状态
// ==========================================
// 职责: 管理共享连接、仓储、配置，并装配报表服务
// ==========================================

use std::sync::{Arc, Mutex};
use rusqlite::Connection;

use crate::config::config_manager::ConfigManager;
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::domain::company::SessionContext;
use crate::engine::lookup::{ProductionLookup, SessionCompany};
use crate::importer::ProductionImporter;
use crate::report::{
    BrandedRenderer, PdfRenderer, ProductionReport, ProductionsReport, ReportResult,
    ReportService, WkhtmltopdfRenderer,
};
use crate::repository::{CompanyRepository, ProductionRepository, RepositoryResult};

/// 环境变量: 数据库路径
pub const DB_PATH_ENV: &str = "PRODUCTION_REPORT_DB_PATH";

/// 应用状态
///
/// 包含共享连接、仓储与配置
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 配置管理器
    pub config: Arc<ConfigManager>,

    /// 生产单仓储
    pub production_repo: Arc<ProductionRepository>,

    /// 公司仓储
    pub company_repo: Arc<CompanyRepository>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开共享连接并建表（幂等）
    /// 2. 初始化所有Repository
    /// 3. 初始化配置管理器
    pub fn new(db_path: String) -> RepositoryResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let conn = open_sqlite_connection(&db_path)?;
        Self::from_connection(db_path, conn)
    }

    /// 从已打开的连接创建（测试可传入内存库）
    pub fn from_connection(db_path: String, conn: Connection) -> RepositoryResult<Self> {
        init_schema(&conn)?;
        match read_schema_version(&conn)? {
            Some(v) if v == CURRENT_SCHEMA_VERSION => {}
            other => tracing::warn!(
                "schema_version 与预期不一致: expected={}, actual={:?}",
                CURRENT_SCHEMA_VERSION,
                other
            ),
        }

        let conn = Arc::new(Mutex::new(conn));

        let config = Arc::new(ConfigManager::from_connection(conn.clone())?);
        let production_repo = Arc::new(ProductionRepository::from_connection(conn.clone()));
        let company_repo = Arc::new(CompanyRepository::from_connection(conn));

        tracing::info!("AppState初始化完成");
        Ok(Self {
            db_path,
            config,
            production_repo,
            company_repo,
        })
    }

    /// 按配置切换界面语言
    pub fn apply_locale(&self) -> RepositoryResult<String> {
        let locale = self.config.locale()?;
        crate::i18n::set_locale(&locale);
        Ok(locale)
    }

    /// 会话上下文；`company_override` 优先于配置
    pub fn session_context(&self, company_override: Option<i64>) -> RepositoryResult<SessionContext> {
        match company_override {
            Some(company_id) => Ok(SessionContext::with_company(company_id)),
            None => self.config.session_context(),
        }
    }

    /// 装配报表服务（wkhtmltopdf 渲染）
    pub fn report_service(&self, context: SessionContext) -> ReportResult<ReportService> {
        let binary = self.config.wkhtmltopdf_bin()?;
        self.report_service_with_renderer(WkhtmltopdfRenderer::new(binary), context)
    }

    /// 装配报表服务（指定底层渲染器）
    pub fn report_service_with_renderer<R>(
        &self,
        renderer: R,
        context: SessionContext,
    ) -> ReportResult<ReportService>
    where
        R: PdfRenderer + 'static,
    {
        let company = SessionCompany::new(context, self.company_repo.clone());
        let branded = BrandedRenderer::new(renderer, company);

        let lookup: Arc<dyn ProductionLookup> = self.production_repo.clone();
        let excluded_states = self.config.excluded_states()?;

        let mut service = ReportService::new(Box::new(branded));
        service.register(Box::new(ProductionsReport::new(lookup.clone(), excluded_states)));
        service.register(Box::new(ProductionReport::new(lookup)));
        Ok(service)
    }

    /// 生产单导入器
    pub fn importer(&self) -> ProductionImporter {
        ProductionImporter::new(self.production_repo.clone())
    }
}

// ==========================================
// 默认路径
// ==========================================

/// 获取默认数据库路径
///
/// # 返回
/// - 环境变量 PRODUCTION_REPORT_DB_PATH（若设置）
/// - 用户数据目录/production-report/production_report.db
/// - 回退: ./production_report.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(DB_PATH_ENV) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./production_report.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("production-report");
        // 目录创建失败时回退到当前目录
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join("production_report.db");
        }
    }

    path.to_string_lossy().to_string()
}
