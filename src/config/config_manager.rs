// ==========================================
// 生产单报表 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写管理
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::domain::company::SessionContext;
use crate::domain::types::ProductionState;
use crate::repository::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 配置作用域
pub const GLOBAL_SCOPE: &str = "global";

/// 环境变量: 覆盖 wkhtmltopdf 可执行文件路径
pub const WKHTMLTOPDF_ENV: &str = "PRODUCTION_REPORT_WKHTMLTOPDF";

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    /// wkhtmltopdf 可执行文件
    pub const WKHTMLTOPDF_BIN: &str = "report.wkhtmltopdf_bin";
    /// 报表排除的生产单状态 (JSON 数组)
    pub const EXCLUDED_STATES: &str = "report.excluded_states";
    /// 当前会话公司 ID
    pub const CONTEXT_COMPANY: &str = "context.company";
    /// 界面语言
    pub const LOCALE: &str = "i18n.locale";
}

/// wkhtmltopdf 默认可执行文件名
pub const DEFAULT_WKHTMLTOPDF_BIN: &str = "wkhtmltopdf";

/// 默认语言
pub const DEFAULT_LOCALE: &str = "en";

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    ///
    /// 说明：为保证连接行为一致，会对传入连接再次应用统一 PRAGMA（幂等）。
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let conn_guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            crate::db::configure_sqlite_connection(&conn_guard)?;
        }

        Ok(Self { conn })
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 读取 global scope 的配置值
    ///
    /// # 返回
    /// - Some(String): 配置值
    /// - None: 配置不存在
    pub fn get_global_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        let conn = self.get_conn()?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_global_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')",
            params![GLOBAL_SCOPE, key, value],
        )?;
        Ok(())
    }

    /// 配置值（带默认值）
    fn get_config_or_default(&self, key: &str, default: &str) -> RepositoryResult<String> {
        Ok(self
            .get_global_config_value(key)?
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| default.to_string()))
    }

    // ===== 报表渲染配置 =====

    /// wkhtmltopdf 可执行文件
    ///
    /// 优先级: 环境变量 > config_kv > 默认值
    pub fn wkhtmltopdf_bin(&self) -> RepositoryResult<String> {
        if let Ok(path) = std::env::var(WKHTMLTOPDF_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_string());
            }
        }
        self.get_config_or_default(config_keys::WKHTMLTOPDF_BIN, DEFAULT_WKHTMLTOPDF_BIN)
    }

    /// 报表排除的生产单状态
    ///
    /// 配置格式为 JSON: ["request", "cancel"]
    /// 未配置时使用默认排除集合；配置了未知状态视为配置错误
    pub fn excluded_states(&self) -> RepositoryResult<Vec<ProductionState>> {
        let Some(raw) = self.get_global_config_value(config_keys::EXCLUDED_STATES)? else {
            return Ok(ProductionState::REPORT_EXCLUDED.to_vec());
        };

        let names: Vec<String> =
            serde_json::from_str(&raw).map_err(|e| RepositoryError::FieldValueError {
                field: config_keys::EXCLUDED_STATES.to_string(),
                message: e.to_string(),
            })?;

        names
            .iter()
            .map(|name| {
                ProductionState::from_str(name).ok_or_else(|| RepositoryError::FieldValueError {
                    field: config_keys::EXCLUDED_STATES.to_string(),
                    message: format!("未知的生产单状态: {}", name),
                })
            })
            .collect()
    }

    // ===== 会话上下文 =====

    /// 会话上下文（当前公司）
    pub fn session_context(&self) -> RepositoryResult<SessionContext> {
        let Some(raw) = self.get_global_config_value(config_keys::CONTEXT_COMPANY)? else {
            return Ok(SessionContext::default());
        };

        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Ok(SessionContext::default());
        }

        let company_id = trimmed
            .parse::<i64>()
            .map_err(|e| RepositoryError::FieldValueError {
                field: config_keys::CONTEXT_COMPANY.to_string(),
                message: e.to_string(),
            })?;
        Ok(SessionContext::with_company(company_id))
    }

    /// 界面语言
    pub fn locale(&self) -> RepositoryResult<String> {
        self.get_config_or_default(config_keys::LOCALE, DEFAULT_LOCALE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_manager() -> ConfigManager {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::init_schema(&conn).unwrap();
        ConfigManager::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    #[test]
    fn test_defaults_when_unset() {
        let config = test_manager();

        assert_eq!(
            config.excluded_states().unwrap(),
            vec![ProductionState::Request, ProductionState::Cancel]
        );
        assert_eq!(config.session_context().unwrap(), SessionContext::default());
        assert_eq!(config.locale().unwrap(), DEFAULT_LOCALE);
    }

    #[test]
    fn test_excluded_states_from_config() {
        let config = test_manager();
        config
            .set_global_config_value(config_keys::EXCLUDED_STATES, r#"["cancel","draft"]"#)
            .unwrap();

        assert_eq!(
            config.excluded_states().unwrap(),
            vec![ProductionState::Cancel, ProductionState::Draft]
        );
    }

    #[test]
    fn test_excluded_states_rejects_unknown() {
        let config = test_manager();
        config
            .set_global_config_value(config_keys::EXCLUDED_STATES, r#"["closed"]"#)
            .unwrap();

        let err = config.excluded_states().unwrap_err();
        assert!(matches!(err, RepositoryError::FieldValueError { .. }));
    }

    #[test]
    fn test_session_context_company() {
        let config = test_manager();
        config
            .set_global_config_value(config_keys::CONTEXT_COMPANY, "3")
            .unwrap();
        assert_eq!(config.session_context().unwrap().company, Some(3));

        config
            .set_global_config_value(config_keys::CONTEXT_COMPANY, "abc")
            .unwrap();
        assert!(config.session_context().is_err());
    }

    #[test]
    fn test_upsert_overwrites() {
        let config = test_manager();
        config.set_global_config_value(config_keys::LOCALE, "en").unwrap();
        config.set_global_config_value(config_keys::LOCALE, "zh-CN").unwrap();
        assert_eq!(config.locale().unwrap(), "zh-CN");
    }
}
