// ==========================================
// 生产单报表 - 公司数据仓储
// ==========================================

use crate::domain::company::Company;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection};
use std::sync::{Arc, Mutex};

/// 公司仓储
/// 职责: 管理 company 表
pub struct CompanyRepository {
    conn: Arc<Mutex<Connection>>,
}

impl CompanyRepository {
    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 新建公司，返回主键
    pub fn create(&self, party_name: &str) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(
            "INSERT INTO company (party_name) VALUES (?1)",
            params![party_name],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// 按主键查询
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Company>> {
        let conn = self.get_conn()?;
        let result = conn.query_row(
            "SELECT id, party_name FROM company WHERE id = ?1",
            params![id],
            |row| {
                Ok(Company {
                    id: row.get(0)?,
                    party_name: row.get(1)?,
                })
            },
        );

        match result {
            Ok(company) => Ok(Some(company)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}
