// ==========================================
// 生产单报表 - 生产单数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化
// ==========================================

use crate::domain::production::{NewProduction, ProductionRecord};
use crate::domain::types::ProductionState;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDate;
use rusqlite::types::{Type, Value};
use rusqlite::{params, params_from_iter, Connection, Result as SqliteResult, Row};
use std::sync::{Arc, Mutex};

const SELECT_COLUMNS: &str = r#"
    SELECT id, number, product, quantity, uom, planned_date, state, reference, warehouse
    FROM production
"#;

// ==========================================
// ProductionRepository - 生产单仓储
// ==========================================
/// 生产单仓储
/// 职责: 管理 production 表的写入与查询
pub struct ProductionRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ProductionRepository {
    /// 创建新的 ProductionRepository 实例
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = crate::db::open_sqlite_connection(db_path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建仓储实例
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 写入单条生产单，返回新主键
    pub fn insert(&self, production: &NewProduction) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        insert_row(&conn, production)?;
        Ok(conn.last_insert_rowid())
    }

    /// 批量写入（单事务），返回写入条数
    pub fn insert_batch(&self, productions: &[NewProduction]) -> RepositoryResult<usize> {
        let mut conn = self.get_conn()?;
        let tx = conn
            .transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        for production in productions {
            insert_row(&tx, production)?;
        }

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(productions.len())
    }

    /// 按主键查询
    ///
    /// # 返回
    /// - Ok(Some(ProductionRecord)): 找到生产单
    /// - Ok(None): 未找到
    /// - Err: 数据库错误
    pub fn find_by_id(&self, id: i64) -> RepositoryResult<Option<ProductionRecord>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(&format!("{} WHERE id = ?1", SELECT_COLUMNS))?;

        match stmt.query_row(params![id], map_production_row) {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// 按主键列表查询，保持入参顺序；任一主键不存在即报错
    pub fn find_by_ids(&self, ids: &[i64]) -> RepositoryResult<Vec<ProductionRecord>> {
        ids.iter()
            .map(|id| {
                self.find_by_id(*id)?.ok_or_else(|| RepositoryError::NotFound {
                    entity: "production".to_string(),
                    id: id.to_string(),
                })
            })
            .collect()
    }

    /// 查询计划日期落在 [start_date, end_date] 且状态不在排除集合中的生产单
    ///
    /// 结果按 planned_date, id 升序
    pub fn search_by_planned_date(
        &self,
        start_date: NaiveDate,
        end_date: NaiveDate,
        excluded_states: &[ProductionState],
    ) -> RepositoryResult<Vec<ProductionRecord>> {
        let conn = self.get_conn()?;

        let mut sql = format!(
            "{} WHERE planned_date >= ?1 AND planned_date <= ?2",
            SELECT_COLUMNS
        );
        let mut values: Vec<Value> = vec![
            Value::Text(start_date.to_string()),
            Value::Text(end_date.to_string()),
        ];

        if !excluded_states.is_empty() {
            let placeholders: Vec<String> = (0..excluded_states.len())
                .map(|i| format!("?{}", i + 3))
                .collect();
            sql.push_str(&format!(" AND state NOT IN ({})", placeholders.join(", ")));
            values.extend(
                excluded_states
                    .iter()
                    .map(|s| Value::Text(s.to_db_str().to_string())),
            );
        }
        sql.push_str(" ORDER BY planned_date ASC, id ASC");

        tracing::debug!(
            start_date = %start_date,
            end_date = %end_date,
            excluded = excluded_states.len(),
            "查询生产单"
        );

        let mut stmt = conn.prepare(&sql)?;
        let records = stmt
            .query_map(params_from_iter(values), map_production_row)?
            .collect::<SqliteResult<Vec<_>>>()?;

        Ok(records)
    }

    /// 生产单总数
    pub fn count(&self) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        let n = conn.query_row("SELECT COUNT(*) FROM production", [], |row| row.get(0))?;
        Ok(n)
    }
}

fn insert_row(conn: &Connection, production: &NewProduction) -> RepositoryResult<()> {
    conn.execute(
        r#"
        INSERT INTO production (
            number, product, quantity, uom, planned_date, state, reference, warehouse
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
        params![
            production.number,
            production.product,
            production.quantity,
            production.uom,
            production.planned_date.to_string(),
            production.state.to_db_str(),
            production.reference,
            production.warehouse,
        ],
    )?;
    Ok(())
}

fn map_production_row(row: &Row<'_>) -> SqliteResult<ProductionRecord> {
    let state_raw: String = row.get(6)?;
    let state = ProductionState::from_str(&state_raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            6,
            Type::Text,
            format!("未知的生产单状态: {}", state_raw).into(),
        )
    })?;

    Ok(ProductionRecord {
        id: row.get(0)?,
        number: row.get(1)?,
        product: row.get(2)?,
        quantity: row.get(3)?,
        uom: row.get(4)?,
        planned_date: row.get(5)?,
        state,
        reference: row.get(7)?,
        warehouse: row.get(8)?,
    })
}
