// ==========================================
// 航空订座系统 - 数据存储能力 (Data Store)
// ==========================================
// 职责: 对外只提供两种能力
// - execute: 执行写语句，返回影响行数
// - query:   执行查询，按行映射返回有序结果
// 约束: 所有语句参数化，禁止拼接用户输入
// ==========================================

use crate::db::{configure_sqlite_connection, init_schema, open_sqlite_connection};
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{Connection, OptionalExtension, Params, Row};
use std::sync::{Arc, Mutex, MutexGuard};

/// 共享 SQLite 连接上的数据存储
///
/// 所有仓储共享同一连接（单会话、单写者）。
#[derive(Clone)]
pub struct DataStore {
    conn: Arc<Mutex<Connection>>,
}

impl DataStore {
    /// 从已有连接创建
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 打开数据库文件，应用统一 PRAGMA 并建表
    pub fn open(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        init_schema(&conn)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// 内存数据库（单元测试用）
    pub fn open_in_memory() -> RepositoryResult<Self> {
        let conn = Connection::open_in_memory()
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;
        configure_sqlite_connection(&conn)?;
        init_schema(&conn)?;
        Ok(Self::new(Arc::new(Mutex::new(conn))))
    }

    /// 底层共享连接
    pub fn connection(&self) -> Arc<Mutex<Connection>> {
        self.conn.clone()
    }

    fn get_conn(&self) -> RepositoryResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 执行写语句，返回影响行数
    pub fn execute<P: Params>(&self, sql: &str, params: P) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        Ok(conn.execute(sql, params)?)
    }

    /// 执行 INSERT 并返回新行的 rowid（同一把锁内读取，避免被其他写入覆盖）
    pub fn insert_returning_id<P: Params>(&self, sql: &str, params: P) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        conn.execute(sql, params)?;
        Ok(conn.last_insert_rowid())
    }

    /// 执行查询，逐行映射
    pub fn query<T, P, F>(&self, sql: &str, params: P, map_row: F) -> RepositoryResult<Vec<T>>
    where
        P: Params,
        F: FnMut(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare(sql)?;
        let rows = stmt
            .query_map(params, map_row)?
            .collect::<rusqlite::Result<Vec<T>>>()?;
        Ok(rows)
    }

    /// 执行查询，至多取一行
    pub fn query_optional<T, P, F>(
        &self,
        sql: &str,
        params: P,
        map_row: F,
    ) -> RepositoryResult<Option<T>>
    where
        P: Params,
        F: FnOnce(&Row<'_>) -> rusqlite::Result<T>,
    {
        let conn = self.get_conn()?;
        Ok(conn.query_row(sql, params, map_row).optional()?)
    }

    /// 执行 `SELECT COUNT(...)` / `SELECT EXISTS(...)` 一类的单值查询
    pub fn query_scalar<P: Params>(&self, sql: &str, params: P) -> RepositoryResult<i64> {
        let conn = self.get_conn()?;
        Ok(conn.query_row(sql, params, |row| row.get(0))?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::params;

    #[test]
    fn test_execute_and_query() {
        let store = DataStore::open_in_memory().unwrap();

        let affected = store
            .execute(
                "INSERT INTO airline (airline_id, name, country) VALUES (?1, ?2, ?3)",
                params![1, "Oceanic", "AU"],
            )
            .unwrap();
        assert_eq!(affected, 1);

        let names = store
            .query("SELECT name FROM airline ORDER BY airline_id", [], |row| {
                row.get::<_, String>(0)
            })
            .unwrap();
        assert_eq!(names, vec!["Oceanic".to_string()]);

        let missing = store
            .query_optional(
                "SELECT name FROM airline WHERE airline_id = ?1",
                params![99],
                |row| row.get::<_, String>(0),
            )
            .unwrap();
        assert!(missing.is_none());

        assert_eq!(store.query_scalar("SELECT COUNT(*) FROM airline", []).unwrap(), 1);
    }

    #[test]
    fn test_insert_returning_id_starts_at_one() {
        let store = DataStore::open_in_memory().unwrap();
        let id = store
            .insert_returning_id(
                "INSERT INTO airline (name, country) VALUES (?1, ?2)",
                params!["Oceanic", "AU"],
            )
            .unwrap();
        assert_eq!(id, 1);
    }
}
