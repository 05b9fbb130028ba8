// ==========================================
// 航空订座系统 - 乘客数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::passenger::{NewPassenger, Passenger};
use crate::repository::error::RepositoryResult;
use crate::repository::store::DataStore;
use rusqlite::{params, Row};

const PASSENGER_COLUMNS: &str = "passenger_id, passport_number, full_name, birth_date, country";

fn map_passenger(row: &Row<'_>) -> rusqlite::Result<Passenger> {
    Ok(Passenger {
        passenger_id: row.get(0)?,
        passport_number: row.get(1)?,
        full_name: row.get(2)?,
        birth_date: row.get(3)?,
        country: row.get(4)?,
    })
}

/// 乘客仓储
/// 职责: 管理 passenger 表的读写
pub struct PassengerRepository {
    store: DataStore,
}

impl PassengerRepository {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// 插入乘客，passenger_id 由存储层分配
    ///
    /// # 返回
    /// - Ok(Passenger): 带新 ID 的乘客
    /// - Err(UniqueConstraintViolation): 护照号已存在
    pub fn insert(&self, passenger: &NewPassenger) -> RepositoryResult<Passenger> {
        let passenger_id = self.store.insert_returning_id(
            r#"
            INSERT INTO passenger (passport_number, full_name, birth_date, country)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                passenger.passport_number,
                passenger.full_name,
                passenger.birth_date,
                passenger.country,
            ],
        )?;
        Ok(passenger.clone().with_id(passenger_id))
    }

    /// 按护照号查询
    pub fn find_by_passport(&self, passport_number: &str) -> RepositoryResult<Option<Passenger>> {
        self.store.query_optional(
            &format!(
                "SELECT {} FROM passenger WHERE passport_number = ?1",
                PASSENGER_COLUMNS
            ),
            params![passport_number],
            map_passenger,
        )
    }

    /// 按主键查询
    pub fn find_by_id(&self, passenger_id: i64) -> RepositoryResult<Option<Passenger>> {
        self.store.query_optional(
            &format!(
                "SELECT {} FROM passenger WHERE passenger_id = ?1",
                PASSENGER_COLUMNS
            ),
            params![passenger_id],
            map_passenger,
        )
    }

    /// 护照号 → passenger_id
    pub fn find_id_by_passport(&self, passport_number: &str) -> RepositoryResult<Option<i64>> {
        self.store.query_optional(
            "SELECT passenger_id FROM passenger WHERE passport_number = ?1",
            params![passport_number],
            |row| row.get(0),
        )
    }

    pub fn exists_passport(&self, passport_number: &str) -> RepositoryResult<bool> {
        let found = self.store.query_scalar(
            "SELECT EXISTS(SELECT 1 FROM passenger WHERE passport_number = ?1)",
            params![passport_number],
        )?;
        Ok(found != 0)
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        self.store.query_scalar("SELECT COUNT(*) FROM passenger", [])
    }
}
