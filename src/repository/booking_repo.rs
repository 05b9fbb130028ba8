// ==========================================
// 航空订座系统 - 订座数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::booking::{Booking, BookingReference};
use crate::repository::error::RepositoryResult;
use crate::repository::store::DataStore;
use chrono::NaiveDate;
use rusqlite::types::Type;
use rusqlite::{params, Row};

fn map_booking(row: &Row<'_>) -> rusqlite::Result<Booking> {
    let raw: String = row.get(0)?;
    let booking_reference = BookingReference::parse(&raw).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            0,
            Type::Text,
            format!("非法订座编号: {}", raw).into(),
        )
    })?;

    Ok(Booking {
        booking_reference,
        flight_number: row.get(1)?,
        passenger_id: row.get(2)?,
        departure_date: row.get(3)?,
    })
}

/// 订座仓储
/// 职责: 管理 booking 表的读写与计数
pub struct BookingRepository {
    store: DataStore,
}

impl BookingRepository {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// 单条 INSERT 写入订座
    ///
    /// # 返回
    /// - Err(UniqueConstraintViolation): 编号冲突或重复订座（由约束列区分）
    pub fn insert(&self, booking: &Booking) -> RepositoryResult<()> {
        self.store.execute(
            r#"
            INSERT INTO booking (booking_ref, flight_number, passenger_id, departure_date)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                booking.booking_reference.as_str(),
                booking.flight_number,
                booking.passenger_id,
                booking.departure_date,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_reference(&self, reference: &str) -> RepositoryResult<Option<Booking>> {
        self.store.query_optional(
            r#"
            SELECT booking_ref, flight_number, passenger_id, departure_date
            FROM booking
            WHERE booking_ref = ?1
            "#,
            params![reference],
            map_booking,
        )
    }

    pub fn exists_reference(&self, reference: &str) -> RepositoryResult<bool> {
        let found = self.store.query_scalar(
            "SELECT EXISTS(SELECT 1 FROM booking WHERE booking_ref = ?1)",
            params![reference],
        )?;
        Ok(found != 0)
    }

    /// (航班, 乘客, 出发日期) 是否已有订座
    pub fn exists_for(
        &self,
        flight_number: &str,
        passenger_id: i64,
        departure_date: NaiveDate,
    ) -> RepositoryResult<bool> {
        let found = self.store.query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM booking
                WHERE flight_number = ?1 AND passenger_id = ?2 AND departure_date = ?3
            )
            "#,
            params![flight_number, passenger_id, departure_date],
        )?;
        Ok(found != 0)
    }

    /// 乘客是否订过该航班（任意日期）
    pub fn passenger_has_flight(
        &self,
        passenger_id: i64,
        flight_number: &str,
    ) -> RepositoryResult<bool> {
        let found = self.store.query_scalar(
            "SELECT EXISTS(SELECT 1 FROM booking WHERE passenger_id = ?1 AND flight_number = ?2)",
            params![passenger_id, flight_number],
        )?;
        Ok(found != 0)
    }

    /// 航班某日已订座数
    pub fn count_for_departure(
        &self,
        flight_number: &str,
        departure_date: NaiveDate,
    ) -> RepositoryResult<i64> {
        self.store.query_scalar(
            "SELECT COUNT(*) FROM booking WHERE flight_number = ?1 AND departure_date = ?2",
            params![flight_number, departure_date],
        )
    }

    pub fn list_by_passenger(&self, passenger_id: i64) -> RepositoryResult<Vec<Booking>> {
        self.store.query(
            r#"
            SELECT booking_ref, flight_number, passenger_id, departure_date
            FROM booking
            WHERE passenger_id = ?1
            ORDER BY departure_date ASC, flight_number ASC
            "#,
            params![passenger_id],
            map_booking,
        )
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        self.store.query_scalar("SELECT COUNT(*) FROM booking", [])
    }
}
