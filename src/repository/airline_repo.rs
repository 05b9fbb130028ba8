// ==========================================
// 航空订座系统 - 航空公司数据仓储
// ==========================================

use crate::domain::route::Airline;
use crate::repository::error::RepositoryResult;
use crate::repository::store::DataStore;
use rusqlite::params;

/// 航空公司仓储
pub struct AirlineRepository {
    store: DataStore,
}

impl AirlineRepository {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub fn insert(&self, airline: &Airline) -> RepositoryResult<()> {
        self.store.execute(
            "INSERT INTO airline (airline_id, name, country) VALUES (?1, ?2, ?3)",
            params![airline.airline_id, airline.name, airline.country],
        )?;
        Ok(())
    }

    pub fn find_by_id(&self, airline_id: i64) -> RepositoryResult<Option<Airline>> {
        self.store.query_optional(
            "SELECT airline_id, name, country FROM airline WHERE airline_id = ?1",
            params![airline_id],
            |row| {
                Ok(Airline {
                    airline_id: row.get(0)?,
                    name: row.get(1)?,
                    country: row.get(2)?,
                })
            },
        )
    }
}
