// ==========================================
// 航空订座系统 - 航线数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 更新语句的列名只来自 RouteAttribute 枚举
// ==========================================

use crate::domain::route::{DestinationPopularity, Route, RouteUpdate, RouteWithAirline};
use crate::repository::error::RepositoryResult;
use crate::repository::store::DataStore;
use rusqlite::{params, Row};

const ROUTE_COLUMNS: &str =
    "flight_number, airline_id, origin, destination, plane, seat_capacity, duration_minutes";

fn map_route(row: &Row<'_>) -> rusqlite::Result<Route> {
    Ok(Route {
        flight_number: row.get(0)?,
        airline_id: row.get(1)?,
        origin: row.get(2)?,
        destination: row.get(3)?,
        plane: row.get(4)?,
        seat_capacity: row.get(5)?,
        duration_minutes: row.get(6)?,
    })
}

/// 航线仓储
/// 职责: 管理 flight 表的读写与检索
pub struct RouteRepository {
    store: DataStore,
}

impl RouteRepository {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    pub fn insert(&self, route: &Route) -> RepositoryResult<()> {
        self.store.execute(
            r#"
            INSERT INTO flight (
                flight_number, airline_id, origin, destination,
                plane, seat_capacity, duration_minutes
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                route.flight_number,
                route.airline_id,
                route.origin,
                route.destination,
                route.plane,
                route.seat_capacity,
                route.duration_minutes,
            ],
        )?;
        Ok(())
    }

    pub fn find_by_flight_number(&self, flight_number: &str) -> RepositoryResult<Option<Route>> {
        self.store.query_optional(
            &format!(
                "SELECT {} FROM flight WHERE flight_number = ?1",
                ROUTE_COLUMNS
            ),
            params![flight_number],
            map_route,
        )
    }

    pub fn exists(&self, flight_number: &str) -> RepositoryResult<bool> {
        let found = self.store.query_scalar(
            "SELECT EXISTS(SELECT 1 FROM flight WHERE flight_number = ?1)",
            params![flight_number],
        )?;
        Ok(found != 0)
    }

    /// 单列更新
    ///
    /// # 返回
    /// - Ok(usize): 影响行数（航线不存在时为 0）
    pub fn update_attribute(
        &self,
        flight_number: &str,
        update: &RouteUpdate,
    ) -> RepositoryResult<usize> {
        let sql = format!(
            "UPDATE flight SET {} = ?1 WHERE flight_number = ?2",
            update.attribute().column()
        );

        match update {
            RouteUpdate::Origin(text) | RouteUpdate::Destination(text) | RouteUpdate::Plane(text) => {
                self.store.execute(&sql, params![text, flight_number])
            }
            RouteUpdate::SeatCapacity(n) | RouteUpdate::DurationMinutes(n) => {
                self.store.execute(&sql, params![n, flight_number])
            }
        }
    }

    /// 两城市之间的全部航线
    pub fn find_between(&self, origin: &str, destination: &str) -> RepositoryResult<Vec<Route>> {
        self.store.query(
            &format!(
                "SELECT {} FROM flight WHERE origin = ?1 AND destination = ?2 ORDER BY flight_number",
                ROUTE_COLUMNS
            ),
            params![origin, destination],
            map_route,
        )
    }

    /// 两城市之间时长最短的前 limit 条航线（附航空公司名称）
    pub fn list_by_duration(
        &self,
        origin: &str,
        destination: &str,
        limit: usize,
    ) -> RepositoryResult<Vec<RouteWithAirline>> {
        self.store.query(
            r#"
            SELECT a.name, f.flight_number, f.origin, f.destination, f.duration_minutes, f.plane
            FROM flight f
            JOIN airline a ON a.airline_id = f.airline_id
            WHERE f.origin = ?1 AND f.destination = ?2
            ORDER BY f.duration_minutes ASC, f.flight_number ASC
            LIMIT ?3
            "#,
            params![origin, destination, limit as i64],
            |row| {
                Ok(RouteWithAirline {
                    airline_name: row.get(0)?,
                    flight_number: row.get(1)?,
                    origin: row.get(2)?,
                    destination: row.get(3)?,
                    duration_minutes: row.get(4)?,
                    plane: row.get(5)?,
                })
            },
        )
    }

    /// 按开设航线数量排序的目的地
    pub fn popular_destinations(&self, limit: usize) -> RepositoryResult<Vec<DestinationPopularity>> {
        self.store.query(
            r#"
            SELECT destination, COUNT(*) AS choices
            FROM flight
            GROUP BY destination
            ORDER BY choices DESC, destination ASC
            LIMIT ?1
            "#,
            params![limit as i64],
            |row| {
                Ok(DestinationPopularity {
                    destination: row.get(0)?,
                    route_count: row.get(1)?,
                })
            },
        )
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        self.store.query_scalar("SELECT COUNT(*) FROM flight", [])
    }
}
