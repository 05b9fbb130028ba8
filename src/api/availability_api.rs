// ==========================================
// 航空订座系统 - 余座查询 API (Availability Calculator)
// ==========================================
// 职责: 计算航班某日余座；纯查询，无副作用
// 约束: 结果在任何写入提交后即视为过期，调用方不得缓存
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::route_api::not_found_flight;
use crate::domain::booking::SeatAvailability;
use crate::domain::route::Route;
use crate::engine::availability::SeatLedger;
use crate::repository::booking_repo::BookingRepository;
use crate::repository::route_repo::RouteRepository;

/// 余座查询API
pub struct AvailabilityApi {
    route_repo: Arc<RouteRepository>,
    booking_repo: Arc<BookingRepository>,
}

impl AvailabilityApi {
    pub fn new(route_repo: Arc<RouteRepository>, booking_repo: Arc<BookingRepository>) -> Self {
        Self {
            route_repo,
            booking_repo,
        }
    }

    /// 余座 = 座位数 - 该日已订数
    ///
    /// 返回有符号整数；<= 0 由调用方视为不可订。
    pub fn remaining_seats(&self, flight_number: &str, departure_date: NaiveDate) -> ApiResult<i64> {
        let route = self.load_route(flight_number)?;
        Ok(self.seat_ledger(&route, departure_date)?.remaining())
    }

    /// 航班某日的余座报告
    pub fn seat_report(
        &self,
        flight_number: &str,
        departure_date: NaiveDate,
    ) -> ApiResult<SeatAvailability> {
        let route = self.load_route(flight_number)?;
        let ledger = self.seat_ledger(&route, departure_date)?;

        Ok(SeatAvailability {
            flight_number: route.flight_number,
            origin: route.origin,
            destination: route.destination,
            departure_date,
            total_seats: ledger.capacity,
            booked_seats: ledger.booked,
            remaining_seats: ledger.remaining(),
        })
    }

    /// 已解析航线在某日的座位账
    pub fn seat_ledger(&self, route: &Route, departure_date: NaiveDate) -> ApiResult<SeatLedger> {
        let booked = self
            .booking_repo
            .count_for_departure(&route.flight_number, departure_date)?;
        Ok(SeatLedger::new(route.seat_capacity as i64, booked))
    }

    fn load_route(&self, flight_number: &str) -> ApiResult<Route> {
        self.route_repo
            .find_by_flight_number(flight_number)?
            .ok_or_else(|| not_found_flight(flight_number))
    }
}
