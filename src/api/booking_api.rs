// ==========================================
// 航空订座系统 - 订座协调 API (Booking Coordinator)
// ==========================================
// 流程:
// 1. 护照号 → 乘客
// 2. 航班号 → 航线
// 3. 余座检查
// 4. 重复订座检查 (航班, 乘客, 出发日期)
// 5. 生成唯一订座编号（查重 + 重试）
// 6. 单条 INSERT 提交
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;
use tracing::instrument;

use crate::api::availability_api::AvailabilityApi;
use crate::api::error::{ApiError, ApiResult};
use crate::api::route_api::not_found_flight;
use crate::api::validator::validate_passport_number;
use crate::config::BookingConfig;
use crate::domain::booking::{Booking, BookingReference};
use crate::engine::reference::{RandomReferenceGenerator, ReferenceGenerator};
use crate::perf::PerfGuard;
use crate::repository::booking_repo::BookingRepository;
use crate::repository::passenger_repo::PassengerRepository;
use crate::repository::route_repo::RouteRepository;

/// 订座协调API
pub struct BookingApi {
    passenger_repo: Arc<PassengerRepository>,
    route_repo: Arc<RouteRepository>,
    booking_repo: Arc<BookingRepository>,
    availability_api: Arc<AvailabilityApi>,
    reference_generator: Arc<dyn ReferenceGenerator>,
    config: BookingConfig,
}

impl BookingApi {
    pub fn new(
        passenger_repo: Arc<PassengerRepository>,
        route_repo: Arc<RouteRepository>,
        booking_repo: Arc<BookingRepository>,
        availability_api: Arc<AvailabilityApi>,
        config: BookingConfig,
    ) -> Self {
        Self {
            passenger_repo,
            route_repo,
            booking_repo,
            availability_api,
            reference_generator: Arc::new(RandomReferenceGenerator),
            config,
        }
    }

    /// 替换订座编号生成器
    pub fn with_reference_generator(mut self, generator: Arc<dyn ReferenceGenerator>) -> Self {
        self.reference_generator = generator;
        self
    }

    /// 为已注册乘客订座
    ///
    /// # 返回
    /// - Ok(BookingReference): 新分配的 10 位订座编号
    /// - Err(ValidationError): 护照号格式错误
    /// - Err(NotFound): 乘客或航班不存在
    /// - Err(CapacityExhausted): 当日已有订座且余座 <= 0
    /// - Err(DuplicateBooking): 同一乘客同一航班同一日期已订
    #[instrument(skip_all, fields(passport_number = %passport_number, flight_number = %flight_number, departure = %departure_date))]
    pub fn book_flight(
        &self,
        passport_number: &str,
        flight_number: &str,
        departure_date: NaiveDate,
    ) -> ApiResult<BookingReference> {
        let _perf = PerfGuard::new("book_flight");

        validate_passport_number(passport_number)?;
        let passenger_id = self
            .passenger_repo
            .find_id_by_passport(passport_number)?
            .ok_or_else(|| ApiError::NotFound(format!("护照号{}未注册", passport_number)))?;

        let route = self
            .route_repo
            .find_by_flight_number(flight_number)?
            .ok_or_else(|| not_found_flight(flight_number))?;

        let ledger = self.availability_api.seat_ledger(&route, departure_date)?;
        if !ledger.is_bookable() {
            return Err(ApiError::CapacityExhausted {
                flight_number: flight_number.to_string(),
                departure: departure_date,
                remaining: ledger.remaining(),
            });
        }

        if self
            .booking_repo
            .exists_for(flight_number, passenger_id, departure_date)?
        {
            return Err(duplicate_booking(flight_number, passenger_id, departure_date));
        }

        let max_attempts = self.config.reference_max_attempts;
        for attempt in 1..=max_attempts {
            let reference = self.reference_generator.generate();
            if self.booking_repo.exists_reference(reference.as_str())? {
                tracing::warn!(attempt, reference = %reference, "订座编号已被占用，重新生成");
                continue;
            }

            let booking = Booking {
                booking_reference: reference,
                flight_number: flight_number.to_string(),
                passenger_id,
                departure_date,
            };

            match self.booking_repo.insert(&booking) {
                Ok(()) => {
                    tracing::info!(
                        booking_reference = %booking.booking_reference,
                        passenger_id,
                        remaining_before = ledger.remaining(),
                        "订座成功"
                    );
                    return Ok(booking.booking_reference);
                }
                Err(e) if e.is_unique_violation_on("booking_ref") => {
                    tracing::warn!(attempt, "订座编号写入时冲突，重新生成");
                }
                Err(e) if e.is_unique_violation_on("passenger_id") => {
                    tracing::warn!(passenger_id, "重复订座在查重后被并发写入");
                    return Err(duplicate_booking(flight_number, passenger_id, departure_date));
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ApiError::InternalError(format!(
            "{}次尝试后仍未生成唯一订座编号",
            max_attempts
        )))
    }

    /// 按编号查询订座
    pub fn find_booking(&self, reference: &str) -> ApiResult<Booking> {
        self.booking_repo
            .find_by_reference(reference)?
            .ok_or_else(|| ApiError::NotFound(format!("订座编号{}不存在", reference)))
    }

    /// 乘客的全部订座
    pub fn list_bookings(&self, passport_number: &str) -> ApiResult<Vec<Booking>> {
        validate_passport_number(passport_number)?;
        let passenger_id = self
            .passenger_repo
            .find_id_by_passport(passport_number)?
            .ok_or_else(|| ApiError::NotFound(format!("护照号{}未注册", passport_number)))?;
        Ok(self.booking_repo.list_by_passenger(passenger_id)?)
    }
}

fn duplicate_booking(flight_number: &str, passenger_id: i64, departure: NaiveDate) -> ApiError {
    ApiError::DuplicateBooking {
        flight_number: flight_number.to_string(),
        passenger_id,
        departure,
    }
}
