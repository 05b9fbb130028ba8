// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 提供API层集成测试的通用环境与数据准备
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use chrono::NaiveDate;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use air_booking::api::{AvailabilityApi, BookingApi};
use air_booking::app::AppState;
use air_booking::config::BookingConfig;
use air_booking::domain::{Airline, BookingReference, Passenger, Route};
use air_booking::engine::ReferenceGenerator;
use air_booking::repository::{BookingRepository, PassengerRepository, RouteRepository};

pub const AIRLINE_ID: i64 = 1;
pub const AIRLINE_NAME: &str = "Oceanic Airlines";

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// 持有组装好的 AppState 与临时数据库文件
pub struct ApiTestEnv {
    pub db_path: String,
    pub state: AppState,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建测试环境（已建表，已写入一家航空公司）
    pub fn new() -> Result<Self, Box<dyn std::error::Error>> {
        let (temp_file, db_path) = test_helpers::create_test_db()?;
        let state = AppState::new(db_path.clone())?;

        state.airline_repo.insert(&Airline {
            airline_id: AIRLINE_ID,
            name: AIRLINE_NAME.to_string(),
            country: Some("AU".to_string()),
        })?;

        Ok(Self {
            db_path,
            state,
            _temp_file: temp_file,
        })
    }

    /// 注册乘客（护照号须为 10 个字符）
    pub fn register(&self, passport_number: &str) -> Passenger {
        self.state
            .passenger_api
            .register_passenger(
                passport_number,
                "Test Passenger",
                NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
                "USA",
            )
            .expect("注册乘客失败")
    }

    /// 创建航线
    pub fn create_route(&self, flight_number: &str, seat_capacity: i32) -> Route {
        self.state
            .route_api
            .create_route(make_route(flight_number, "LAX", "JFK", seat_capacity, 330))
            .expect("创建航线失败")
    }

    /// 订座
    pub fn book(&self, passport_number: &str, flight_number: &str, departure: NaiveDate) -> BookingReference {
        self.state
            .booking_api
            .book_flight(passport_number, flight_number, departure)
            .expect("订座失败")
    }

    /// 表记录数
    pub fn count(&self, table: &str) -> i64 {
        self.state
            .store
            .query_scalar(&format!("SELECT COUNT(*) FROM {}", table), [])
            .expect("计数失败")
    }

    /// 使用指定生成器与配置组装一个独立的 BookingApi（共享同一数据库）
    pub fn booking_api_with(
        &self,
        generator: Arc<dyn ReferenceGenerator>,
        config: BookingConfig,
    ) -> BookingApi {
        let store = self.state.store.clone();
        let route_repo = Arc::new(RouteRepository::new(store.clone()));
        let booking_repo = Arc::new(BookingRepository::new(store.clone()));
        let availability_api = Arc::new(AvailabilityApi::new(route_repo.clone(), booking_repo.clone()));

        BookingApi::new(
            Arc::new(PassengerRepository::new(store)),
            route_repo,
            booking_repo,
            availability_api,
            config,
        )
        .with_reference_generator(generator)
    }
}

// ==========================================
// 测试数据
// ==========================================

pub fn make_route(
    flight_number: &str,
    origin: &str,
    destination: &str,
    seat_capacity: i32,
    duration_minutes: i32,
) -> Route {
    Route {
        flight_number: flight_number.to_string(),
        airline_id: AIRLINE_ID,
        origin: origin.to_string(),
        destination: destination.to_string(),
        plane: "A320".to_string(),
        seat_capacity,
        duration_minutes,
    }
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// 按脚本依次返回编号的生成器（用于模拟编号冲突）
pub struct ScriptedGenerator {
    codes: Mutex<VecDeque<&'static str>>,
    fallback: &'static str,
}

impl ScriptedGenerator {
    pub fn new(codes: &[&'static str], fallback: &'static str) -> Self {
        Self {
            codes: Mutex::new(codes.iter().copied().collect()),
            fallback,
        }
    }
}

impl ReferenceGenerator for ScriptedGenerator {
    fn generate(&self) -> BookingReference {
        let code = self
            .codes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(self.fallback);
        BookingReference::parse(code).expect("脚本编号格式错误")
    }
}
