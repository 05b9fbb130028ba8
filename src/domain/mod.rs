// ==========================================
// 航空订座系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含校验规则
// ==========================================

pub mod booking;
pub mod passenger;
pub mod rating;
pub mod route;
pub mod types;

// 重导出核心类型
pub use booking::{Booking, BookingReference, SeatAvailability};
pub use passenger::{NewPassenger, Passenger};
pub use rating::{NewRating, RatedRoute, Rating};
pub use route::{Airline, DestinationPopularity, NewRoute, Route, RouteUpdate, RouteWithAirline};
pub use types::RouteAttribute;
