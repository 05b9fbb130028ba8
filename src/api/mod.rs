// ==========================================
// 航空订座系统 - API 层
// ==========================================
// 职责: 面向调用方的业务操作，每个用户动作对应一次调用
// 约束: 每次成功操作至多一条写语句；失败不产生部分写入
// ==========================================

pub mod availability_api;
pub mod booking_api;
pub mod error;
pub mod passenger_api;
pub mod rating_api;
pub mod route_api;
pub mod validator;

// 重导出
pub use availability_api::AvailabilityApi;
pub use booking_api::BookingApi;
pub use error::{ApiError, ApiResult};
pub use passenger_api::PassengerApi;
pub use rating_api::RatingApi;
pub use route_api::RouteApi;
