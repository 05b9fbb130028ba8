// ==========================================
// 航空订座系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod airline_repo;
pub mod booking_repo;
pub mod error;
pub mod passenger_repo;
pub mod rating_repo;
pub mod route_repo;
pub mod store;

// 重导出核心仓储
pub use airline_repo::AirlineRepository;
pub use booking_repo::BookingRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use passenger_repo::PassengerRepository;
pub use rating_repo::RatingRepository;
pub use route_repo::RouteRepository;
pub use store::DataStore;
