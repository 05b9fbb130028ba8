// ==========================================
// 航空订座系统 - 核心库
// ==========================================
// 范围: 订座与库存一致性引擎
// 技术栈: Rust + SQLite
// 不变量: 不重复订座、护照号唯一、评分唯一、余座不为负时才可订、订座编号唯一
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 纯业务规则
pub mod engine;

// 配置层
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// SQL 计数与慢查询
pub mod perf;

// API 层 - 业务接口
pub mod api;

// 应用层 - 组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

pub use domain::{
    Airline, Booking, BookingReference, NewPassenger, Passenger, Rating, Route, RouteAttribute,
    RouteUpdate, SeatAvailability,
};

pub use api::{
    ApiError, ApiResult, AvailabilityApi, BookingApi, PassengerApi, RatingApi, RouteApi,
};

pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "航空订座系统";
