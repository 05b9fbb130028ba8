// ==========================================
// 航空订座系统 - 航线与航空公司实体
// ==========================================

use crate::domain::types::RouteAttribute;
use serde::{Deserialize, Serialize};

/// 航空公司（airline 表，员工侧参考数据）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airline {
    pub airline_id: i64,
    pub name: String,
    pub country: Option<String>,
}

/// 航线（flight 表）
///
/// flight_number 为主键；每次更新只修改一个属性。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Route {
    pub flight_number: String,
    pub airline_id: i64,
    pub origin: String,
    pub destination: String,
    pub plane: String,
    /// 座位数（正整数）
    pub seat_capacity: i32,
    /// 飞行时长（分钟，正整数）
    pub duration_minutes: i32,
}

/// 待创建航线
pub type NewRoute = Route;

/// 单属性更新
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RouteUpdate {
    Origin(String),
    Destination(String),
    Plane(String),
    SeatCapacity(i32),
    DurationMinutes(i32),
}

impl RouteUpdate {
    pub fn attribute(&self) -> RouteAttribute {
        match self {
            RouteUpdate::Origin(_) => RouteAttribute::Origin,
            RouteUpdate::Destination(_) => RouteAttribute::Destination,
            RouteUpdate::Plane(_) => RouteAttribute::Plane,
            RouteUpdate::SeatCapacity(_) => RouteAttribute::SeatCapacity,
            RouteUpdate::DurationMinutes(_) => RouteAttribute::DurationMinutes,
        }
    }

    /// 在内存中的航线上应用更新（用于日志与返回值）
    pub fn apply_to(&self, route: &mut Route) {
        match self {
            RouteUpdate::Origin(v) => route.origin = v.clone(),
            RouteUpdate::Destination(v) => route.destination = v.clone(),
            RouteUpdate::Plane(v) => route.plane = v.clone(),
            RouteUpdate::SeatCapacity(v) => route.seat_capacity = *v,
            RouteUpdate::DurationMinutes(v) => route.duration_minutes = *v,
        }
    }
}

/// 带航空公司名称的航线（按时长排序的查询结果）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteWithAirline {
    pub airline_name: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub duration_minutes: i32,
    pub plane: String,
}

/// 热门目的地（按开设航线数量统计）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationPopularity {
    pub destination: String,
    pub route_count: i64,
}
