// ==========================================
// 航空订座系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 航线可修改属性 (Route Attribute)
// ==========================================
// flight_number / airline_id 为主数据，不可修改
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RouteAttribute {
    Origin,
    Destination,
    Plane,
    SeatCapacity,
    DurationMinutes,
}

impl RouteAttribute {
    pub const ALL: [RouteAttribute; 5] = [
        RouteAttribute::Origin,
        RouteAttribute::Destination,
        RouteAttribute::Plane,
        RouteAttribute::SeatCapacity,
        RouteAttribute::DurationMinutes,
    ];

    /// 从外部输入解析属性名（大小写不敏感，兼容 seats / duration 简写）
    pub fn parse(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "origin" => Some(RouteAttribute::Origin),
            "destination" => Some(RouteAttribute::Destination),
            "plane" => Some(RouteAttribute::Plane),
            "seatcapacity" | "seat_capacity" | "seats" => Some(RouteAttribute::SeatCapacity),
            "durationminutes" | "duration_minutes" | "duration" => {
                Some(RouteAttribute::DurationMinutes)
            }
            _ => None,
        }
    }

    /// 对应 flight 表的列名
    pub fn column(&self) -> &'static str {
        match self {
            RouteAttribute::Origin => "origin",
            RouteAttribute::Destination => "destination",
            RouteAttribute::Plane => "plane",
            RouteAttribute::SeatCapacity => "seat_capacity",
            RouteAttribute::DurationMinutes => "duration_minutes",
        }
    }

    /// 该属性是否为整数列
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            RouteAttribute::SeatCapacity | RouteAttribute::DurationMinutes
        )
    }
}

impl fmt::Display for RouteAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteAttribute::Origin => write!(f, "origin"),
            RouteAttribute::Destination => write!(f, "destination"),
            RouteAttribute::Plane => write!(f, "plane"),
            RouteAttribute::SeatCapacity => write!(f, "seatCapacity"),
            RouteAttribute::DurationMinutes => write!(f, "durationMinutes"),
        }
    }
}
