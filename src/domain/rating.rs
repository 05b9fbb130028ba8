// ==========================================
// 航空订座系统 - 评分实体
// ==========================================

use serde::{Deserialize, Serialize};

/// 评分（ratings 表）
///
/// (passenger_id, flight_number) 唯一；创建后不修改。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rating {
    pub rating_id: i64,
    pub passenger_id: i64,
    pub flight_number: String,
    /// 0..=5
    pub score: i32,
    pub comment: Option<String>,
}

/// 待写入评分（rating_id 由存储层分配）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRating {
    pub passenger_id: i64,
    pub flight_number: String,
    pub score: i32,
    pub comment: Option<String>,
}

/// 高分航线（按平均分排序的查询结果）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatedRoute {
    pub airline_name: String,
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub plane: String,
    pub average_score: f64,
    pub rating_count: i64,
}
