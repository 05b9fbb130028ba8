// ==========================================
// 航空订座系统 - 输入校验
// ==========================================
// 职责: 纯函数校验，返回类型化结果
// 约束: 不访问存储；“重新输入”循环属于调用方
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::route::{Route, RouteUpdate};
use crate::domain::types::RouteAttribute;

/// 护照号长度
pub const PASSPORT_NUMBER_LEN: usize = 10;

/// 评分取值范围
pub const MIN_SCORE: i32 = 0;
pub const MAX_SCORE: i32 = 5;

/// 护照号必须恰好 10 个字符
pub fn validate_passport_number(passport_number: &str) -> ApiResult<()> {
    let len = passport_number.chars().count();
    if len != PASSPORT_NUMBER_LEN {
        return Err(ApiError::ValidationError(format!(
            "护照号必须为{}个字符，实际{}个: {:?}",
            PASSPORT_NUMBER_LEN, len, passport_number
        )));
    }
    Ok(())
}

/// 必填文本字段
pub fn validate_required(field: &str, value: &str) -> ApiResult<()> {
    if value.trim().is_empty() {
        return Err(ApiError::ValidationError(format!("{}不能为空", field)));
    }
    Ok(())
}

/// 正整数字段（座位数、时长）
pub fn validate_positive(field: &str, value: i64) -> ApiResult<()> {
    if value <= 0 {
        return Err(ApiError::ValidationError(format!(
            "{}必须为正整数，实际: {}",
            field, value
        )));
    }
    Ok(())
}

/// 评分必须在 0..=5
pub fn validate_score(score: i32) -> ApiResult<()> {
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(ApiError::ValidationError(format!(
            "评分必须在{}-{}之间，实际: {}",
            MIN_SCORE, MAX_SCORE, score
        )));
    }
    Ok(())
}

/// 新航线字段校验
pub fn validate_new_route(route: &Route) -> ApiResult<()> {
    validate_required("航班号", &route.flight_number)?;
    validate_required("出发地", &route.origin)?;
    validate_required("目的地", &route.destination)?;
    validate_required("机型", &route.plane)?;
    validate_positive("座位数", route.seat_capacity as i64)?;
    validate_positive("飞行时长", route.duration_minutes as i64)?;
    Ok(())
}

/// 解析可修改的航线属性名
pub fn parse_route_attribute(name: &str) -> ApiResult<RouteAttribute> {
    RouteAttribute::parse(name).ok_or_else(|| {
        let allowed: Vec<String> = RouteAttribute::ALL.iter().map(|a| a.to_string()).collect();
        ApiError::ValidationError(format!(
            "不支持修改的属性: {:?}，可选: {}",
            name,
            allowed.join(", ")
        ))
    })
}

/// 按属性类型解析新值
pub fn parse_route_update(attribute: RouteAttribute, raw: &str) -> ApiResult<RouteUpdate> {
    if attribute.is_numeric() {
        let value: i32 = raw.trim().parse().map_err(|_| {
            ApiError::ValidationError(format!("{}必须为整数，实际: {:?}", attribute, raw))
        })?;
        validate_positive(&attribute.to_string(), value as i64)?;
        return Ok(match attribute {
            RouteAttribute::SeatCapacity => RouteUpdate::SeatCapacity(value),
            _ => RouteUpdate::DurationMinutes(value),
        });
    }

    validate_required(&attribute.to_string(), raw)?;
    let text = raw.trim().to_string();
    Ok(match attribute {
        RouteAttribute::Origin => RouteUpdate::Origin(text),
        RouteAttribute::Destination => RouteUpdate::Destination(text),
        _ => RouteUpdate::Plane(text),
    })
}

/// 校验已构造的更新值
pub fn validate_route_update(update: &RouteUpdate) -> ApiResult<()> {
    match update {
        RouteUpdate::Origin(v) => validate_required("出发地", v),
        RouteUpdate::Destination(v) => validate_required("目的地", v),
        RouteUpdate::Plane(v) => validate_required("机型", v),
        RouteUpdate::SeatCapacity(n) => validate_positive("座位数", *n as i64),
        RouteUpdate::DurationMinutes(n) => validate_positive("飞行时长", *n as i64),
    }
}

/// 评论归一化：None 与“无评论”占位符（整体精确匹配）视为没有评论，
/// 其余输入（包括空串、首尾空白）按原样保存
pub fn normalize_comment(comment: Option<&str>, no_comment_sentinel: &str) -> Option<String> {
    match comment {
        Some(text) if text != no_comment_sentinel => Some(text.to_string()),
        _ => None,
    }
}
