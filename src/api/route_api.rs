// ==========================================
// 航空订座系统 - 航线目录 API (Route Catalog)
// ==========================================
// 职责: 航线创建、单属性修改、检索与排名
// 约束: 无状态；“是否继续修改”的循环属于调用方
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{
    parse_route_attribute, parse_route_update, validate_new_route, validate_required,
    validate_route_update,
};
use crate::config::BookingConfig;
use crate::domain::route::{DestinationPopularity, NewRoute, Route, RouteUpdate, RouteWithAirline};
use crate::perf::PerfGuard;
use crate::repository::airline_repo::AirlineRepository;
use crate::repository::route_repo::RouteRepository;

/// 航线目录API
///
/// 职责：
/// 1. 创建航线（航班号唯一、座位数/时长为正）
/// 2. 单属性修改
/// 3. 航线检索、按时长排序、热门目的地
pub struct RouteApi {
    route_repo: Arc<RouteRepository>,
    airline_repo: Arc<AirlineRepository>,
    config: BookingConfig,
}

impl RouteApi {
    pub fn new(
        route_repo: Arc<RouteRepository>,
        airline_repo: Arc<AirlineRepository>,
        config: BookingConfig,
    ) -> Self {
        Self {
            route_repo,
            airline_repo,
            config,
        }
    }

    /// 创建航线
    ///
    /// # 返回
    /// - Err(DuplicateKey): 航班号已存在
    /// - Err(ValidationError): 座位数或时长不是正整数 / 文本字段为空
    /// - Err(NotFound): 航空公司不存在
    pub fn create_route(&self, route: NewRoute) -> ApiResult<Route> {
        let _perf = PerfGuard::new("create_route");

        // 文本字段去除首尾空白后再查重、落库（与单属性修改一致）
        let route = trim_route_text(route);
        validate_required("航班号", &route.flight_number)?;
        if self.route_repo.exists(&route.flight_number)? {
            return Err(duplicate_flight(&route.flight_number));
        }
        validate_new_route(&route)?;

        if self.airline_repo.find_by_id(route.airline_id)?.is_none() {
            return Err(ApiError::NotFound(format!(
                "航空公司(id={})不存在",
                route.airline_id
            )));
        }

        self.route_repo.insert(&route).map_err(|e| {
            if e.is_unique_violation_on("flight_number") {
                duplicate_flight(&route.flight_number)
            } else {
                ApiError::from(e)
            }
        })?;

        tracing::info!(
            flight_number = %route.flight_number,
            origin = %route.origin,
            destination = %route.destination,
            seat_capacity = route.seat_capacity,
            "航线创建成功"
        );
        Ok(route)
    }

    /// 按属性名修改航线的一个属性
    ///
    /// # 参数
    /// - attribute: origin / destination / plane / seatCapacity / durationMinutes
    /// - new_value: 新值的文本形式（数值属性须为正整数）
    pub fn update_route_attribute(
        &self,
        flight_number: &str,
        attribute: &str,
        new_value: &str,
    ) -> ApiResult<Route> {
        if !self.route_repo.exists(flight_number)? {
            return Err(not_found_flight(flight_number));
        }
        let attribute = parse_route_attribute(attribute)?;
        let update = parse_route_update(attribute, new_value)?;
        self.apply_route_update(flight_number, update)
    }

    /// 应用一个类型化的单属性更新，返回更新后的航线
    pub fn apply_route_update(&self, flight_number: &str, update: RouteUpdate) -> ApiResult<Route> {
        let _perf = PerfGuard::new("update_route_attribute");

        let mut route = self.find_route(flight_number)?;
        validate_route_update(&update)?;

        let affected = self.route_repo.update_attribute(flight_number, &update)?;
        if affected == 0 {
            return Err(not_found_flight(flight_number));
        }

        update.apply_to(&mut route);
        tracing::info!(
            flight_number = %flight_number,
            attribute = %update.attribute(),
            "航线属性已更新"
        );
        Ok(route)
    }

    /// 按航班号查询航线
    pub fn find_route(&self, flight_number: &str) -> ApiResult<Route> {
        self.route_repo
            .find_by_flight_number(flight_number)?
            .ok_or_else(|| not_found_flight(flight_number))
    }

    /// 两城市之间的全部航线
    pub fn search_routes(&self, origin: &str, destination: &str) -> ApiResult<Vec<Route>> {
        validate_required("出发地", origin)?;
        validate_required("目的地", destination)?;
        let routes = self.route_repo.find_between(origin, destination)?;
        tracing::debug!("航线检索: {} -> {}，{}条", origin, destination, routes.len());
        Ok(routes)
    }

    /// 两城市之间时长最短的前 k 条航线（k=0 使用默认条数）
    pub fn list_routes_by_duration(
        &self,
        origin: &str,
        destination: &str,
        k: usize,
    ) -> ApiResult<Vec<RouteWithAirline>> {
        validate_required("出发地", origin)?;
        validate_required("目的地", destination)?;
        Ok(self
            .route_repo
            .list_by_duration(origin, destination, self.config.resolve_top_k(k))?)
    }

    /// 按开设航线数排序的前 k 个目的地（k=0 使用默认条数）
    pub fn most_popular_destinations(&self, k: usize) -> ApiResult<Vec<DestinationPopularity>> {
        Ok(self
            .route_repo
            .popular_destinations(self.config.resolve_top_k(k))?)
    }
}

fn trim_route_text(route: NewRoute) -> NewRoute {
    Route {
        flight_number: route.flight_number.trim().to_string(),
        origin: route.origin.trim().to_string(),
        destination: route.destination.trim().to_string(),
        plane: route.plane.trim().to_string(),
        ..route
    }
}

fn duplicate_flight(flight_number: &str) -> ApiError {
    ApiError::DuplicateKey {
        entity: "Route".to_string(),
        key: flight_number.to_string(),
    }
}

pub(crate) fn not_found_flight(flight_number: &str) -> ApiError {
    ApiError::NotFound(format!("航班{}不存在", flight_number))
}
