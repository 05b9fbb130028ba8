// ==========================================
// 航空订座系统 - 应用状态
// ==========================================
// 职责: 管理共享连接与各API实例
// 约束: 所有仓储共享同一连接（单会话、单写者）
// ==========================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::api::{
    ApiError, ApiResult, AvailabilityApi, BookingApi, PassengerApi, RatingApi, RouteApi,
};
use crate::config::{BookingConfig, ConfigManager};
use crate::repository::{
    AirlineRepository, BookingRepository, DataStore, PassengerRepository, RatingRepository,
    RouteRepository,
};

/// 数据概况（启动日志用）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    pub passengers: i64,
    pub routes: i64,
    pub bookings: i64,
    pub ratings: i64,
}

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 数据存储（共享连接）
    pub store: DataStore,

    /// 启动时加载的业务配置
    pub config: BookingConfig,

    /// 配置管理器
    pub config_manager: Arc<ConfigManager>,

    pub passenger_api: Arc<PassengerApi>,
    pub route_api: Arc<RouteApi>,
    pub availability_api: Arc<AvailabilityApi>,
    pub booking_api: Arc<BookingApi>,
    pub rating_api: Arc<RatingApi>,

    /// 航空公司仓储（员工侧参考数据维护）
    pub airline_repo: Arc<AirlineRepository>,

    passenger_repo: Arc<PassengerRepository>,
    route_repo: Arc<RouteRepository>,
    booking_repo: Arc<BookingRepository>,
    rating_repo: Arc<RatingRepository>,
}

impl AppState {
    /// 打开数据库（必要时建表）并组装所有API
    pub fn new(db_path: String) -> ApiResult<Self> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let store = DataStore::open(&db_path)?;
        {
            let conn = store.connection();
            let mut guard = conn
                .lock()
                .map_err(|e| ApiError::DatabaseConnectionError(e.to_string()))?;
            crate::perf::install_sqlite_tracing(&mut guard);
        }

        Self::from_store(db_path, store)
    }

    /// 基于已建表的存储组装
    pub fn from_store(db_path: String, store: DataStore) -> ApiResult<Self> {
        // ==========================================
        // 配置
        // ==========================================
        let config_manager = Arc::new(ConfigManager::new(store.clone()));
        let config = config_manager.get_booking_config()?;
        tracing::debug!(?config, "业务配置已加载");

        // ==========================================
        // Repository层
        // ==========================================
        let passenger_repo = Arc::new(PassengerRepository::new(store.clone()));
        let airline_repo = Arc::new(AirlineRepository::new(store.clone()));
        let route_repo = Arc::new(RouteRepository::new(store.clone()));
        let booking_repo = Arc::new(BookingRepository::new(store.clone()));
        let rating_repo = Arc::new(RatingRepository::new(store.clone()));

        // ==========================================
        // API层
        // ==========================================
        let passenger_api = Arc::new(PassengerApi::new(passenger_repo.clone()));
        let route_api = Arc::new(RouteApi::new(
            route_repo.clone(),
            airline_repo.clone(),
            config.clone(),
        ));
        let availability_api = Arc::new(AvailabilityApi::new(
            route_repo.clone(),
            booking_repo.clone(),
        ));
        let booking_api = Arc::new(BookingApi::new(
            passenger_repo.clone(),
            route_repo.clone(),
            booking_repo.clone(),
            availability_api.clone(),
            config.clone(),
        ));
        let rating_api = Arc::new(RatingApi::new(
            passenger_repo.clone(),
            booking_repo.clone(),
            rating_repo.clone(),
            config.clone(),
        ));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            store,
            config,
            config_manager,
            passenger_api,
            route_api,
            availability_api,
            booking_api,
            rating_api,
            airline_repo,
            passenger_repo,
            route_repo,
            booking_repo,
            rating_repo,
        })
    }

    /// 各表记录数
    pub fn summary(&self) -> ApiResult<CatalogSummary> {
        Ok(CatalogSummary {
            passengers: self.passenger_repo.count()?,
            routes: self.route_repo.count()?,
            bookings: self.booking_repo.count()?,
            ratings: self.rating_repo.count()?,
        })
    }
}

/// 默认数据库路径
///
/// 优先级：
/// 1. 环境变量 AIR_BOOKING_DB_PATH
/// 2. 用户数据目录/air-booking/air_booking.db
/// 3. ./air_booking.db
pub fn get_default_db_path() -> String {
    if let Ok(path) = std::env::var("AIR_BOOKING_DB_PATH") {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let fallback = "./air_booking.db".to_string();

    let Some(data_dir) = dirs::data_dir() else {
        return fallback;
    };

    let dir = data_dir.join("air-booking");
    if let Err(e) = std::fs::create_dir_all(&dir) {
        tracing::warn!("无法创建数据目录 {:?}: {}，使用当前目录", dir, e);
        return fallback;
    }

    dir.join("air_booking.db").to_string_lossy().into_owned()
}
