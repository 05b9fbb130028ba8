// ==========================================
// 航空订座系统 - 主入口
// ==========================================
// 职责: 初始化日志与数据库，输出数据概况
// 说明: 菜单/交互界面不在本程序范围内，调用方通过库接口使用
// ==========================================

use air_booking::app::{get_default_db_path, AppState};
use air_booking::{logging, APP_NAME, VERSION};
use anyhow::{Context, Result};

fn main() -> Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} - 订座与库存一致性引擎", APP_NAME);
    tracing::info!("系统版本: {}", VERSION);
    tracing::info!("==================================================");

    let db_path = std::env::args()
        .nth(1)
        .unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).context("无法初始化AppState")?;
    let summary = state.summary().context("读取数据概况失败")?;

    tracing::info!(
        passengers = summary.passengers,
        routes = summary.routes,
        bookings = summary.bookings,
        ratings = summary.ratings,
        "数据库就绪"
    );
    tracing::info!("配置快照: {}", state.config_manager.get_config_snapshot()?);

    Ok(())
}
