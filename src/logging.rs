// ==========================================
// 航空订座系统 - 日志系统初始化
// ==========================================
// 使用 tracing 和 tracing-subscriber
// - RUST_LOG 控制过滤器（默认 info）
// - AIR_BOOKING_LOG_JSON=1 输出 JSON 行日志
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认日志级别
pub const DEFAULT_LOG_FILTER: &str = "info";

/// 初始化日志系统
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器，例如 `RUST_LOG=air_booking=debug`
/// - AIR_BOOKING_LOG_JSON: 为真时输出 JSON 格式
///
/// 重复调用是安全的（第二次初始化会被忽略）。
pub fn init() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let json = std::env::var("AIR_BOOKING_LOG_JSON")
        .map(|v| matches!(v.trim(), "1" | "true" | "yes"))
        .unwrap_or(false);

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true);

    let _ = if json {
        builder.json().try_init()
    } else {
        builder.try_init()
    };
}

/// 初始化测试环境的日志系统（debug 级别，输出到测试捕获器）
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}
