// ==========================================
// 航空订座系统 - 配置层
// ==========================================
// 存储: config_kv 表 (key-value + scope)
// ==========================================

pub mod config_manager;

// 重导出核心配置管理器
pub use config_manager::{config_keys, BookingConfig, ConfigManager};
