// ==========================================
// 航空订座系统 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、覆写
// 存储: config_kv 表（scope_id='global'）
// ==========================================

use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::store::DataStore;
use rusqlite::params;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 配置键
pub mod config_keys {
    /// 订座编号查重重试上限
    pub const REFERENCE_MAX_ATTEMPTS: &str = "booking.reference_max_attempts";
    /// 表示“无评论”的输入占位符
    pub const NO_COMMENT_SENTINEL: &str = "rating.no_comment_sentinel";
    /// 排名类查询 k=0 时使用的默认条数
    pub const DEFAULT_TOP_K: &str = "catalog.default_top_k";
}

const GLOBAL_SCOPE: &str = "global";

// ==========================================
// BookingConfig - 业务配置快照
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingConfig {
    pub reference_max_attempts: u32,
    pub no_comment_sentinel: String,
    pub default_top_k: usize,
}

impl Default for BookingConfig {
    fn default() -> Self {
        Self {
            reference_max_attempts: 64,
            no_comment_sentinel: "NA".to_string(),
            default_top_k: 10,
        }
    }
}

impl BookingConfig {
    /// k=0 时回退到默认条数
    pub fn resolve_top_k(&self, k: usize) -> usize {
        if k == 0 {
            self.default_top_k
        } else {
            k
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    store: DataStore,
}

impl ConfigManager {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// 读取 global scope 的配置值
    pub fn get_config_value(&self, key: &str) -> RepositoryResult<Option<String>> {
        self.store.query_optional(
            "SELECT value FROM config_kv WHERE scope_id = ?1 AND key = ?2",
            params![GLOBAL_SCOPE, key],
            |row| row.get::<_, String>(0),
        )
    }

    /// 写入 global scope 的配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> RepositoryResult<()> {
        self.store.execute(
            r#"
            INSERT INTO config_kv (scope_id, key, value) VALUES (?1, ?2, ?3)
            ON CONFLICT(scope_id, key) DO UPDATE SET value = ?3, updated_at = datetime('now')
            "#,
            params![GLOBAL_SCOPE, key, value],
        )?;
        tracing::info!("配置已更新: {}={}", key, value);
        Ok(())
    }

    /// 所有 global 配置的 JSON 快照
    pub fn get_config_snapshot(&self) -> RepositoryResult<String> {
        let pairs = self.store.query(
            "SELECT key, value FROM config_kv WHERE scope_id = ?1 ORDER BY key",
            params![GLOBAL_SCOPE],
            |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
        )?;
        let map: BTreeMap<String, String> = pairs.into_iter().collect();
        serde_json::to_string(&map).map_err(|e| RepositoryError::InternalError(e.to_string()))
    }

    fn get_parsed<T: std::str::FromStr>(&self, key: &str, default: T) -> RepositoryResult<T> {
        match self.get_config_value(key)? {
            Some(raw) => match raw.trim().parse::<T>() {
                Ok(value) => Ok(value),
                Err(_) => {
                    tracing::warn!("配置值无法解析，使用默认值: {}={:?}", key, raw);
                    Ok(default)
                }
            },
            None => Ok(default),
        }
    }

    /// 加载业务配置（缺省项使用默认值）
    pub fn get_booking_config(&self) -> RepositoryResult<BookingConfig> {
        let defaults = BookingConfig::default();

        let reference_max_attempts = self
            .get_parsed(config_keys::REFERENCE_MAX_ATTEMPTS, defaults.reference_max_attempts)?
            .max(1);
        let default_top_k = self
            .get_parsed(config_keys::DEFAULT_TOP_K, defaults.default_top_k)?
            .max(1);
        let no_comment_sentinel = self
            .get_config_value(config_keys::NO_COMMENT_SENTINEL)?
            .unwrap_or(defaults.no_comment_sentinel);

        Ok(BookingConfig {
            reference_max_attempts,
            no_comment_sentinel,
            default_top_k,
        })
    }
}
