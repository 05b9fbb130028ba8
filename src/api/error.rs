// ==========================================
// 航空订座系统 - API层错误类型
// ==========================================
// 职责: 定义调用方可见的失败分类，转换Repository错误
// 约束: 任何失败都以结构化结果返回，不吞错
// ==========================================

use crate::repository::error::RepositoryError;
use chrono::NaiveDate;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 输入错误（调用方应重新输入或拒绝）
    // ==========================================
    #[error("数据验证失败: {0}")]
    ValidationError(String),

    // ==========================================
    // 唯一性约束（操作中止，不产生部分写入）
    // ==========================================
    #[error("主键重复: {entity}({key})已存在")]
    DuplicateKey { entity: String, key: String },

    #[error("重复订座: 乘客{passenger_id}已订{flight_number}于{departure}出发的航班")]
    DuplicateBooking {
        flight_number: String,
        passenger_id: i64,
        departure: NaiveDate,
    },

    #[error("重复评分: 乘客{passenger_id}已对航班{flight_number}评分")]
    DuplicateRating {
        passenger_id: i64,
        flight_number: String,
    },

    // ==========================================
    // 引用实体不存在
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    // ==========================================
    // 容量
    // ==========================================
    #[error("航班已满: flight={flight_number}, departure={departure}, remaining={remaining}")]
    CapacityExhausted {
        flight_number: String,
        departure: NaiveDate,
        remaining: i64,
    },

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

// ==========================================
// 从 RepositoryError 转换
// 说明: 唯一约束冲突在各API中按约束列映射为具体的重复错误，
//       这里只做兜底转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::DatabaseConnectionError(msg) => ApiError::DatabaseConnectionError(msg),
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => ApiError::DuplicateKey {
                entity: "unknown".to_string(),
                key: msg,
            },
            RepositoryError::ForeignKeyViolation(msg) => {
                ApiError::NotFound(format!("外键引用的记录不存在: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => ApiError::ValidationError(msg),
            RepositoryError::FieldValueError { field, message } => {
                ApiError::DatabaseError(format!("字段{}错误: {}", field, message))
            }
            RepositoryError::InternalError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_error_conversion() {
        let repo_err = RepositoryError::NotFound {
            entity: "Route".to_string(),
            id: "AA100".to_string(),
        };
        let api_err: ApiError = repo_err.into();
        match api_err {
            ApiError::NotFound(msg) => {
                assert!(msg.contains("Route"));
                assert!(msg.contains("AA100"));
            }
            _ => panic!("Expected NotFound"),
        }

        let api_err: ApiError =
            RepositoryError::CheckConstraintViolation("CHECK constraint failed: score".to_string())
                .into();
        assert!(matches!(api_err, ApiError::ValidationError(_)));

        let api_err: ApiError = RepositoryError::LockError("poisoned".to_string()).into();
        assert!(matches!(api_err, ApiError::DatabaseConnectionError(_)));
    }

    #[test]
    fn test_capacity_message_is_explicit() {
        let err = ApiError::CapacityExhausted {
            flight_number: "AA100".to_string(),
            departure: NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            remaining: 0,
        };
        let msg = err.to_string();
        assert!(msg.contains("AA100"));
        assert!(msg.contains("2024-05-01"));
    }
}
