// ==========================================
// 航空订座系统 - 乘客注册 API (Identity Registrar)
// ==========================================
// 职责: 校验护照号并分配唯一乘客身份
// ==========================================

use chrono::NaiveDate;
use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{validate_passport_number, validate_required};
use crate::domain::passenger::{NewPassenger, Passenger};
use crate::perf::PerfGuard;
use crate::repository::passenger_repo::PassengerRepository;

/// 乘客注册API
pub struct PassengerApi {
    passenger_repo: Arc<PassengerRepository>,
}

impl PassengerApi {
    pub fn new(passenger_repo: Arc<PassengerRepository>) -> Self {
        Self { passenger_repo }
    }

    /// 注册乘客
    ///
    /// # 返回
    /// - Ok(Passenger): 新乘客（passenger_id 由存储层分配，空表从 1 开始）
    /// - Err(ValidationError): 护照号不是 10 个字符 / 姓名为空
    /// - Err(DuplicateKey): 护照号已存在
    pub fn register_passenger(
        &self,
        passport_number: &str,
        full_name: &str,
        birth_date: NaiveDate,
        country: &str,
    ) -> ApiResult<Passenger> {
        let _perf = PerfGuard::new("register_passenger");

        validate_passport_number(passport_number)?;
        validate_required("姓名", full_name)?;

        if self.passenger_repo.exists_passport(passport_number)? {
            return Err(duplicate_passport(passport_number));
        }

        let new_passenger = NewPassenger::new(passport_number, full_name.trim(), birth_date, country.trim());
        let passenger = self.passenger_repo.insert(&new_passenger).map_err(|e| {
            if e.is_unique_violation_on("passport_number") {
                tracing::warn!("护照号在查重后被并发写入: {}", passport_number);
                duplicate_passport(passport_number)
            } else {
                ApiError::from(e)
            }
        })?;

        tracing::info!(
            passenger_id = passenger.passenger_id,
            passport_number = %passenger.passport_number,
            "乘客注册成功"
        );
        Ok(passenger)
    }

    /// 按护照号查询乘客
    pub fn find_passenger(&self, passport_number: &str) -> ApiResult<Passenger> {
        validate_passport_number(passport_number)?;
        self.passenger_repo
            .find_by_passport(passport_number)?
            .ok_or_else(|| ApiError::NotFound(format!("护照号{}未注册", passport_number)))
    }
}

fn duplicate_passport(passport_number: &str) -> ApiError {
    ApiError::DuplicateKey {
        entity: "Passenger".to_string(),
        key: passport_number.to_string(),
    }
}
