// ==========================================
// 航空订座系统 - 乘客实体
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// 乘客（passenger 表）
///
/// 注册后在本系统范围内不可变。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    pub passenger_id: i64,
    /// 护照号，唯一，恰好 10 个字符
    pub passport_number: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub country: String,
}

/// 待注册乘客（尚未分配 passenger_id）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPassenger {
    pub passport_number: String,
    pub full_name: String,
    pub birth_date: NaiveDate,
    pub country: String,
}

impl NewPassenger {
    pub fn new(
        passport_number: impl Into<String>,
        full_name: impl Into<String>,
        birth_date: NaiveDate,
        country: impl Into<String>,
    ) -> Self {
        Self {
            passport_number: passport_number.into(),
            full_name: full_name.into(),
            birth_date,
            country: country.into(),
        }
    }

    /// 附上存储层分配的 ID
    pub fn with_id(self, passenger_id: i64) -> Passenger {
        Passenger {
            passenger_id,
            passport_number: self.passport_number,
            full_name: self.full_name,
            birth_date: self.birth_date,
            country: self.country,
        }
    }
}
