// ==========================================
// 航空订座系统 - 订座实体
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 订座编号：10 位 [A-Z0-9]
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookingReference(String);

impl BookingReference {
    /// 编号长度
    pub const LEN: usize = 10;

    /// 编号字符集
    pub const ALPHABET: &'static [u8; 36] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

    /// 校验并构造编号；格式不合法时返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        let well_formed = raw.len() == Self::LEN
            && raw
                .bytes()
                .all(|b| b.is_ascii_uppercase() || b.is_ascii_digit());
        well_formed.then(|| Self(raw.to_string()))
    }

    /// 生成器产出的编号（字符取自 ALPHABET，长度为 LEN）
    pub(crate) fn from_generated(code: String) -> Self {
        debug_assert!(Self::parse(&code).is_some());
        Self(code)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for BookingReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// 订座记录（booking 表）
///
/// (flight_number, passenger_id, departure_date) 唯一；创建后不修改、不删除。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    pub booking_reference: BookingReference,
    pub flight_number: String,
    pub passenger_id: i64,
    pub departure_date: NaiveDate,
}

/// 航班某日余座报告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatAvailability {
    pub flight_number: String,
    pub origin: String,
    pub destination: String,
    pub departure_date: NaiveDate,
    pub total_seats: i64,
    pub booked_seats: i64,
    /// 可能为负（容量被下调到已订数量以下）
    pub remaining_seats: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reference() {
        assert!(BookingReference::parse("AB12CD34EF").is_some());
        assert!(BookingReference::parse("ab12cd34ef").is_none());
        assert!(BookingReference::parse("AB12CD34E").is_none());
        assert!(BookingReference::parse("AB12CD34EF1").is_none());
        assert!(BookingReference::parse("AB12-D34EF").is_none());
    }
}
