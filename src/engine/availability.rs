// ==========================================
// 航空订座系统 - 余座计算
// ==========================================
// 余座 = 座位数 - 该日已订数，不落库，每次重新计算
// ==========================================

use serde::{Deserialize, Serialize};

/// 航班某日的座位账
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeatLedger {
    pub capacity: i64,
    pub booked: i64,
}

impl SeatLedger {
    pub fn new(capacity: i64, booked: i64) -> Self {
        Self { capacity, booked }
    }

    /// 余座（有符号；容量被下调时可能为负）
    pub fn remaining(&self) -> i64 {
        self.capacity - self.booked
    }

    /// 是否可订
    ///
    /// 当日尚无订座时总是可订；否则余座必须大于 0。
    pub fn is_bookable(&self) -> bool {
        self.booked == 0 || self.remaining() > 0
    }
}
