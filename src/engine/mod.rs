// ==========================================
// 航空订座系统 - 引擎层
// ==========================================
// 职责: 纯业务规则（余座计算、订座编号生成）
// 红线: Engine 不拼 SQL
// ==========================================

pub mod availability;
pub mod reference;

// 重导出
pub use availability::SeatLedger;
pub use reference::{RandomReferenceGenerator, ReferenceGenerator};
