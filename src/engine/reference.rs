// ==========================================
// 航空订座系统 - 订座编号生成
// ==========================================
// 10 位 [A-Z0-9]，每位独立均匀抽取；唯一性由调用方查重 + 存储约束保证
// ==========================================

use crate::domain::booking::BookingReference;
use rand::Rng;

/// 订座编号生成器
pub trait ReferenceGenerator: Send + Sync {
    fn generate(&self) -> BookingReference;
}

/// 基于线程本地随机数的生成器
#[derive(Debug, Default, Clone, Copy)]
pub struct RandomReferenceGenerator;

impl RandomReferenceGenerator {
    /// 用指定随机源生成一个编号
    pub fn generate_with<R: Rng>(rng: &mut R) -> BookingReference {
        let alphabet = BookingReference::ALPHABET;
        let code: String = (0..BookingReference::LEN)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())] as char)
            .collect();
        BookingReference::from_generated(code)
    }
}

impl ReferenceGenerator for RandomReferenceGenerator {
    fn generate(&self) -> BookingReference {
        Self::generate_with(&mut rand::thread_rng())
    }
}
