// ==========================================
// 航空订座系统 - 评分 API (Rating Ledger)
// ==========================================
// 约束: 每位乘客每个航班至多一条评分；只能评价订过的航班
// ==========================================

use std::sync::Arc;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{normalize_comment, validate_passport_number, validate_score};
use crate::config::BookingConfig;
use crate::domain::rating::{NewRating, RatedRoute, Rating};
use crate::perf::PerfGuard;
use crate::repository::booking_repo::BookingRepository;
use crate::repository::passenger_repo::PassengerRepository;
use crate::repository::rating_repo::RatingRepository;

/// 评分API
pub struct RatingApi {
    passenger_repo: Arc<PassengerRepository>,
    booking_repo: Arc<BookingRepository>,
    rating_repo: Arc<RatingRepository>,
    config: BookingConfig,
}

impl RatingApi {
    pub fn new(
        passenger_repo: Arc<PassengerRepository>,
        booking_repo: Arc<BookingRepository>,
        rating_repo: Arc<RatingRepository>,
        config: BookingConfig,
    ) -> Self {
        Self {
            passenger_repo,
            booking_repo,
            rating_repo,
            config,
        }
    }

    /// 提交评分
    ///
    /// # 参数
    /// - score: 0..=5
    /// - comment: 可选；“无评论”占位符不落库，其余文本原样保存
    ///
    /// # 返回
    /// - Err(NotFound): 护照号未注册 / 乘客未订过该航班
    /// - Err(DuplicateRating): 已评价过该航班
    /// - Err(ValidationError): 评分越界或护照号格式错误
    pub fn submit_rating(
        &self,
        passport_number: &str,
        flight_number: &str,
        score: i32,
        comment: Option<&str>,
    ) -> ApiResult<Rating> {
        let _perf = PerfGuard::new("submit_rating");

        validate_passport_number(passport_number)?;
        let passenger_id = self
            .passenger_repo
            .find_id_by_passport(passport_number)?
            .ok_or_else(|| ApiError::NotFound(format!("护照号{}未注册", passport_number)))?;

        if !self
            .booking_repo
            .passenger_has_flight(passenger_id, flight_number)?
        {
            return Err(ApiError::NotFound(format!(
                "乘客{}没有航班{}的订座记录",
                passenger_id, flight_number
            )));
        }

        if self.rating_repo.exists_for(passenger_id, flight_number)? {
            return Err(duplicate_rating(passenger_id, flight_number));
        }

        validate_score(score)?;

        let new_rating = NewRating {
            passenger_id,
            flight_number: flight_number.to_string(),
            score,
            comment: normalize_comment(comment, &self.config.no_comment_sentinel),
        };

        let rating = self.rating_repo.insert(&new_rating).map_err(|e| {
            if e.is_unique_violation_on("passenger_id") {
                tracing::warn!(passenger_id, "重复评分在查重后被并发写入");
                duplicate_rating(passenger_id, flight_number)
            } else {
                ApiError::from(e)
            }
        })?;

        tracing::info!(
            rating_id = rating.rating_id,
            passenger_id,
            flight_number = %flight_number,
            score,
            has_comment = rating.comment.is_some(),
            "评分已记录"
        );
        Ok(rating)
    }

    /// 平均分最高的前 k 条航线（k=0 使用默认条数）
    pub fn highest_rated_routes(&self, k: usize) -> ApiResult<Vec<RatedRoute>> {
        Ok(self
            .rating_repo
            .highest_rated(self.config.resolve_top_k(k))?)
    }
}

fn duplicate_rating(passenger_id: i64, flight_number: &str) -> ApiError {
    ApiError::DuplicateRating {
        passenger_id,
        flight_number: flight_number.to_string(),
    }
}
