// ==========================================
// 航空订座系统 - 评分数据仓储
// ==========================================
// 红线: Repository 不含业务逻辑
// ==========================================

use crate::domain::rating::{NewRating, RatedRoute, Rating};
use crate::repository::error::RepositoryResult;
use crate::repository::store::DataStore;
use rusqlite::params;

/// 评分仓储
/// 职责: 管理 ratings 表的读写与排名查询
pub struct RatingRepository {
    store: DataStore,
}

impl RatingRepository {
    pub fn new(store: DataStore) -> Self {
        Self { store }
    }

    /// 插入评分，rating_id 由存储层分配；comment 为 None 时该列写入 NULL
    pub fn insert(&self, rating: &NewRating) -> RepositoryResult<Rating> {
        let rating_id = self.store.insert_returning_id(
            r#"
            INSERT INTO ratings (passenger_id, flight_number, score, comment)
            VALUES (?1, ?2, ?3, ?4)
            "#,
            params![
                rating.passenger_id,
                rating.flight_number,
                rating.score,
                rating.comment,
            ],
        )?;

        Ok(Rating {
            rating_id,
            passenger_id: rating.passenger_id,
            flight_number: rating.flight_number.clone(),
            score: rating.score,
            comment: rating.comment.clone(),
        })
    }

    pub fn find_by_id(&self, rating_id: i64) -> RepositoryResult<Option<Rating>> {
        self.store.query_optional(
            r#"
            SELECT rating_id, passenger_id, flight_number, score, comment
            FROM ratings
            WHERE rating_id = ?1
            "#,
            params![rating_id],
            |row| {
                Ok(Rating {
                    rating_id: row.get(0)?,
                    passenger_id: row.get(1)?,
                    flight_number: row.get(2)?,
                    score: row.get(3)?,
                    comment: row.get(4)?,
                })
            },
        )
    }

    /// (乘客, 航班) 是否已有评分
    pub fn exists_for(&self, passenger_id: i64, flight_number: &str) -> RepositoryResult<bool> {
        let found = self.store.query_scalar(
            "SELECT EXISTS(SELECT 1 FROM ratings WHERE passenger_id = ?1 AND flight_number = ?2)",
            params![passenger_id, flight_number],
        )?;
        Ok(found != 0)
    }

    /// 平均分最高的前 limit 条航线
    pub fn highest_rated(&self, limit: usize) -> RepositoryResult<Vec<RatedRoute>> {
        self.store.query(
            r#"
            SELECT a.name, f.flight_number, f.origin, f.destination, f.plane,
                   AVG(r.score) AS avg_score, COUNT(r.rating_id) AS rating_count
            FROM ratings r
            JOIN flight f ON f.flight_number = r.flight_number
            JOIN airline a ON a.airline_id = f.airline_id
            GROUP BY a.name, f.flight_number, f.origin, f.destination, f.plane
            ORDER BY avg_score DESC, rating_count DESC, f.flight_number ASC
            LIMIT ?1
            "#,
            params![limit as i64],
            |row| {
                Ok(RatedRoute {
                    airline_name: row.get(0)?,
                    flight_number: row.get(1)?,
                    origin: row.get(2)?,
                    destination: row.get(3)?,
                    plane: row.get(4)?,
                    average_score: row.get(5)?,
                    rating_count: row.get(6)?,
                })
            },
        )
    }

    pub fn count(&self) -> RepositoryResult<i64> {
        self.store.query_scalar("SELECT COUNT(*) FROM ratings", [])
    }
}
