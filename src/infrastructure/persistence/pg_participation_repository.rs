//! PostgreSQL implementation of the participation repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Contest, LeaderboardEntry, NewParticipation, Participation};
use crate::domain::repositories::ParticipationRepository;
use crate::error::AppError;
use crate::infrastructure::persistence::pg_contest_repository::{ContestRow, into_contests};

/// PostgreSQL repository for paid entries (`payments` table).
///
/// Recording a payment runs in a transaction with the participant-count bump.
/// Winner declaration is a conditional update, and the partial unique index
/// `payments_one_winner_per_contest` turns a lost race into "no row updated".
pub struct PgParticipationRepository {
    pool: Arc<PgPool>,
}

impl PgParticipationRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct ParticipationRow {
    id: i64,
    contest_id: i64,
    email: String,
    name: Option<String>,
    img: Option<String>,
    amount: f64,
    prize_money: f64,
    transaction_id: Option<String>,
    is_win: bool,
    won_at: Option<DateTime<Utc>>,
    draw_index: Option<i32>,
    paid_at: DateTime<Utc>,
}

impl From<ParticipationRow> for Participation {
    fn from(r: ParticipationRow) -> Self {
        Participation {
            id: r.id,
            contest_id: r.contest_id,
            email: r.email,
            name: r.name,
            img: r.img,
            amount: r.amount,
            prize_money: r.prize_money,
            transaction_id: r.transaction_id,
            is_win: r.is_win,
            won_at: r.won_at,
            draw_index: r.draw_index,
            paid_at: r.paid_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct LeaderboardRow {
    email: String,
    name: Option<String>,
    img: Option<String>,
    prize_money: f64,
    total_wins: i64,
    total_prize_money: f64,
}

impl From<LeaderboardRow> for LeaderboardEntry {
    fn from(r: LeaderboardRow) -> Self {
        LeaderboardEntry {
            email: r.email,
            name: r.name,
            img: r.img,
            prize_money: r.prize_money,
            total_wins: r.total_wins,
            total_prize_money: r.total_prize_money,
        }
    }
}

#[async_trait]
impl ParticipationRepository for PgParticipationRepository {
    async fn record(&self, new_participation: NewParticipation) -> Result<Participation, AppError> {
        let mut tx = self.pool.begin().await?;

        let prize_money = sqlx::query_scalar::<_, f64>(
            r#"
            UPDATE contests
            SET participate_count = participate_count + 1, updated_at = NOW()
            WHERE id = $1
            RETURNING prize_money
            "#,
        )
        .bind(new_participation.contest_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(prize_money) = prize_money else {
            tx.rollback().await?;
            return Err(AppError::not_found(
                "Contest not found",
                json!({ "contestId": new_participation.contest_id }),
            ));
        };

        let row = sqlx::query_as::<_, ParticipationRow>(
            r#"
            INSERT INTO payments (contest_id, email, name, img, amount, prize_money, transaction_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(new_participation.contest_id)
        .bind(new_participation.email)
        .bind(new_participation.name)
        .bind(new_participation.img)
        .bind(new_participation.amount)
        .bind(prize_money)
        .bind(new_participation.transaction_id)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(row.into())
    }

    async fn list_by_contest(&self, contest_id: i64) -> Result<Vec<Participation>, AppError> {
        let rows = sqlx::query_as::<_, ParticipationRow>(
            "SELECT * FROM payments WHERE contest_id = $1 ORDER BY id",
        )
        .bind(contest_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Participation::from).collect())
    }

    async fn contests_entered_by(
        &self,
        email: &str,
        won_only: bool,
    ) -> Result<Vec<Contest>, AppError> {
        let rows = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT c.* FROM contests c
            WHERE c.id IN (
                SELECT p.contest_id FROM payments p
                WHERE p.email = $1 AND (NOT $2 OR p.is_win)
            )
            ORDER BY c.deadline ASC NULLS LAST, c.id
            "#,
        )
        .bind(email)
        .bind(won_only)
        .fetch_all(self.pool.as_ref())
        .await?;

        into_contests(rows)
    }

    async fn has_winner(&self, contest_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM payments WHERE contest_id = $1 AND is_win)",
        )
        .bind(contest_id)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(exists)
    }

    async fn declare_winner(
        &self,
        contest_id: i64,
        participation_id: i64,
        draw_index: Option<i32>,
        won_at: DateTime<Utc>,
    ) -> Result<Option<Participation>, AppError> {
        let result = sqlx::query_as::<_, ParticipationRow>(
            r#"
            UPDATE payments
            SET is_win = TRUE, won_at = $3, draw_index = $4
            WHERE id = $2
              AND contest_id = $1
              AND NOT EXISTS (SELECT 1 FROM payments WHERE contest_id = $1 AND is_win)
            RETURNING *
            "#,
        )
        .bind(contest_id)
        .bind(participation_id)
        .bind(won_at)
        .bind(draw_index)
        .fetch_optional(self.pool.as_ref())
        .await;

        match result {
            Ok(row) => Ok(row.map(Participation::from)),
            // A concurrent declaration won the race on the partial unique index.
            Err(e)
                if e
                    .as_database_error()
                    .is_some_and(|db| db.is_unique_violation()) =>
            {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn winners(&self, contest_id: Option<i64>) -> Result<Vec<Participation>, AppError> {
        let rows = sqlx::query_as::<_, ParticipationRow>(
            r#"
            SELECT * FROM payments
            WHERE is_win AND ($1::BIGINT IS NULL OR contest_id = $1)
            ORDER BY won_at DESC NULLS LAST, id DESC
            "#,
        )
        .bind(contest_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(Participation::from).collect())
    }

    async fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        let rows = sqlx::query_as::<_, LeaderboardRow>(
            r#"
            SELECT
                email,
                (ARRAY_AGG(name ORDER BY id))[1]        AS name,
                (ARRAY_AGG(img ORDER BY id))[1]         AS img,
                (ARRAY_AGG(prize_money ORDER BY id))[1] AS prize_money,
                COUNT(*)                                AS total_wins,
                COALESCE(SUM(prize_money), 0)           AS total_prize_money
            FROM payments
            WHERE is_win
            GROUP BY email
            ORDER BY total_wins DESC, email ASC
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LeaderboardEntry::from).collect())
    }
}
