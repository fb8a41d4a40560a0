//! PostgreSQL implementation of the contest repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use sqlx::PgPool;
use sqlx::types::Json;
use std::sync::Arc;

use crate::domain::entities::{Contest, ContestPatch, ContestStatus, NewContest};
use crate::domain::repositories::ContestRepository;
use crate::error::AppError;

/// PostgreSQL repository for contests.
///
/// Descriptive fields without a dedicated column are kept in the `extra`
/// JSONB column and merged with `||` on update.
pub struct PgContestRepository {
    pool: Arc<PgPool>,
}

impl PgContestRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Raw `contests` row. Shared with the participation repository for joins.
#[derive(sqlx::FromRow)]
pub(crate) struct ContestRow {
    id: i64,
    creator_email: String,
    creator_name: Option<String>,
    creator_image: Option<String>,
    name: String,
    contest_type: String,
    image: Option<String>,
    description: Option<String>,
    task: Option<String>,
    price: f64,
    prize_money: f64,
    deadline: Option<DateTime<Utc>>,
    status: String,
    participate_count: i64,
    extra: Json<Map<String, Value>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ContestRow> for Contest {
    type Error = AppError;

    fn try_from(r: ContestRow) -> Result<Self, Self::Error> {
        Ok(Contest {
            id: r.id,
            creator_email: r.creator_email,
            creator_name: r.creator_name,
            creator_image: r.creator_image,
            name: r.name,
            contest_type: r.contest_type,
            image: r.image,
            description: r.description,
            task: r.task,
            price: r.price,
            prize_money: r.prize_money,
            deadline: r.deadline,
            status: r.status.parse::<ContestStatus>()?,
            participate_count: r.participate_count,
            extra: r.extra.0,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

pub(crate) fn into_contests(rows: Vec<ContestRow>) -> Result<Vec<Contest>, AppError> {
    rows.into_iter().map(Contest::try_from).collect()
}

/// Escapes `LIKE` wildcards so user input matches literally.
fn escape_like(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

#[async_trait]
impl ContestRepository for PgContestRepository {
    async fn create(&self, new_contest: NewContest) -> Result<Contest, AppError> {
        let row = sqlx::query_as::<_, ContestRow>(
            r#"
            INSERT INTO contests (
                creator_email, creator_name, creator_image, name, contest_type,
                image, description, task, price, prize_money, deadline, extra
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING *
            "#,
        )
        .bind(new_contest.creator_email)
        .bind(new_contest.creator_name)
        .bind(new_contest.creator_image)
        .bind(new_contest.name)
        .bind(new_contest.contest_type)
        .bind(new_contest.image)
        .bind(new_contest.description)
        .bind(new_contest.task)
        .bind(new_contest.price)
        .bind(new_contest.prize_money)
        .bind(new_contest.deadline)
        .bind(Json(new_contest.extra))
        .fetch_one(self.pool.as_ref())
        .await?;

        Contest::try_from(row)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Contest>, AppError> {
        let row = sqlx::query_as::<_, ContestRow>("SELECT * FROM contests WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool.as_ref())
            .await?;

        row.map(Contest::try_from).transpose()
    }

    async fn list(&self, status: Option<ContestStatus>) -> Result<Vec<Contest>, AppError> {
        let rows = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT * FROM contests
            WHERE ($1::TEXT IS NULL OR status = $1)
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(status.map(|s| s.as_str()))
        .fetch_all(self.pool.as_ref())
        .await?;

        into_contests(rows)
    }

    async fn list_by_creator(&self, creator_email: &str) -> Result<Vec<Contest>, AppError> {
        let rows = sqlx::query_as::<_, ContestRow>(
            "SELECT * FROM contests WHERE creator_email = $1 ORDER BY created_at DESC, id DESC",
        )
        .bind(creator_email)
        .fetch_all(self.pool.as_ref())
        .await?;

        into_contests(rows)
    }

    async fn update_unless_approved(
        &self,
        id: i64,
        patch: ContestPatch,
    ) -> Result<Option<Contest>, AppError> {
        let row = sqlx::query_as::<_, ContestRow>(
            r#"
            UPDATE contests SET
                name         = COALESCE($2, name),
                contest_type = COALESCE($3, contest_type),
                image        = COALESCE($4, image),
                description  = COALESCE($5, description),
                task         = COALESCE($6, task),
                price        = COALESCE($7, price),
                prize_money  = COALESCE($8, prize_money),
                deadline     = COALESCE($9, deadline),
                extra        = extra || $10::JSONB,
                updated_at   = NOW()
            WHERE id = $1 AND status <> 'approved'
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(patch.name)
        .bind(patch.contest_type)
        .bind(patch.image)
        .bind(patch.description)
        .bind(patch.task)
        .bind(patch.price)
        .bind(patch.prize_money)
        .bind(patch.deadline)
        .bind(Json(patch.extra))
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(Contest::try_from).transpose()
    }

    async fn set_status(&self, id: i64, status: ContestStatus) -> Result<bool, AppError> {
        let result =
            sqlx::query("UPDATE contests SET status = $2, updated_at = NOW() WHERE id = $1")
                .bind(id)
                .bind(status.as_str())
                .execute(self.pool.as_ref())
                .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_unless_approved(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contests WHERE id = $1 AND status <> 'approved'")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM contests WHERE id = $1")
            .bind(id)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn top_by_participation(&self, limit: i64) -> Result<Vec<Contest>, AppError> {
        let rows = sqlx::query_as::<_, ContestRow>(
            "SELECT * FROM contests ORDER BY participate_count DESC, id ASC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        into_contests(rows)
    }

    async fn search_by_type(&self, query: &str) -> Result<Vec<Contest>, AppError> {
        let rows = sqlx::query_as::<_, ContestRow>(
            r#"
            SELECT * FROM contests
            WHERE contest_type ILIKE '%' || $1 || '%' ESCAPE '\'
            ORDER BY participate_count DESC, id ASC
            "#,
        )
        .bind(escape_like(query))
        .fetch_all(self.pool.as_ref())
        .await?;

        into_contests(rows)
    }
}
