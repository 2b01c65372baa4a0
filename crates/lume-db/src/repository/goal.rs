//! # Goal Repository
//!
//! Database operations for monthly profit goals.
//!
//! The table carries no UNIQUE constraint on `(user_id, month)`; the
//! one-goal-per-month rule is enforced by the provider's upsert-by-lookup
//! (find the month's row, update it if present, insert otherwise).

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use lume_core::Goal;

#[derive(Debug, sqlx::FromRow)]
struct GoalRow {
    id: String,
    user_id: String,
    month: String,
    target_cents: i64,
    created_at: DateTime<Utc>,
}

impl From<GoalRow> for Goal {
    fn from(row: GoalRow) -> Self {
        Goal {
            id: row.id,
            user_id: row.user_id,
            month: row.month,
            target_cents: row.target_cents,
            created_at: row.created_at,
        }
    }
}

/// Repository for goal database operations.
#[derive(Debug, Clone)]
pub struct GoalRepository {
    pool: SqlitePool,
}

impl GoalRepository {
    /// Creates a new GoalRepository.
    pub fn new(pool: SqlitePool) -> Self {
        GoalRepository { pool }
    }

    /// Lists all goals for a user, most recent month first.
    pub async fn list_for_user(&self, user_id: &str) -> DbResult<Vec<Goal>> {
        let rows: Vec<GoalRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, month, target_cents, created_at
            FROM goals
            WHERE user_id = ?1
            ORDER BY month DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Goal::from).collect())
    }

    /// Finds the goal for a specific month, if one exists.
    ///
    /// `month` is a `"YYYY-MM"` key. This is the lookup half of the
    /// provider's upsert-by-lookup.
    pub async fn find_by_month(&self, user_id: &str, month: &str) -> DbResult<Option<Goal>> {
        let row: Option<GoalRow> = sqlx::query_as(
            r#"
            SELECT id, user_id, month, target_cents, created_at
            FROM goals
            WHERE user_id = ?1 AND month = ?2
            "#,
        )
        .bind(user_id)
        .bind(month)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Goal::from))
    }

    /// Inserts a goal row.
    pub async fn insert(&self, goal: &Goal) -> DbResult<()> {
        debug!(id = %goal.id, month = %goal.month, "Inserting goal");

        sqlx::query(
            r#"
            INSERT INTO goals (id, user_id, month, target_cents, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&goal.id)
        .bind(&goal.user_id)
        .bind(&goal.month)
        .bind(goal.target_cents)
        .bind(goal.created_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Overwrites the target of an existing goal, scoped to the owning user.
    pub async fn update_target(&self, id: &str, user_id: &str, target_cents: i64) -> DbResult<()> {
        debug!(id = %id, target_cents, "Updating goal target");

        let result = sqlx::query(
            "UPDATE goals SET target_cents = ?3 WHERE id = ?1 AND user_id = ?2",
        )
        .bind(id)
        .bind(user_id)
        .bind(target_cents)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Goal", id));
        }

        Ok(())
    }

    /// Deletes a goal by id, scoped to the owning user.
    pub async fn delete(&self, id: &str, user_id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting goal");

        let result = sqlx::query("DELETE FROM goals WHERE id = ?1 AND user_id = ?2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Goal", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
