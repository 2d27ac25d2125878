use crate::domain::{models::selection::Selection, ports::SelectionRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteSelectionRepo {
    pool: SqlitePool,
}

impl SqliteSelectionRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SelectionRepository for SqliteSelectionRepo {
    async fn record(&self, selection: &Selection) -> Result<Selection, AppError> {
        // Both statements commit or roll back together: an invite is used
        // if and only if its selection exists. The used_at guard catches a
        // concurrent submission that got there first; the unique constraint
        // on invite_id is the authoritative tie-breaker if it slips past.
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE invites SET used_at = ? WHERE id = ? AND used_at IS NULL")
            .bind(selection.created_at)
            .bind(&selection.invite_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::Database)?;

        if result.rows_affected() == 0 {
            return Err(AppError::AlreadyUsed);
        }

        let created = sqlx::query_as::<_, Selection>(
            r#"INSERT INTO selections (id, invite_id, dinner, activity, mood, notes, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?)
               RETURNING *"#
        )
            .bind(&selection.id)
            .bind(&selection.invite_id)
            .bind(&selection.dinner)
            .bind(&selection.activity)
            .bind(&selection.mood)
            .bind(&selection.notes)
            .bind(selection.created_at)
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) { AppError::AlreadyUsed } else { AppError::Database(e) }
            })?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_invite(&self, invite_id: &str) -> Result<Option<Selection>, AppError> {
        sqlx::query_as::<_, Selection>("SELECT * FROM selections WHERE invite_id = ?")
            .bind(invite_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
