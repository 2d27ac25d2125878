use crate::domain::{models::selection::Selection, ports::SelectionRepository};
use crate::error::{is_unique_violation, AppError};
use async_trait::async_trait;
use sqlx::PgPool;

pub struct PostgresSelectionRepo {
    pool: PgPool,
}

impl PostgresSelectionRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SelectionRepository for PostgresSelectionRepo {
    async fn record(&self, selection: &Selection) -> Result<Selection, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        let result = sqlx::query("UPDATE invites SET used_at = $1 WHERE id = $2 AND used_at IS NULL")
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
               VALUES ($1, $2, $3, $4, $5, $6, $7)
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
        sqlx::query_as::<_, Selection>("SELECT * FROM selections WHERE invite_id = $1")
            .bind(invite_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)
    }
}
