//! Category repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::Category,
};

/// Repository for category database operations
pub struct CategoryRepository;

impl CategoryRepository {
    /// List all categories ordered by name
    pub async fn list(pool: &PgPool) -> AppResult<Vec<Category>> {
        let categories =
            sqlx::query_as::<_, Category>(r#"SELECT * FROM categories ORDER BY name ASC"#)
                .fetch_all(pool)
                .await?;

        Ok(categories)
    }

    /// Find category by ID
    pub async fn find_by_id(pool: &PgPool, id: &Uuid) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(r#"SELECT * FROM categories WHERE id = $1"#)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        Ok(category)
    }

    /// Create a category
    pub async fn create(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Category> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            INSERT INTO categories (name, description)
            VALUES ($1, $2)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .fetch_one(pool)
        .await
        .map_err(duplicate_name)?;

        Ok(category)
    }

    /// Update a category
    pub async fn update(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>(
            r#"
            UPDATE categories
            SET name = COALESCE($2, name), description = COALESCE($3, description)
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(name)
        .bind(description)
        .fetch_optional(pool)
        .await
        .map_err(duplicate_name)?;

        Ok(category)
    }

    /// Delete a category unless an event still references it.
    ///
    /// Returns `Ok(false)` when the category does not exist.
    pub async fn delete_unreferenced(pool: &PgPool, id: &Uuid) -> AppResult<bool> {
        let mut tx = pool.begin().await?;

        let exists: Option<Uuid> =
            sqlx::query_scalar(r#"SELECT id FROM categories WHERE id = $1 FOR UPDATE"#)
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;
        if exists.is_none() {
            return Ok(false);
        }

        let in_use: i64 =
            sqlx::query_scalar(r#"SELECT COUNT(*) FROM events WHERE category_id = $1"#)
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if in_use > 0 {
            return Err(AppError::Conflict(format!(
                "Category is used by {} event(s)",
                in_use
            )));
        }

        sqlx::query(r#"DELETE FROM categories WHERE id = $1"#)
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(true)
    }
}

fn duplicate_name(err: sqlx::Error) -> AppError {
    match &err {
        sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
            AppError::Conflict("Category name already exists".to_string())
        }
        _ => err.into(),
    }
}
