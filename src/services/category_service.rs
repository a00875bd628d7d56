//! Category service

use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::{
    db::repositories::CategoryRepository,
    error::{AppError, AppResult},
    models::Category,
    utils::sanitize_string,
};

/// Category service
pub struct CategoryService;

impl CategoryService {
    /// List all categories
    pub async fn list_categories(pool: &PgPool) -> AppResult<Vec<Category>> {
        CategoryRepository::list(pool).await
    }

    /// Create a category
    pub async fn create_category(
        pool: &PgPool,
        name: &str,
        description: Option<&str>,
    ) -> AppResult<Category> {
        let category =
            CategoryRepository::create(pool, &sanitize_string(name), description).await?;

        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// Update a category
    pub async fn update_category(
        pool: &PgPool,
        id: &Uuid,
        name: Option<&str>,
        description: Option<&str>,
    ) -> AppResult<Category> {
        let name = name.map(sanitize_string);

        CategoryRepository::update(pool, id, name.as_deref(), description)
            .await?
            .ok_or_else(|| AppError::NotFound("Category not found".to_string()))
    }

    /// Delete a category that no event uses
    pub async fn delete_category(pool: &PgPool, id: &Uuid) -> AppResult<()> {
        if !CategoryRepository::delete_unreferenced(pool, id).await? {
            return Err(AppError::NotFound("Category not found".to_string()));
        }

        info!(category_id = %id, "Category deleted");
        Ok(())
    }
}
