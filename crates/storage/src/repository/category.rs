use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::like_pattern;
use crate::dto::category::CategoryFilter;
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{Category, NewCategory};

pub struct CategoryRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CategoryRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List categories matching the filter, in insertion order
    pub async fn list(
        &self,
        filter: &CategoryFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Category>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM categorias WHERE 1=1");
        push_filter(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new("SELECT pk_id, id, nome FROM categorias WHERE 1=1");
        push_filter(&mut query, filter);
        query.push(" ORDER BY pk_id LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let categories: Vec<Category> = query.build_query_as().fetch_all(self.pool).await?;

        Ok((categories, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Category> {
        sqlx::query_as::<_, Category>("SELECT pk_id, id, nome FROM categorias WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Exact-name lookup used to resolve athlete references
    pub async fn find_by_name(&self, nome: &str) -> Result<Option<Category>> {
        let category =
            sqlx::query_as::<_, Category>("SELECT pk_id, id, nome FROM categorias WHERE nome = $1")
                .bind(nome)
                .fetch_optional(self.pool)
                .await?;

        Ok(category)
    }

    pub async fn create(&self, category: &NewCategory) -> Result<Category> {
        sqlx::query_as::<_, Category>(
            "INSERT INTO categorias (id, nome) VALUES ($1, $2) RETURNING pk_id, id, nome",
        )
        .bind(category.id)
        .bind(&category.nome)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &CategoryFilter) {
    if let Some(nome) = filter.nome.as_deref().filter(|n| !n.is_empty()) {
        query.push(" AND nome ILIKE ");
        query.push_bind(like_pattern(nome));
    }
}
