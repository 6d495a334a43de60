use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::like_pattern;
use crate::dto::common::PaginationParams;
use crate::dto::training_center::TrainingCenterFilter;
use crate::error::{Result, StorageError};
use crate::models::{NewTrainingCenter, TrainingCenter};

const COLUMNS: &str = "pk_id, id, nome, endereco, proprietario";

pub struct TrainingCenterRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> TrainingCenterRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(
        &self,
        filter: &TrainingCenterFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<TrainingCenter>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM centros_treinamento WHERE 1=1");
        push_filter(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(format!(
            "SELECT {COLUMNS} FROM centros_treinamento WHERE 1=1"
        ));
        push_filter(&mut query, filter);
        query.push(" ORDER BY pk_id LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let centers: Vec<TrainingCenter> = query.build_query_as().fetch_all(self.pool).await?;

        Ok((centers, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(&format!(
            "SELECT {COLUMNS} FROM centros_treinamento WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(StorageError::NotFound)
    }

    pub async fn find_by_name(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        let center = sqlx::query_as::<_, TrainingCenter>(&format!(
            "SELECT {COLUMNS} FROM centros_treinamento WHERE nome = $1"
        ))
        .bind(nome)
        .fetch_optional(self.pool)
        .await?;

        Ok(center)
    }

    pub async fn create(&self, center: &NewTrainingCenter) -> Result<TrainingCenter> {
        sqlx::query_as::<_, TrainingCenter>(&format!(
            r#"
            INSERT INTO centros_treinamento (id, nome, endereco, proprietario)
            VALUES ($1, $2, $3, $4)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(center.id)
        .bind(&center.nome)
        .bind(&center.endereco)
        .bind(&center.proprietario)
        .fetch_one(self.pool)
        .await
        .map_err(|e| StorageError::from(e).classify())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &TrainingCenterFilter) {
    if let Some(nome) = filter.nome.as_deref().filter(|n| !n.is_empty()) {
        query.push(" AND nome ILIKE ");
        query.push_bind(like_pattern(nome));
    }
}
