use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use super::like_pattern;
use crate::dto::athlete::AthleteFilter;
use crate::dto::common::PaginationParams;
use crate::error::{Result, StorageError};
use crate::models::{Athlete, AthleteRecord};

/// Joins an athlete relation aliased `a` with its category and training
/// center so every read returns the referenced names alongside the row.
const RECORD_SELECT: &str = r#"
    SELECT a.id, a.created_at, a.nome, a.cpf, a.idade, a.peso, a.altura, a.sexo,
           a.categoria_id, a.centro_treinamento_id,
           c.nome AS categoria_nome,
           ct.nome AS centro_treinamento_nome
"#;

const RECORD_JOINS: &str = r#"
    JOIN categorias c ON c.pk_id = a.categoria_id
    JOIN centros_treinamento ct ON ct.pk_id = a.centro_treinamento_id
"#;

pub struct AthleteRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> AthleteRepository<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// List athletes matching the filter, in insertion order
    pub async fn list(
        &self,
        filter: &AthleteFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)> {
        let mut count = QueryBuilder::new("SELECT COUNT(*) FROM atletas a WHERE 1=1");
        push_filter(&mut count, filter);
        let total_items = count
            .build_query_scalar::<i64>()
            .fetch_one(self.pool)
            .await?;

        let mut query = QueryBuilder::new(RECORD_SELECT);
        query.push(" FROM atletas a ");
        query.push(RECORD_JOINS);
        query.push(" WHERE 1=1");
        push_filter(&mut query, filter);
        query.push(" ORDER BY a.pk_id LIMIT ");
        query.push_bind(pagination.limit());
        query.push(" OFFSET ");
        query.push_bind(pagination.offset());

        let athletes: Vec<AthleteRecord> = query.build_query_as().fetch_all(self.pool).await?;

        Ok((athletes, total_items))
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<AthleteRecord> {
        let sql = format!("{RECORD_SELECT} FROM atletas a {RECORD_JOINS} WHERE a.id = $1");

        sqlx::query_as::<_, AthleteRecord>(&sql)
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or(StorageError::NotFound)
    }

    /// Insert a new athlete. A duplicate `cpf` surfaces as
    /// [`StorageError::UniqueViolation`].
    pub async fn create(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        let sql = format!(
            r#"
            WITH a AS (
                INSERT INTO atletas (id, created_at, nome, cpf, idade, peso, altura, sexo,
                                     categoria_id, centro_treinamento_id)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING *
            )
            {RECORD_SELECT} FROM a {RECORD_JOINS}
            "#
        );

        sqlx::query_as::<_, AthleteRecord>(&sql)
            .bind(athlete.id)
            .bind(athlete.created_at)
            .bind(&athlete.nome)
            .bind(&athlete.cpf)
            .bind(athlete.idade)
            .bind(athlete.peso)
            .bind(athlete.altura)
            .bind(&athlete.sexo)
            .bind(athlete.categoria_id)
            .bind(athlete.centro_treinamento_id)
            .fetch_one(self.pool)
            .await
            .map_err(|e| StorageError::from(e).classify())
    }

    /// Overwrite every mutable column of an existing athlete
    pub async fn update(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        let sql = format!(
            r#"
            WITH a AS (
                UPDATE atletas
                SET nome = $2,
                    cpf = $3,
                    idade = $4,
                    peso = $5,
                    altura = $6,
                    sexo = $7,
                    categoria_id = $8,
                    centro_treinamento_id = $9
                WHERE id = $1
                RETURNING *
            )
            {RECORD_SELECT} FROM a {RECORD_JOINS}
            "#
        );

        sqlx::query_as::<_, AthleteRecord>(&sql)
            .bind(athlete.id)
            .bind(&athlete.nome)
            .bind(&athlete.cpf)
            .bind(athlete.idade)
            .bind(athlete.peso)
            .bind(athlete.altura)
            .bind(&athlete.sexo)
            .bind(athlete.categoria_id)
            .bind(athlete.centro_treinamento_id)
            .fetch_optional(self.pool)
            .await
            .map_err(|e| StorageError::from(e).classify())?
            .ok_or(StorageError::NotFound)
    }

    /// Delete an athlete by ID
    pub async fn delete(&self, id: Uuid) -> Result<()> {
        let result = sqlx::query("DELETE FROM atletas WHERE id = $1")
            .bind(id)
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}

fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &AthleteFilter) {
    if let Some(nome) = filter.nome.as_deref().filter(|n| !n.is_empty()) {
        query.push(" AND a.nome ILIKE ");
        query.push_bind(like_pattern(nome));
    }

    if let Some(cpf) = filter.cpf.as_deref().filter(|c| !c.is_empty()) {
        query.push(" AND a.cpf = ");
        query.push_bind(cpf.to_string());
    }
}
