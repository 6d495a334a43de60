//! In-memory Entity Store for tests and database-less development runs.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use uuid::Uuid;

use super::{AthleteStore, CategoryStore, TrainingCenterStore};
use crate::dto::athlete::AthleteFilter;
use crate::dto::category::CategoryFilter;
use crate::dto::common::PaginationParams;
use crate::dto::training_center::TrainingCenterFilter;
use crate::error::{Result, StorageError};
use crate::models::{
    Athlete, AthleteRecord, Category, NewCategory, NewTrainingCenter, TrainingCenter,
};

#[derive(Debug, Default)]
struct Tables {
    next_pk: i32,
    categories: Vec<Category>,
    centers: Vec<TrainingCenter>,
    athletes: Vec<Athlete>,
}

impl Tables {
    fn next_pk(&mut self) -> i32 {
        self.next_pk += 1;
        self.next_pk
    }

    fn record(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        let category = self
            .categories
            .iter()
            .find(|c| c.pk_id == athlete.categoria_id)
            .ok_or_else(|| StorageError::ForeignKeyViolation("atletas_categoria_id_fkey".into()))?;
        let center = self
            .centers
            .iter()
            .find(|c| c.pk_id == athlete.centro_treinamento_id)
            .ok_or_else(|| {
                StorageError::ForeignKeyViolation("atletas_centro_treinamento_id_fkey".into())
            })?;

        Ok(AthleteRecord {
            athlete: athlete.clone(),
            categoria_nome: category.nome.clone(),
            centro_treinamento_nome: center.nome.clone(),
        })
    }

    fn cpf_taken(&self, cpf: &str, except: Option<Uuid>) -> bool {
        self.athletes
            .iter()
            .any(|a| a.cpf == cpf && Some(a.id) != except)
    }
}

/// Entity Store kept in process memory.
///
/// Enforces the same unique and foreign-key rules as the Postgres schema.
/// Each write holds the lock for its whole check-then-insert sequence.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

fn name_matches(nome: &str, filter: Option<&str>) -> bool {
    filter.is_none_or(|term| contains_ignore_case(nome, term))
}

fn paginate<T: Clone>(rows: Vec<&T>, pagination: &PaginationParams) -> (Vec<T>, i64) {
    let total = rows.len() as i64;
    let page = rows
        .into_iter()
        .skip(usize::try_from(pagination.offset()).unwrap_or(usize::MAX))
        .take(usize::try_from(pagination.limit()).unwrap_or(usize::MAX))
        .cloned()
        .collect();
    (page, total)
}

#[async_trait]
impl CategoryStore for MemoryStore {
    async fn insert_category(&self, category: &NewCategory) -> Result<Category> {
        let mut tables = self.tables.write()?;
        if tables.categories.iter().any(|c| c.nome == category.nome) {
            return Err(StorageError::UniqueViolation("categorias_nome_key".into()));
        }

        let row = Category {
            pk_id: tables.next_pk(),
            id: category.id,
            nome: category.nome.clone(),
        };
        tables.categories.push(row.clone());
        Ok(row)
    }

    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Category>, i64)> {
        let tables = self.tables.read()?;
        let term = filter.nome.as_deref().filter(|n| !n.is_empty());
        let matches = tables
            .categories
            .iter()
            .filter(|c| name_matches(&c.nome, term))
            .collect();
        Ok(paginate(matches, pagination))
    }

    async fn find_category(&self, id: Uuid) -> Result<Category> {
        let tables = self.tables.read()?;
        tables
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_category_by_name(&self, nome: &str) -> Result<Option<Category>> {
        let tables = self.tables.read()?;
        Ok(tables.categories.iter().find(|c| c.nome == nome).cloned())
    }
}

#[async_trait]
impl TrainingCenterStore for MemoryStore {
    async fn insert_training_center(&self, center: &NewTrainingCenter) -> Result<TrainingCenter> {
        let mut tables = self.tables.write()?;
        if tables.centers.iter().any(|c| c.nome == center.nome) {
            return Err(StorageError::UniqueViolation(
                "centros_treinamento_nome_key".into(),
            ));
        }

        let row = TrainingCenter {
            pk_id: tables.next_pk(),
            id: center.id,
            nome: center.nome.clone(),
            endereco: center.endereco.clone(),
            proprietario: center.proprietario.clone(),
        };
        tables.centers.push(row.clone());
        Ok(row)
    }

    async fn list_training_centers(
        &self,
        filter: &TrainingCenterFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<TrainingCenter>, i64)> {
        let tables = self.tables.read()?;
        let term = filter.nome.as_deref().filter(|n| !n.is_empty());
        let matches = tables
            .centers
            .iter()
            .filter(|c| name_matches(&c.nome, term))
            .collect();
        Ok(paginate(matches, pagination))
    }

    async fn find_training_center(&self, id: Uuid) -> Result<TrainingCenter> {
        let tables = self.tables.read()?;
        tables
            .centers
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn find_training_center_by_name(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        let tables = self.tables.read()?;
        Ok(tables.centers.iter().find(|c| c.nome == nome).cloned())
    }
}

#[async_trait]
impl AthleteStore for MemoryStore {
    async fn insert_athlete(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        let mut tables = self.tables.write()?;
        if tables.cpf_taken(&athlete.cpf, None) {
            return Err(StorageError::UniqueViolation("atletas_cpf_key".into()));
        }

        let record = tables.record(athlete)?;
        tables.athletes.push(athlete.clone());
        Ok(record)
    }

    async fn list_athletes(
        &self,
        filter: &AthleteFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)> {
        let tables = self.tables.read()?;
        let term = filter.nome.as_deref().filter(|n| !n.is_empty());
        let cpf = filter.cpf.as_deref().filter(|c| !c.is_empty());

        let matches: Vec<&Athlete> = tables
            .athletes
            .iter()
            .filter(|a| name_matches(&a.nome, term))
            .filter(|a| cpf.is_none_or(|cpf| a.cpf == cpf))
            .collect();

        let (page, total) = paginate(matches, pagination);
        let records = page
            .iter()
            .map(|a| tables.record(a))
            .collect::<Result<Vec<_>>>()?;
        Ok((records, total))
    }

    async fn find_athlete(&self, id: Uuid) -> Result<AthleteRecord> {
        let tables = self.tables.read()?;
        let athlete = tables
            .athletes
            .iter()
            .find(|a| a.id == id)
            .ok_or(StorageError::NotFound)?;
        tables.record(athlete)
    }

    async fn update_athlete(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        let mut tables = self.tables.write()?;
        if tables.cpf_taken(&athlete.cpf, Some(athlete.id)) {
            return Err(StorageError::UniqueViolation("atletas_cpf_key".into()));
        }

        let record = tables.record(athlete)?;
        let slot = tables
            .athletes
            .iter_mut()
            .find(|a| a.id == athlete.id)
            .ok_or(StorageError::NotFound)?;
        // created_at is immutable, as in the UPDATE statement
        let created_at = slot.created_at;
        *slot = Athlete {
            created_at,
            ..athlete.clone()
        };

        Ok(AthleteRecord {
            athlete: slot.clone(),
            ..record
        })
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<()> {
        let mut tables = self.tables.write()?;
        let before = tables.athletes.len();
        tables.athletes.retain(|a| a.id != id);

        if tables.athletes.len() == before {
            return Err(StorageError::NotFound);
        }

        Ok(())
    }
}
