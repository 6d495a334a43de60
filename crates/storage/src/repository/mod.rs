//! Entity Store contracts and their implementations.
//!
//! Services depend on the traits below; the Postgres [`Database`] and the
//! [`MemoryStore`] both implement them.

pub mod athlete;
pub mod category;
pub mod memory;
pub mod training_center;

use async_trait::async_trait;
use uuid::Uuid;

use crate::Database;
use crate::dto::athlete::AthleteFilter;
use crate::dto::category::CategoryFilter;
use crate::dto::common::PaginationParams;
use crate::dto::training_center::TrainingCenterFilter;
use crate::error::Result;
use crate::models::{
    Athlete, AthleteRecord, Category, NewCategory, NewTrainingCenter, TrainingCenter,
};

pub use athlete::AthleteRepository;
pub use category::CategoryRepository;
pub use memory::MemoryStore;
pub use training_center::TrainingCenterRepository;

#[async_trait]
pub trait CategoryStore: Send + Sync {
    async fn insert_category(&self, category: &NewCategory) -> Result<Category>;

    /// Returns one page of matches in insertion order plus the total match count.
    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Category>, i64)>;

    async fn find_category(&self, id: Uuid) -> Result<Category>;

    async fn find_category_by_name(&self, nome: &str) -> Result<Option<Category>>;
}

#[async_trait]
pub trait TrainingCenterStore: Send + Sync {
    async fn insert_training_center(&self, center: &NewTrainingCenter) -> Result<TrainingCenter>;

    async fn list_training_centers(
        &self,
        filter: &TrainingCenterFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<TrainingCenter>, i64)>;

    async fn find_training_center(&self, id: Uuid) -> Result<TrainingCenter>;

    async fn find_training_center_by_name(&self, nome: &str) -> Result<Option<TrainingCenter>>;
}

#[async_trait]
pub trait AthleteStore: Send + Sync {
    async fn insert_athlete(&self, athlete: &Athlete) -> Result<AthleteRecord>;

    async fn list_athletes(
        &self,
        filter: &AthleteFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)>;

    async fn find_athlete(&self, id: Uuid) -> Result<AthleteRecord>;

    /// Persists every column of `athlete`, keyed by its `id`.
    async fn update_athlete(&self, athlete: &Athlete) -> Result<AthleteRecord>;

    async fn delete_athlete(&self, id: Uuid) -> Result<()>;
}

/// Everything the HTTP layer needs from persistence.
pub trait EntityStore: CategoryStore + TrainingCenterStore + AthleteStore {}

impl<T> EntityStore for T where T: CategoryStore + TrainingCenterStore + AthleteStore {}

/// Escapes `LIKE` metacharacters and wraps the term for substring matching.
pub(crate) fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[async_trait]
impl CategoryStore for Database {
    async fn insert_category(&self, category: &NewCategory) -> Result<Category> {
        CategoryRepository::new(self.pool()).create(category).await
    }

    async fn list_categories(
        &self,
        filter: &CategoryFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<Category>, i64)> {
        CategoryRepository::new(self.pool())
            .list(filter, pagination)
            .await
    }

    async fn find_category(&self, id: Uuid) -> Result<Category> {
        CategoryRepository::new(self.pool()).find_by_id(id).await
    }

    async fn find_category_by_name(&self, nome: &str) -> Result<Option<Category>> {
        CategoryRepository::new(self.pool()).find_by_name(nome).await
    }
}

#[async_trait]
impl TrainingCenterStore for Database {
    async fn insert_training_center(&self, center: &NewTrainingCenter) -> Result<TrainingCenter> {
        TrainingCenterRepository::new(self.pool())
            .create(center)
            .await
    }

    async fn list_training_centers(
        &self,
        filter: &TrainingCenterFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<TrainingCenter>, i64)> {
        TrainingCenterRepository::new(self.pool())
            .list(filter, pagination)
            .await
    }

    async fn find_training_center(&self, id: Uuid) -> Result<TrainingCenter> {
        TrainingCenterRepository::new(self.pool())
            .find_by_id(id)
            .await
    }

    async fn find_training_center_by_name(&self, nome: &str) -> Result<Option<TrainingCenter>> {
        TrainingCenterRepository::new(self.pool())
            .find_by_name(nome)
            .await
    }
}

#[async_trait]
impl AthleteStore for Database {
    async fn insert_athlete(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        AthleteRepository::new(self.pool()).create(athlete).await
    }

    async fn list_athletes(
        &self,
        filter: &AthleteFilter,
        pagination: &PaginationParams,
    ) -> Result<(Vec<AthleteRecord>, i64)> {
        AthleteRepository::new(self.pool())
            .list(filter, pagination)
            .await
    }

    async fn find_athlete(&self, id: Uuid) -> Result<AthleteRecord> {
        AthleteRepository::new(self.pool()).find_by_id(id).await
    }

    async fn update_athlete(&self, athlete: &Athlete) -> Result<AthleteRecord> {
        AthleteRepository::new(self.pool()).update(athlete).await
    }

    async fn delete_athlete(&self, id: Uuid) -> Result<()> {
        AthleteRepository::new(self.pool()).delete(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::like_pattern;

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("Sca"), "%Sca%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }
}
