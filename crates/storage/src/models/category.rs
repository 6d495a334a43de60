use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Category {
    /// Internal key referenced by `atletas.categoria_id`.
    #[serde(skip)]
    pub pk_id: i32,
    pub id: Uuid,
    pub nome: String,
}

/// A category that has not been persisted yet.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub id: Uuid,
    pub nome: String,
}
