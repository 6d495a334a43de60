use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Athlete row as written to `atletas`. Foreign keys hold the internal
/// `pk_id` of the referenced category and training center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Athlete {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub categoria_id: i32,
    pub centro_treinamento_id: i32,
}

/// Athlete row joined with the names of its category and training center.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct AthleteRecord {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub athlete: Athlete,
    pub categoria_nome: String,
    pub centro_treinamento_nome: String,
}
