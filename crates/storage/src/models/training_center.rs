use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct TrainingCenter {
    #[serde(skip)]
    pub pk_id: i32,
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub proprietario: String,
}

#[derive(Debug, Clone)]
pub struct NewTrainingCenter {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub proprietario: String,
}
