use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewTrainingCenter, TrainingCenter};

/// Request payload for creating a new training center
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateTrainingCenterRequest {
    #[validate(length(min = 1, max = 20, message = "nome must be between 1 and 20 characters"))]
    #[schema(example = "CT King")]
    pub nome: String,

    #[validate(length(min = 1, max = 60, message = "endereco must be between 1 and 60 characters"))]
    #[schema(example = "Rua X, Q 5")]
    pub endereco: String,

    #[validate(length(
        min = 1,
        max = 30,
        message = "proprietario must be between 1 and 30 characters"
    ))]
    #[schema(example = "Fernando Bola")]
    pub proprietario: String,
}

impl CreateTrainingCenterRequest {
    pub fn into_new(self) -> NewTrainingCenter {
        NewTrainingCenter {
            id: Uuid::new_v4(),
            nome: self.nome,
            endereco: self.endereco,
            proprietario: self.proprietario,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct TrainingCenterResponse {
    pub id: Uuid,
    pub nome: String,
    pub endereco: String,
    pub proprietario: String,
}

impl From<TrainingCenter> for TrainingCenterResponse {
    fn from(center: TrainingCenter) -> Self {
        Self {
            id: center.id,
            nome: center.nome,
            endereco: center.endereco,
            proprietario: center.proprietario,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TrainingCenterFilter {
    /// Case-insensitive substring of the training center name
    pub nome: Option<String>,
}
