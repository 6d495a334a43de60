use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use super::common::NameRef;
use crate::models::{Athlete, AthleteRecord, Category, TrainingCenter};

/// Request payload for registering a new athlete. The category and training
/// center are referenced by name and resolved before insert.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateAthleteRequest {
    #[validate(length(min = 1, max = 50, message = "nome must be between 1 and 50 characters"))]
    #[schema(example = "Joao")]
    pub nome: String,

    #[validate(length(min = 1, max = 11, message = "cpf must be between 1 and 11 characters"))]
    #[schema(example = "12345678900")]
    pub cpf: String,

    #[validate(range(min = 0, message = "idade must not be negative"))]
    #[schema(example = 25)]
    pub idade: i32,

    #[validate(range(exclusive_min = 0.0, message = "peso must be positive"))]
    #[schema(example = 75.5)]
    pub peso: f64,

    #[validate(range(exclusive_min = 0.0, message = "altura must be positive"))]
    #[schema(example = 1.70)]
    pub altura: f64,

    #[validate(length(equal = 1, message = "sexo must be a single character"))]
    #[schema(example = "M")]
    pub sexo: String,

    #[validate(nested)]
    pub categoria: NameRef,

    #[validate(nested)]
    pub centro_treinamento: NameRef,
}

impl CreateAthleteRequest {
    /// Builds the storage row once both references have been resolved.
    pub fn into_row(self, category: &Category, center: &TrainingCenter) -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            nome: self.nome,
            cpf: self.cpf,
            idade: self.idade,
            peso: self.peso,
            altura: self.altura,
            sexo: self.sexo,
            categoria_id: category.pk_id,
            centro_treinamento_id: center.pk_id,
        }
    }
}

/// Partial update: absent fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateAthleteRequest {
    #[validate(length(min = 1, max = 50))]
    pub nome: Option<String>,

    #[validate(length(min = 1, max = 11))]
    pub cpf: Option<String>,

    #[validate(range(min = 0))]
    pub idade: Option<i32>,

    #[validate(range(exclusive_min = 0.0))]
    pub peso: Option<f64>,

    #[validate(range(exclusive_min = 0.0))]
    pub altura: Option<f64>,

    #[validate(length(equal = 1))]
    pub sexo: Option<String>,

    #[validate(nested)]
    pub categoria: Option<NameRef>,

    #[validate(nested)]
    pub centro_treinamento: Option<NameRef>,
}

impl UpdateAthleteRequest {
    /// Overwrites the scalar fields present in the request. Reference changes
    /// are resolved by the caller and passed in as already-looked-up rows.
    pub fn apply(
        &self,
        mut athlete: Athlete,
        category: Option<&Category>,
        center: Option<&TrainingCenter>,
    ) -> Athlete {
        if let Some(nome) = &self.nome {
            athlete.nome = nome.clone();
        }
        if let Some(cpf) = &self.cpf {
            athlete.cpf = cpf.clone();
        }
        if let Some(idade) = self.idade {
            athlete.idade = idade;
        }
        if let Some(peso) = self.peso {
            athlete.peso = peso;
        }
        if let Some(altura) = self.altura {
            athlete.altura = altura;
        }
        if let Some(sexo) = &self.sexo {
            athlete.sexo = sexo.clone();
        }
        if let Some(category) = category {
            athlete.categoria_id = category.pk_id;
        }
        if let Some(center) = center {
            athlete.centro_treinamento_id = center.pk_id;
        }
        athlete
    }
}

/// Summary returned after registration
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteSummaryResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub nome: String,
    pub categoria: NameRef,
    pub centro_treinamento: NameRef,
}

/// Full athlete view
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AthleteResponse {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub nome: String,
    pub cpf: String,
    pub idade: i32,
    pub peso: f64,
    pub altura: f64,
    pub sexo: String,
    pub categoria: NameRef,
    pub centro_treinamento: NameRef,
}

impl From<AthleteRecord> for AthleteSummaryResponse {
    fn from(record: AthleteRecord) -> Self {
        Self {
            id: record.athlete.id,
            created_at: record.athlete.created_at,
            nome: record.athlete.nome,
            categoria: NameRef::new(record.categoria_nome),
            centro_treinamento: NameRef::new(record.centro_treinamento_nome),
        }
    }
}

impl From<AthleteRecord> for AthleteResponse {
    fn from(record: AthleteRecord) -> Self {
        let AthleteRecord {
            athlete,
            categoria_nome,
            centro_treinamento_nome,
        } = record;

        Self {
            id: athlete.id,
            created_at: athlete.created_at,
            nome: athlete.nome,
            cpf: athlete.cpf,
            idade: athlete.idade,
            peso: athlete.peso,
            altura: athlete.altura,
            sexo: athlete.sexo,
            categoria: NameRef::new(categoria_nome),
            centro_treinamento: NameRef::new(centro_treinamento_nome),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AthleteFilter {
    /// Case-insensitive substring of the athlete name
    pub nome: Option<String>,
    /// Exact CPF
    pub cpf: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_request() -> CreateAthleteRequest {
        CreateAthleteRequest {
            nome: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            idade: 30,
            peso: 75.5,
            altura: 1.7,
            sexo: "M".to_string(),
            categoria: NameRef::new("Scale"),
            centro_treinamento: NameRef::new("CT King"),
        }
    }

    fn stored_athlete() -> Athlete {
        Athlete {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            nome: "Joao".to_string(),
            cpf: "12345678900".to_string(),
            idade: 30,
            peso: 75.5,
            altura: 1.7,
            sexo: "M".to_string(),
            categoria_id: 1,
            centro_treinamento_id: 1,
        }
    }

    #[test]
    fn test_valid_create_request() {
        assert!(create_request().validate().is_ok());
    }

    #[test]
    fn test_create_request_field_limits() {
        let mut req = create_request();
        req.cpf = "123456789012".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("cpf"));

        let mut req = create_request();
        req.peso = 0.0;
        req.sexo = "MF".to_string();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("peso"));
        assert!(errors.field_errors().contains_key("sexo"));
    }

    #[test]
    fn test_create_request_validates_nested_references() {
        let mut req = create_request();
        req.categoria = NameRef::new("");
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_into_row_uses_internal_keys() {
        let category = Category {
            pk_id: 7,
            id: Uuid::new_v4(),
            nome: "Scale".to_string(),
        };
        let center = TrainingCenter {
            pk_id: 3,
            id: Uuid::new_v4(),
            nome: "CT King".to_string(),
            endereco: "Rua X".to_string(),
            proprietario: "Fernando".to_string(),
        };

        let row = create_request().into_row(&category, &center);
        assert_eq!(row.categoria_id, 7);
        assert_eq!(row.centro_treinamento_id, 3);
        assert_eq!(row.cpf, "12345678900");
    }

    #[test]
    fn test_apply_only_touches_present_fields() {
        let before = stored_athlete();
        let update = UpdateAthleteRequest {
            idade: Some(31),
            ..Default::default()
        };

        let after = update.apply(before.clone(), None, None);
        assert_eq!(after.idade, 31);
        assert_eq!(after.nome, before.nome);
        assert_eq!(after.cpf, before.cpf);
        assert_eq!(after.peso, before.peso);
        assert_eq!(after.altura, before.altura);
        assert_eq!(after.sexo, before.sexo);
        assert_eq!(after.categoria_id, before.categoria_id);
        assert_eq!(after.created_at, before.created_at);
    }

    #[test]
    fn test_empty_update_is_valid() {
        assert!(UpdateAthleteRequest::default().validate().is_ok());
    }
}
