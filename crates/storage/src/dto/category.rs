use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

use crate::models::{Category, NewCategory};

/// Request payload for creating a new category
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
pub struct CreateCategoryRequest {
    #[validate(length(min = 1, max = 10, message = "nome must be between 1 and 10 characters"))]
    #[schema(example = "Scale")]
    pub nome: String,
}

impl CreateCategoryRequest {
    pub fn into_new(self) -> NewCategory {
        NewCategory {
            id: Uuid::new_v4(),
            nome: self.nome,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CategoryResponse {
    pub id: Uuid,
    pub nome: String,
}

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            nome: category.nome,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CategoryFilter {
    /// Case-insensitive substring of the category name
    pub nome: Option<String>,
}
