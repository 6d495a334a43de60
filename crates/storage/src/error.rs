use thiserror::Error;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Not found")]
    NotFound,

    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    #[error("Foreign key violated: {0}")]
    ForeignKeyViolation(String),

    #[error("Store lock poisoned")]
    Poisoned,
}

pub type Result<T> = std::result::Result<T, StorageError>;

impl StorageError {
    pub fn is_unique_violation(&self) -> bool {
        match self {
            StorageError::UniqueViolation(_) => true,
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some("23505")
            }
            _ => false,
        }
    }

    pub fn is_foreign_key_violation(&self) -> bool {
        match self {
            StorageError::ForeignKeyViolation(_) => true,
            StorageError::Database(sqlx::Error::Database(e)) => {
                e.code().as_deref() == Some("23503")
            }
            _ => false,
        }
    }

    /// Folds raw Postgres constraint errors into the typed variants so callers
    /// never have to inspect SQLSTATE codes.
    pub(crate) fn classify(self) -> Self {
        match self {
            StorageError::Database(sqlx::Error::Database(ref e)) => {
                let code = e.code().map(|c| c.into_owned());
                let constraint = e.constraint().unwrap_or("unknown").to_string();
                match code.as_deref() {
                    Some("23505") => StorageError::UniqueViolation(constraint),
                    Some("23503") => StorageError::ForeignKeyViolation(constraint),
                    _ => self,
                }
            }
            other => other,
        }
    }
}

impl<T> From<std::sync::PoisonError<T>> for StorageError {
    fn from(_: std::sync::PoisonError<T>) -> Self {
        StorageError::Poisoned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typed_violations_are_recognised() {
        assert!(StorageError::UniqueViolation("atletas_cpf_key".into()).is_unique_violation());
        assert!(!StorageError::NotFound.is_unique_violation());
        assert!(
            StorageError::ForeignKeyViolation("atletas_categoria_id_fkey".into())
                .is_foreign_key_violation()
        );
    }

    #[test]
    fn test_classify_leaves_other_errors_untouched() {
        assert!(matches!(
            StorageError::NotFound.classify(),
            StorageError::NotFound
        ));
        assert!(matches!(
            StorageError::Database(sqlx::Error::RowNotFound).classify(),
            StorageError::Database(sqlx::Error::RowNotFound)
        ));
    }
}
