use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error("model error: {0}")]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Failures a caller can cause (bad input, missing row). Everything else
    /// is reported through the exception path.
    pub fn is_expected(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::NotFound(_) | Self::Model(ModelError::Validation(_)))
    }

    /// The underlying message, without the variant prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::Validation(m) | Self::NotFound(m) | Self::Db(m) => m,
            Self::Model(ModelError::Validation(m) | ModelError::Db(m)) => m,
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { Self::Db(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_errors_are_caller_errors() {
        assert!(ServiceError::Validation("name required".into()).is_expected());
        assert!(ServiceError::not_found("Organization").is_expected());
        assert!(ServiceError::from(ModelError::Validation("invalid email".into())).is_expected());
        assert!(!ServiceError::Db("connection reset".into()).is_expected());
        assert!(!ServiceError::from(ModelError::Db("locked".into())).is_expected());
    }

    #[test]
    fn db_errors_keep_their_message() {
        let e = ServiceError::from(sea_orm::DbErr::Custom("FOREIGN KEY constraint failed".into()));
        assert!(e.to_string().contains("FOREIGN KEY constraint failed"));
        assert!(e.to_string().starts_with("database error"));
        assert_eq!(ServiceError::Db("connection reset".into()).message(), "connection reset");
        assert_eq!(ServiceError::from(ModelError::Db("locked".into())).message(), "locked");
    }
}
