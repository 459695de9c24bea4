use thiserror::Error;

use crate::errors::domain::DomainError;

/// Process-level error: configuration, bootstrap, and anything bubbling up
/// from the domain/repository layers.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database error: {detail}")]
    Db {
        detail: String,
        #[source]
        source: sea_orm::DbErr,
    },
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl AppError {
    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>, source: sea_orm::DbErr) -> Self {
        Self::Db {
            detail: detail.into(),
            source,
        }
    }

    /// The wrapped domain error, if any.
    pub fn as_domain(&self) -> Option<&DomainError> {
        match self {
            AppError::Domain(e) => Some(e),
            _ => None,
        }
    }
}
