pub mod billing_repository;

use std::sync::PoisonError;

use thiserror::Error;
use uuid::Uuid;

pub use billing_repository::{BillingRepository, InMemoryBillingRepository};

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("billing {0} not found")]
    NotFound(Uuid),

    #[error("billing has no id")]
    MissingId,

    #[error("billing store lock poisoned")]
    Poisoned,
}

impl<T> From<PoisonError<T>> for RepositoryError {
    fn from(_: PoisonError<T>) -> Self {
        RepositoryError::Poisoned
    }
}
