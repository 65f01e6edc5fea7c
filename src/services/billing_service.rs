//! Billing Service - validation-gated billing operations
//!
//! Every write runs the billing rule chain first. A non-valid result aborts
//! the write with [`ServiceError::ValidationFailed`] and the store is left
//! untouched; reads and deletes go straight to the repository.

use std::sync::Arc;

use log::{error, info};
use uuid::Uuid;

use crate::{
    constants,
    error::{ServiceError, ServiceResult},
    functional::validation_rules::Validator,
    models::billing::{validators::billing_validator, Billing},
    repository::{BillingRepository, InMemoryBillingRepository},
    services::functional_patterns::{validated, Pipeline},
};

pub struct BillingService {
    repository: Arc<dyn BillingRepository>,
    validation: Pipeline<Billing>,
}

impl BillingService {
    pub fn new(validator: Arc<dyn Validator<Billing>>, repository: Arc<dyn BillingRepository>) -> Self {
        let validation = Pipeline::new()
            .then(|billing: Billing| {
                info!("starting billing validations");
                Ok(billing)
            })
            .then(validated(validator))
            .then(|billing: Billing| {
                info!("billing validated successfully");
                Ok(billing)
            });

        Self {
            repository,
            validation,
        }
    }

    /// Default billing catalog over an empty in-memory store.
    pub fn in_memory() -> Self {
        Self::new(billing_validator(), Arc::new(InMemoryBillingRepository::new()))
    }

    fn validate(&self, billing: Billing) -> ServiceResult<Billing> {
        self.validation.execute(billing).map_err(|err| {
            if let ServiceError::ValidationFailed(result) = &err {
                error!("{}: {:?}", constants::MESSAGE_VALIDATION_FAILED, result.codes());
            }
            err
        })
    }

    pub fn save(&self, billing: Billing) -> ServiceResult<Billing> {
        let billing = self.validate(billing)?;
        Ok(self.repository.save(billing)?)
    }

    pub fn find_all(&self) -> ServiceResult<Vec<Billing>> {
        Ok(self.repository.find_all()?)
    }

    pub fn find_by_id(&self, id: Uuid) -> ServiceResult<Billing> {
        Ok(self.repository.find_by_id(id)?)
    }

    /// Replaces the billing stored under `id` with `billing`.
    pub fn update(&self, id: Uuid, billing: Billing) -> ServiceResult<Billing> {
        let billing = self.validate(billing.with_id(id))?;
        Ok(self.repository.update(billing)?)
    }

    pub fn delete(&self, id: Uuid) -> ServiceResult<()> {
        info!("deleting billing with id {}", id);
        self.repository.delete(id)?;
        info!("billing deleted successfully");
        Ok(())
    }
}
