//! Billing persistence.
//!
//! Only the in-memory store exists; writes are serialized by the lock.

use std::collections::HashMap;
use std::sync::RwLock;

use log::{debug, info};
use uuid::Uuid;

use crate::{
    models::billing::Billing,
    repository::{RepositoryError, RepositoryResult},
};

pub trait BillingRepository: Send + Sync {
    /// Stores a new billing under a freshly generated id and returns it.
    fn save(&self, billing: Billing) -> RepositoryResult<Billing>;

    /// Every stored billing, in no particular order.
    fn find_all(&self) -> RepositoryResult<Vec<Billing>>;

    fn find_by_id(&self, id: Uuid) -> RepositoryResult<Billing>;

    /// Replaces the stored billing carrying the same id.
    fn update(&self, billing: Billing) -> RepositoryResult<Billing>;

    fn delete(&self, id: Uuid) -> RepositoryResult<()>;
}

#[derive(Debug, Default)]
pub struct InMemoryBillingRepository {
    billings: RwLock<HashMap<Uuid, Billing>>,
}

impl InMemoryBillingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BillingRepository for InMemoryBillingRepository {
    fn save(&self, billing: Billing) -> RepositoryResult<Billing> {
        let id = Uuid::new_v4();
        let billing = billing.with_id(id);
        self.billings.write()?.insert(id, billing.clone());
        info!("billing {} saved", id);
        Ok(billing)
    }

    fn find_all(&self) -> RepositoryResult<Vec<Billing>> {
        Ok(self.billings.read()?.values().cloned().collect())
    }

    fn find_by_id(&self, id: Uuid) -> RepositoryResult<Billing> {
        self.billings
            .read()?
            .get(&id)
            .cloned()
            .ok_or(RepositoryError::NotFound(id))
    }

    fn update(&self, billing: Billing) -> RepositoryResult<Billing> {
        let id = billing.id.ok_or(RepositoryError::MissingId)?;
        let mut billings = self.billings.write()?;
        match billings.get_mut(&id) {
            Some(stored) => {
                *stored = billing.clone();
                debug!("billing {} replaced", id);
                Ok(billing)
            }
            None => Err(RepositoryError::NotFound(id)),
        }
    }

    fn delete(&self, id: Uuid) -> RepositoryResult<()> {
        self.billings
            .write()?
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::fixtures::valid_billing;

    #[test]
    fn test_save_assigns_fresh_id() {
        let repository = InMemoryBillingRepository::new();
        let first = repository.save(valid_billing()).unwrap();
        let second = repository.save(valid_billing()).unwrap();

        assert!(first.id.is_some());
        assert_ne!(first.id, second.id);
        assert_eq!(repository.find_all().unwrap().len(), 2);
    }

    #[test]
    fn test_save_ignores_caller_supplied_id() {
        let repository = InMemoryBillingRepository::new();
        let supplied = Uuid::new_v4();
        let saved = repository.save(valid_billing().with_id(supplied)).unwrap();
        assert_ne!(saved.id, Some(supplied));
    }

    #[test]
    fn test_find_by_id() {
        let repository = InMemoryBillingRepository::new();
        let saved = repository.save(valid_billing()).unwrap();
        let id = saved.id.unwrap();

        assert_eq!(repository.find_by_id(id).unwrap(), saved);
        let missing = Uuid::new_v4();
        assert_eq!(
            repository.find_by_id(missing),
            Err(RepositoryError::NotFound(missing))
        );
    }

    #[test]
    fn test_update_replaces_existing_only() {
        let repository = InMemoryBillingRepository::new();
        let saved = repository.save(valid_billing()).unwrap();

        let changed = Billing {
            additional_info: None,
            ..saved.clone()
        };
        assert_eq!(repository.update(changed.clone()).unwrap(), changed);
        assert_eq!(repository.find_by_id(saved.id.unwrap()).unwrap(), changed);

        let unknown = valid_billing().with_id(Uuid::new_v4());
        assert!(matches!(
            repository.update(unknown),
            Err(RepositoryError::NotFound(_))
        ));
        assert_eq!(
            repository.update(valid_billing()),
            Err(RepositoryError::MissingId)
        );
    }

    #[test]
    fn test_delete() {
        let repository = InMemoryBillingRepository::new();
        let id = repository.save(valid_billing()).unwrap().id.unwrap();

        assert_eq!(repository.delete(id), Ok(()));
        assert_eq!(repository.delete(id), Err(RepositoryError::NotFound(id)));
        assert!(repository.find_all().unwrap().is_empty());
    }
}
