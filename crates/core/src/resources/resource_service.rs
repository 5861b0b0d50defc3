use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::resource_traits::EntityServiceTrait;
use crate::entities::Entity;
use crate::errors::{InvalidRequestError, Result};
use crate::repository::RepositoryTrait;

pub struct EntityService<E: Entity> {
    repository: Arc<dyn RepositoryTrait<E>>,
}

impl<E: Entity> EntityService<E> {
    pub fn new(repository: Arc<dyn RepositoryTrait<E>>) -> Self {
        EntityService { repository }
    }
}

/// Identifier check first, then required fields; nothing is written when
/// either fails.
fn check_create<E: Entity>(entity: &E) -> Result<()> {
    if entity.is_persisted() {
        return Err(InvalidRequestError::id_exists(E::COLLECTION).into());
    }
    entity.validate()?;
    Ok(())
}

fn check_update<E: Entity>(entity: &E) -> Result<()> {
    if !entity.is_persisted() {
        return Err(InvalidRequestError::id_null(E::COLLECTION).into());
    }
    entity.validate()?;
    Ok(())
}

#[async_trait]
impl<E: Entity> EntityServiceTrait<E> for EntityService<E> {
    async fn create(&self, entity: E) -> Result<E> {
        debug!("Request to create {}", E::COLLECTION);
        check_create(&entity)?;
        self.repository.save(entity).await
    }

    async fn update(&self, entity: E) -> Result<E> {
        debug!("Request to update {} {:?}", E::COLLECTION, entity.id());
        check_update(&entity)?;
        self.repository.save(entity).await
    }

    fn list(&self) -> Result<Vec<E>> {
        debug!("Request to list all {} documents", E::COLLECTION);
        self.repository.find_all()
    }

    fn get(&self, id: &str) -> Result<Option<E>> {
        debug!("Request to get {} {}", E::COLLECTION, id);
        self.repository.find_by_id(id)
    }

    async fn delete(&self, id: &str) -> Result<()> {
        debug!("Request to delete {} {}", E::COLLECTION, id);
        self.repository.delete_by_id(id).await
    }
}
