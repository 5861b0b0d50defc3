//! Resources module - the create/read/update/delete contract shared by all
//! entities.

mod resource_service;
mod resource_traits;


pub use resource_service::EntityService;
pub use resource_traits::EntityServiceTrait;
