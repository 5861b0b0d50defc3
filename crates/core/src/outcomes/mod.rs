//! Outcomes module - domain model.

mod outcomes_model;

pub use outcomes_model::Outcome;

use crate::resources::EntityService;

pub type OutcomeService = EntityService<Outcome>;
