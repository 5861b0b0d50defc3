//! Incomes module - domain model.

mod incomes_model;

pub use incomes_model::Income;

use crate::resources::EntityService;

pub type IncomeService = EntityService<Income>;
