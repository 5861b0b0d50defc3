//! Budgetary Core - domain entities, services, and traits.
//!
//! This crate contains the budget, income and outcome model together with
//! the create/read/update/delete contract served over HTTP. It is
//! store-agnostic: persistence goes through the `DocumentStore` trait, which
//! the `storage-sqlite` crate implements.

pub mod budgets;
pub mod constants;
pub mod documents;
pub mod entities;
pub mod errors;
pub mod incomes;
pub mod outcomes;
pub mod repository;
pub mod resources;

pub use budgets::{Budget, BudgetService, BudgetServiceTrait};
pub use entities::{Entity, Reference};
pub use incomes::{Income, IncomeService};
pub use outcomes::{Outcome, OutcomeService};
pub use resources::{EntityService, EntityServiceTrait};

// Re-export error types
pub use errors::Error;
pub use errors::Result;
