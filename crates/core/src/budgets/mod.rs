//! Budgets module - domain model, relationship maintenance and service.

mod budgets_model;
mod budgets_service;
mod budgets_traits;



pub use budgets_model::Budget;
pub use budgets_service::BudgetService;
pub use budgets_traits::BudgetServiceTrait;
