use async_trait::async_trait;

use crate::budgets::budgets_model::Budget;
use crate::errors::Result;
use crate::resources::EntityServiceTrait;

/// Budget operations: the shared CRUD contract plus maintenance of both
/// sides of the budget/income and budget/outcome links.
#[async_trait]
pub trait BudgetServiceTrait: EntityServiceTrait<Budget> {
    async fn link_income(&self, budget_id: &str, income_id: &str) -> Result<Budget>;
    async fn unlink_income(&self, budget_id: &str, income_id: &str) -> Result<Budget>;
    async fn link_outcome(&self, budget_id: &str, outcome_id: &str) -> Result<Budget>;
    async fn unlink_outcome(&self, budget_id: &str, outcome_id: &str) -> Result<Budget>;
}
