//! Repository module - generic persistence over the document store.

mod document_repository;
mod repository_traits;

pub use document_repository::DocumentRepository;
pub use repository_traits::RepositoryTrait;

use crate::budgets::Budget;
use crate::incomes::Income;
use crate::outcomes::Outcome;

pub type BudgetRepository = DocumentRepository<Budget>;
pub type IncomeRepository = DocumentRepository<Income>;
pub type OutcomeRepository = DocumentRepository<Outcome>;
