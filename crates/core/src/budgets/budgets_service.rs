use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};

use crate::budgets::budgets_model::Budget;
use crate::budgets::budgets_traits::BudgetServiceTrait;
use crate::documents::{DocumentStore, DocumentWrite};
use crate::entities::Entity;
use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::incomes::Income;
use crate::outcomes::Outcome;
use crate::repository::{DocumentRepository, RepositoryTrait};
use crate::resources::{EntityService, EntityServiceTrait};

/// Either kind of document a budget owns.
trait BudgetChild: Entity {
    fn parent_id(&self) -> Option<&str>;
    fn attach_to(&mut self, budget: &mut Budget) -> std::result::Result<(), ValidationError>;
    fn detach_from(&mut self, budget: &mut Budget);
}

impl BudgetChild for Income {
    fn parent_id(&self) -> Option<&str> {
        self.budget.as_ref().map(|reference| reference.id.as_str())
    }

    fn attach_to(&mut self, budget: &mut Budget) -> std::result::Result<(), ValidationError> {
        budget.add_income(self).map(|_| ())
    }

    fn detach_from(&mut self, budget: &mut Budget) {
        budget.remove_income(self);
    }
}

impl BudgetChild for Outcome {
    fn parent_id(&self) -> Option<&str> {
        self.budget.as_ref().map(|reference| reference.id.as_str())
    }

    fn attach_to(&mut self, budget: &mut Budget) -> std::result::Result<(), ValidationError> {
        budget.add_outcome(self).map(|_| ())
    }

    fn detach_from(&mut self, budget: &mut Budget) {
        budget.remove_outcome(self);
    }
}

fn not_found(collection: &str, id: &str) -> Error {
    Error::Database(DatabaseError::NotFound(format!("{} {}", collection, id)))
}

/// Budget CRUD plus relationship maintenance.
///
/// Every link change is written with a single `DocumentStore::put_all`, so
/// parent and child documents change together or not at all.
pub struct BudgetService {
    store: Arc<dyn DocumentStore>,
    budgets: Arc<dyn RepositoryTrait<Budget>>,
    incomes: Arc<dyn RepositoryTrait<Income>>,
    outcomes: Arc<dyn RepositoryTrait<Outcome>>,
    crud: EntityService<Budget>,
}

impl BudgetService {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self {
        let budgets: Arc<dyn RepositoryTrait<Budget>> =
            Arc::new(DocumentRepository::<Budget>::new(store.clone()));
        BudgetService {
            incomes: Arc::new(DocumentRepository::<Income>::new(store.clone())),
            outcomes: Arc::new(DocumentRepository::<Outcome>::new(store.clone())),
            crud: EntityService::new(budgets.clone()),
            budgets,
            store,
        }
    }

    fn load_budget(&self, budget_id: &str) -> Result<Budget> {
        self.budgets
            .find_by_id(budget_id)?
            .ok_or_else(|| not_found(Budget::COLLECTION, budget_id))
    }

    async fn link<C: BudgetChild>(
        &self,
        children: &dyn RepositoryTrait<C>,
        budget_id: &str,
        child_id: &str,
    ) -> Result<Budget> {
        let mut budget = self.load_budget(budget_id)?;
        let mut child = children
            .find_by_id(child_id)?
            .ok_or_else(|| not_found(C::COLLECTION, child_id))?;

        let mut writes = Vec::with_capacity(3);
        let previous = child
            .parent_id()
            .filter(|previous| *previous != budget_id)
            .map(str::to_string);
        if let Some(previous_id) = previous {
            // The old parent may already be gone; its reference then just dangles.
            if let Some(mut previous_budget) = self.budgets.find_by_id(&previous_id)? {
                child.detach_from(&mut previous_budget);
                writes.push(DocumentWrite::of(&previous_budget)?);
            }
        }

        child.attach_to(&mut budget)?;
        writes.push(DocumentWrite::of(&budget)?);
        writes.push(DocumentWrite::of(&child)?);

        debug!(
            "Linking {} {} to budget {} ({} documents)",
            C::COLLECTION,
            child_id,
            budget_id,
            writes.len()
        );
        self.store.put_all(writes).await?;
        Ok(budget)
    }

    async fn unlink<C: BudgetChild>(
        &self,
        children: &dyn RepositoryTrait<C>,
        budget_id: &str,
        child_id: &str,
    ) -> Result<Budget> {
        let mut budget = self.load_budget(budget_id)?;
        let mut child = children
            .find_by_id(child_id)?
            .ok_or_else(|| not_found(C::COLLECTION, child_id))?;

        if child.parent_id() != Some(budget_id) {
            debug!(
                "{} {} is not linked to budget {}; nothing to unlink",
                C::COLLECTION,
                child_id,
                budget_id
            );
            return Ok(budget);
        }
        child.detach_from(&mut budget);

        debug!(
            "Unlinking {} {} from budget {}",
            C::COLLECTION,
            child_id,
            budget_id
        );
        self.store
            .put_all(vec![DocumentWrite::of(&budget)?, DocumentWrite::of(&child)?])
            .await?;
        Ok(budget)
    }
}

#[async_trait]
impl EntityServiceTrait<Budget> for BudgetService {
    async fn create(&self, budget: Budget) -> Result<Budget> {
        self.crud.create(budget).await
    }

    async fn update(&self, budget: Budget) -> Result<Budget> {
        self.crud.update(budget).await
    }

    fn list(&self) -> Result<Vec<Budget>> {
        self.crud.list()
    }

    fn get(&self, id: &str) -> Result<Option<Budget>> {
        self.crud.get(id)
    }

    /// Deletes only the budget document. Children keep their back-references.
    async fn delete(&self, id: &str) -> Result<()> {
        if let Some(budget) = self.budgets.find_by_id(id)? {
            if budget.child_count() > 0 {
                warn!(
                    "Deleting budget {} leaves {} income(s) and {} outcome(s) pointing at a missing budget",
                    id,
                    budget.incomes.len(),
                    budget.outcomes.len()
                );
            }
        }
        self.crud.delete(id).await
    }
}

#[async_trait]
impl BudgetServiceTrait for BudgetService {
    async fn link_income(&self, budget_id: &str, income_id: &str) -> Result<Budget> {
        self.link(self.incomes.as_ref(), budget_id, income_id).await
    }

    async fn unlink_income(&self, budget_id: &str, income_id: &str) -> Result<Budget> {
        self.unlink(self.incomes.as_ref(), budget_id, income_id)
            .await
    }

    async fn link_outcome(&self, budget_id: &str, outcome_id: &str) -> Result<Budget> {
        self.link(self.outcomes.as_ref(), budget_id, outcome_id)
            .await
    }

    async fn unlink_outcome(&self, budget_id: &str, outcome_id: &str) -> Result<Budget> {
        self.unlink(self.outcomes.as_ref(), budget_id, outcome_id)
            .await
    }
}
