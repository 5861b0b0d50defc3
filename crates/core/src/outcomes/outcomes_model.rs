//! Outcome domain model.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budgets::Budget;
use crate::constants::OUTCOME_COLLECTION;
use crate::entities::{non_empty, same_identity, Entity, Reference};
use crate::errors::ValidationError;

/// Money spent out of a budget.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Serialized as a JSON number, so the value round-trips through `f64`
    /// and keeps about 15 significant digits.
    pub amount: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Reference>,
}

impl Outcome {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_amount(mut self, amount: Decimal) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_budget(mut self, budget: Option<Reference>) -> Self {
        self.budget = budget;
        self
    }

    pub fn belongs_to(&self, budget: &Budget) -> bool {
        self.budget
            .as_ref()
            .is_some_and(|reference| reference.points_to(budget))
    }
}

impl PartialEq for Outcome {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id(), other.id())
    }
}

impl Entity for Outcome {
    const COLLECTION: &'static str = OUTCOME_COLLECTION;

    fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.amount.is_none() {
            return Err(ValidationError::MissingField("amount"));
        }
        Ok(())
    }
}
