//! Budget domain model and the in-memory side of its relationships.

use serde::{Deserialize, Serialize};

use crate::constants::{BUDGET_COLLECTION, INCOME_COLLECTION, OUTCOME_COLLECTION};
use crate::entities::{non_empty, same_identity, Entity, Reference};
use crate::errors::ValidationError;
use crate::incomes::Income;
use crate::outcomes::Outcome;

/// A named budget owning sets of incomes and outcomes.
///
/// `incomes` / `outcomes` hold pointers to documents in the other
/// collections. The store does not keep them consistent with the children's
/// `budget` back-references; the `add_*` / `remove_*` helpers do, for the
/// objects they are given.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub incomes: Vec<Reference>,
    #[serde(default)]
    pub outcomes: Vec<Reference>,
}

impl Budget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Adds `income` to this budget and points its back-reference here.
    ///
    /// Both sides must already carry identifiers. On error neither side is
    /// modified.
    pub fn add_income(&mut self, income: &mut Income) -> Result<&mut Self, ValidationError> {
        let (own, child) = link_pair(self, income, INCOME_COLLECTION)?;
        insert_reference(&mut self.incomes, child);
        income.budget = Some(own);
        Ok(self)
    }

    pub fn remove_income(&mut self, income: &mut Income) -> &mut Self {
        remove_reference(&mut self.incomes, income.id());
        income.budget = None;
        self
    }

    pub fn add_outcome(&mut self, outcome: &mut Outcome) -> Result<&mut Self, ValidationError> {
        let (own, child) = link_pair(self, outcome, OUTCOME_COLLECTION)?;
        insert_reference(&mut self.outcomes, child);
        outcome.budget = Some(own);
        Ok(self)
    }

    pub fn remove_outcome(&mut self, outcome: &mut Outcome) -> &mut Self {
        remove_reference(&mut self.outcomes, outcome.id());
        outcome.budget = None;
        self
    }

    pub fn has_income(&self, income: &Income) -> bool {
        contains_reference(&self.incomes, income.id())
    }

    pub fn has_outcome(&self, outcome: &Outcome) -> bool {
        contains_reference(&self.outcomes, outcome.id())
    }

    /// Children whose back-references would dangle if this budget went away.
    pub fn child_count(&self) -> usize {
        self.incomes.len() + self.outcomes.len()
    }
}

fn link_pair<C: Entity>(
    budget: &Budget,
    child: &C,
    child_name: &'static str,
) -> Result<(Reference, Reference), ValidationError> {
    let own = Reference::to(budget)
        .ok_or(ValidationError::UnpersistedReference(BUDGET_COLLECTION))?;
    let child = Reference::to(child).ok_or(ValidationError::UnpersistedReference(child_name))?;
    Ok((own, child))
}

fn insert_reference(set: &mut Vec<Reference>, reference: Reference) {
    if !set.contains(&reference) {
        set.push(reference);
    }
}

fn remove_reference(set: &mut Vec<Reference>, id: Option<&str>) {
    if let Some(id) = id {
        set.retain(|reference| reference.id != id);
    }
}

fn contains_reference(set: &[Reference], id: Option<&str>) -> bool {
    set.iter()
        .any(|reference| same_identity(Some(reference.id.as_str()), id))
}

impl PartialEq for Budget {
    fn eq(&self, other: &Self) -> bool {
        same_identity(self.id(), other.id())
    }
}

impl Entity for Budget {
    const COLLECTION: &'static str = BUDGET_COLLECTION;

    fn id(&self) -> Option<&str> {
        non_empty(&self.id)
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }

    fn validate(&self) -> Result<(), ValidationError> {
        match self.title.as_deref() {
            Some(title) if !title.trim().is_empty() => Ok(()),
            _ => Err(ValidationError::MissingField("title")),
        }
    }
}
