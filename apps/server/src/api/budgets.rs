use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::HeaderMap,
    routing::put,
    Json, Router,
};
use budgetary_core::{Budget, Entity, EntityServiceTrait};

use super::resource::{self, EntityResource};
use crate::{
    api::shared::entity_alert,
    error::{ApiResult, ForEntity},
    main_lib::AppState,
};

impl EntityResource for Budget {
    const PATH: &'static str = "budgets";

    fn service(state: &AppState) -> &Arc<dyn EntityServiceTrait<Self>> {
        &state.budget_resource
    }
}

fn linked(budget: Budget) -> (HeaderMap, Json<Budget>) {
    let headers = entity_alert(
        Budget::COLLECTION,
        "updated",
        budget.id().unwrap_or_default(),
    );
    (headers, Json(budget))
}

async fn link_income(
    Path((budget_id, income_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(HeaderMap, Json<Budget>)> {
    let budget = state
        .budget_service
        .link_income(&budget_id, &income_id)
        .await
        .for_entity::<Budget>()?;
    Ok(linked(budget))
}

async fn unlink_income(
    Path((budget_id, income_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(HeaderMap, Json<Budget>)> {
    let budget = state
        .budget_service
        .unlink_income(&budget_id, &income_id)
        .await
        .for_entity::<Budget>()?;
    Ok(linked(budget))
}

async fn link_outcome(
    Path((budget_id, outcome_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(HeaderMap, Json<Budget>)> {
    let budget = state
        .budget_service
        .link_outcome(&budget_id, &outcome_id)
        .await
        .for_entity::<Budget>()?;
    Ok(linked(budget))
}

async fn unlink_outcome(
    Path((budget_id, outcome_id)): Path<(String, String)>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(HeaderMap, Json<Budget>)> {
    let budget = state
        .budget_service
        .unlink_outcome(&budget_id, &outcome_id)
        .await
        .for_entity::<Budget>()?;
    Ok(linked(budget))
}

pub fn router() -> Router<Arc<AppState>> {
    resource::routes::<Budget>()
        .route(
            "/budgets/{id}/incomes/{income_id}",
            put(link_income).delete(unlink_income),
        )
        .route(
            "/budgets/{id}/outcomes/{outcome_id}",
            put(link_outcome).delete(unlink_outcome),
        )
}
