use std::sync::Arc;

use axum::Router;
use budgetary_core::{EntityServiceTrait, Outcome};

use super::resource::{self, EntityResource};
use crate::main_lib::AppState;

impl EntityResource for Outcome {
    const PATH: &'static str = "outcomes";

    fn service(state: &AppState) -> &Arc<dyn EntityServiceTrait<Self>> {
        &state.outcome_service
    }
}

pub fn router() -> Router<Arc<AppState>> {
    resource::routes::<Outcome>()
}
