use std::sync::Arc;

use axum::Router;
use budgetary_core::{EntityServiceTrait, Income};

use super::resource::{self, EntityResource};
use crate::main_lib::AppState;

impl EntityResource for Income {
    const PATH: &'static str = "incomes";

    fn service(state: &AppState) -> &Arc<dyn EntityServiceTrait<Self>> {
        &state.income_service
    }
}

pub fn router() -> Router<Arc<AppState>> {
    resource::routes::<Income>()
}
