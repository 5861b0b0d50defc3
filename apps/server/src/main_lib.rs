use std::sync::Arc;

use crate::config::{Config, StorageKind};
use budgetary_core::{
    documents::{DocumentStore, InMemoryDocumentStore},
    incomes::IncomeService,
    outcomes::OutcomeService,
    repository::{IncomeRepository, OutcomeRepository},
    Budget, BudgetService, BudgetServiceTrait, EntityServiceTrait, Income, Outcome,
};
use budgetary_storage_sqlite::{db, SqliteDocumentStore};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

pub struct AppState {
    pub budget_service: Arc<dyn BudgetServiceTrait>,
    /// Same service as `budget_service`, seen through the shared CRUD contract.
    pub budget_resource: Arc<dyn EntityServiceTrait<Budget>>,
    pub income_service: Arc<dyn EntityServiceTrait<Income>>,
    pub outcome_service: Arc<dyn EntityServiceTrait<Outcome>>,
}

pub fn init_tracing() {
    let log_format = std::env::var("BUDGETARY_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

async fn open_store(config: &Config) -> anyhow::Result<Arc<dyn DocumentStore>> {
    match config.storage {
        StorageKind::Memory => {
            tracing::warn!("Using in-memory document store; data is lost on shutdown");
            Ok(Arc::new(InMemoryDocumentStore::new()))
        }
        StorageKind::Sqlite => {
            let db_path = db::init(&config.db_path)?;
            tracing::info!("Database path in use: {}", db_path);
            let pool = db::create_pool(&db_path)?;
            db::run_migrations(&pool)?;
            let writer = db::spawn_writer((*pool).clone());
            Ok(Arc::new(SqliteDocumentStore::new(pool, writer)))
        }
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let store = open_store(config).await?;

    let budget_service = Arc::new(BudgetService::new(store.clone()));
    let income_repository = Arc::new(IncomeRepository::new(store.clone()));
    let outcome_repository = Arc::new(OutcomeRepository::new(store.clone()));

    Ok(Arc::new(AppState {
        budget_service: budget_service.clone(),
        budget_resource: budget_service,
        income_service: Arc::new(IncomeService::new(income_repository)),
        outcome_service: Arc::new(OutcomeService::new(outcome_repository)),
    }))
}
