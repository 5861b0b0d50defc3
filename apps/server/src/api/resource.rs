//! Create/update/list/get/delete handlers shared by every entity route.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use budgetary_core::{Entity, EntityServiceTrait};

use crate::{
    api::shared::entity_alert,
    error::{ApiError, ApiResult, ForEntity},
    main_lib::AppState,
};

/// An entity served under `/api/{PATH}`.
pub trait EntityResource: Entity {
    /// Plural path segment, e.g. `incomes`.
    const PATH: &'static str;

    fn service(state: &AppState) -> &Arc<dyn EntityServiceTrait<Self>>;
}

fn entity_id<E: Entity>(entity: &E) -> String {
    entity.id().unwrap_or_default().to_string()
}

async fn create<E: EntityResource>(
    State(state): State<Arc<AppState>>,
    body: Result<Json<E>, JsonRejection>,
) -> ApiResult<(StatusCode, HeaderMap, Json<E>)> {
    let Json(entity) = body.map_err(ApiError::rejected::<E>)?;
    let created = E::service(&state).create(entity).await.for_entity::<E>()?;
    let id = entity_id(&created);
    tracing::info!("Created {} {}", E::COLLECTION, id);

    let mut headers = entity_alert(E::COLLECTION, "created", &id);
    if let Ok(location) = HeaderValue::from_str(&format!("/api/{}/{}", E::PATH, id)) {
        headers.insert(header::LOCATION, location);
    }
    Ok((StatusCode::CREATED, headers, Json(created)))
}

async fn update<E: EntityResource>(
    State(state): State<Arc<AppState>>,
    body: Result<Json<E>, JsonRejection>,
) -> ApiResult<(HeaderMap, Json<E>)> {
    let Json(entity) = body.map_err(ApiError::rejected::<E>)?;
    let updated = E::service(&state).update(entity).await.for_entity::<E>()?;
    let headers = entity_alert(E::COLLECTION, "updated", &entity_id(&updated));
    Ok((headers, Json(updated)))
}

async fn list<E: EntityResource>(State(state): State<Arc<AppState>>) -> ApiResult<Json<Vec<E>>> {
    let entities = E::service(&state).list().for_entity::<E>()?;
    Ok(Json(entities))
}

async fn get_one<E: EntityResource>(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<Json<E>> {
    E::service(&state)
        .get(&id)
        .for_entity::<E>()?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

async fn delete_one<E: EntityResource>(
    Path(id): Path<String>,
    State(state): State<Arc<AppState>>,
) -> ApiResult<(StatusCode, HeaderMap)> {
    E::service(&state).delete(&id).await.for_entity::<E>()?;
    tracing::info!("Deleted {} {}", E::COLLECTION, id);
    Ok((StatusCode::OK, entity_alert(E::COLLECTION, "deleted", &id)))
}

/// `/{PATH}` and `/{PATH}/{id}` for one entity type.
pub fn routes<E: EntityResource>() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            &format!("/{}", E::PATH),
            get(list::<E>).post(create::<E>).put(update::<E>),
        )
        .route(
            &format!("/{}/{{id}}", E::PATH),
            get(get_one::<E>).delete(delete_one::<E>),
        )
}
