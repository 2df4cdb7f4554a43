// src/handlers/catalog.rs

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};

use crate::{common::error::AppError, config::AppState, middleware::auth::CurrentUser};

/// Lista os puestos visíveis para o chamador.
#[utoipa::path(
    get,
    path = "/api/catalog/puestos",
    tag = "Catálogo",
    responses((status = 200, body = Vec<crate::models::catalog::Puesto>)),
    security(("api_jwt" = []))
)]
pub async fn list_puestos(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
) -> Result<impl IntoResponse, AppError> {
    let puestos = app_state.catalog_service.list_puestos(&caller).await?;
    Ok((StatusCode::OK, Json(puestos)))
}

/// Lista os turnos de um puesto visíveis para o chamador.
#[utoipa::path(
    get,
    path = "/api/catalog/puestos/{id}/slots",
    tag = "Catálogo",
    responses((status = 200, body = Vec<crate::models::catalog::TimeSlot>)),
    security(("api_jwt" = []))
)]
pub async fn list_slots(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(puesto_id): Path<i32>,
) -> Result<impl IntoResponse, AppError> {
    let slots = app_state
        .catalog_service
        .list_slots(&caller, puesto_id)
        .await?;
    Ok((StatusCode::OK, Json(slots)))
}
