// src/handlers/admin.rs
//
// Rotas administrativas. O admin_guard já barrou quem não é admin; os
// serviços ainda reconferem o flag antes de cada operação.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::json;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::{booking::RangeQuery, validate_date_range},
    middleware::auth::CurrentUser,
    models::{blackout::Blackout, booking::{BlackoutConflict, ExportRow}, profile::Profile},
};

fn validate_not_negative(val: &Decimal) -> Result<(), ValidationError> {
    if val.is_sign_negative() {
        let mut err = ValidationError::new("range");
        err.add_param("min".into(), &0.0);
        err.message = Some("O valor não pode ser negativo.".into());
        return Err(err);
    }
    Ok(())
}

// ---
// Bloqueios
// ---

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBlackoutPayload {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    // Nenhum dos dois definido = fechamento do catálogo inteiro
    pub puesto_id: Option<i32>,
    pub time_slot_id: Option<i32>,
    #[validate(length(max = 200, message = "O motivo é longo demais."))]
    pub reason: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RemoveBlackoutPayload {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub puesto_id: Option<i32>,
    pub time_slot_id: Option<i32>,
}

#[utoipa::path(
    get,
    path = "/api/admin/blackouts",
    tag = "Administração",
    params(RangeQuery),
    responses((status = 200, body = Vec<Blackout>)),
    security(("api_jwt" = []))
)]
pub async fn list_blackouts(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(query.from, query.to)?;

    let blackouts = app_state
        .admin_service
        .list_blackouts(&caller, query.from, query.to)
        .await?;
    Ok((StatusCode::OK, Json(blackouts)))
}

/// Cria um bloqueio (fechamento de turnos) para um intervalo de datas.
#[utoipa::path(
    post,
    path = "/api/admin/blackouts",
    tag = "Administração",
    request_body = CreateBlackoutPayload,
    responses((status = 201, body = Blackout)),
    security(("api_jwt" = []))
)]
pub async fn add_blackout(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<CreateBlackoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;
    validate_date_range(payload.date_from, payload.date_to)?;

    let blackout = app_state
        .admin_service
        .add_blackout(
            &caller,
            payload.date_from,
            payload.date_to,
            payload.puesto_id,
            payload.time_slot_id,
            payload.reason.as_deref(),
        )
        .await?;
    Ok((StatusCode::CREATED, Json(blackout)))
}

/// Remove bloqueios pelos mesmos campos usados na criação (desfaz em
/// lote um add em lote).
#[utoipa::path(
    delete,
    path = "/api/admin/blackouts",
    tag = "Administração",
    request_body = RemoveBlackoutPayload,
    responses((status = 200, description = "Quantidade de bloqueios removidos")),
    security(("api_jwt" = []))
)]
pub async fn remove_blackout(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<RemoveBlackoutPayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(payload.date_from, payload.date_to)?;

    let removed = app_state
        .admin_service
        .remove_blackout(
            &caller,
            payload.date_from,
            payload.date_to,
            payload.puesto_id,
            payload.time_slot_id,
        )
        .await?;
    Ok((StatusCode::OK, Json(json!({ "removed": removed }))))
}

/// Reservas que ficaram dentro de um bloqueio criado depois delas.
#[utoipa::path(
    get,
    path = "/api/admin/blackouts/conflicts",
    tag = "Administração",
    params(RangeQuery),
    responses((status = 200, body = Vec<BlackoutConflict>)),
    security(("api_jwt" = []))
)]
pub async fn blackout_conflicts(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(query.from, query.to)?;

    let conflicts = app_state
        .admin_service
        .blackout_conflicts(&caller, query.from, query.to)
        .await?;
    Ok((StatusCode::OK, Json(conflicts)))
}

// ---
// Remoção em lote de reservas
// ---

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BulkDeletePayload {
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub puesto_id: Option<i32>,
}

/// Apaga as reservas do intervalo (de um puesto, ou de todos).
/// Irreversível — a confirmação explícita é responsabilidade da UI.
#[utoipa::path(
    delete,
    path = "/api/admin/reservations",
    tag = "Administração",
    request_body = BulkDeletePayload,
    responses((status = 200, description = "Quantidade de reservas apagadas")),
    security(("api_jwt" = []))
)]
pub async fn delete_reservations(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<BulkDeletePayload>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(payload.date_from, payload.date_to)?;

    let count = app_state
        .booking_service
        .delete_reservations(&caller, payload.date_from, payload.date_to, payload.puesto_id)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "deleted": count }))))
}

// ---
// Exportação (linhas tipadas; a formatação CSV/XLS fica com quem consome)
// ---

#[utoipa::path(
    get,
    path = "/api/admin/reservations/export",
    tag = "Administração",
    params(RangeQuery),
    responses((status = 200, body = Vec<ExportRow>)),
    security(("api_jwt" = []))
)]
pub async fn export_reservations(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    if !caller.is_admin {
        return Err(AppError::PermissionDenied);
    }
    validate_date_range(query.from, query.to)?;

    let rows = app_state
        .booking_service
        .export_rows(query.from, query.to)
        .await?;
    Ok((StatusCode::OK, Json(rows)))
}

// ---
// Usuários: cotas e permissões
// ---

#[derive(Debug, Deserialize, IntoParams)]
pub struct UsersQuery {
    // filtro por substring em nome, hierarquia ou id
    pub q: Option<String>,
}

#[utoipa::path(
    get,
    path = "/api/admin/users",
    tag = "Administração",
    params(UsersQuery),
    responses((status = 200, body = Vec<Profile>)),
    security(("api_jwt" = []))
)]
pub async fn list_users(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<UsersQuery>,
) -> Result<impl IntoResponse, AppError> {
    let users = app_state
        .admin_service
        .list_users(&caller, query.q.as_deref())
        .await?;
    Ok((StatusCode::OK, Json(users)))
}

#[derive(Debug, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserQuotaPayload {
    pub is_admin: bool,
    pub restricted: bool,
    pub allowed_puestos: Option<Vec<i32>>,
    pub allowed_time_slots: Option<Vec<i32>>,

    #[validate(range(min = 0, message = "O valor não pode ser negativo."))]
    pub daily_max_slots: i32,

    #[validate(custom(function = "validate_not_negative"))]
    pub daily_max_hours: Decimal,

    #[validate(custom(function = "validate_not_negative"))]
    pub monthly_max_hours: Decimal,
}

/// Substituição completa da cota/permissões de um usuário
/// (setUserQuota): admin, restrições, allow-lists e limites de uma vez.
#[utoipa::path(
    put,
    path = "/api/admin/users/{id}",
    tag = "Administração",
    request_body = UserQuotaPayload,
    responses((status = 200, body = Profile)),
    security(("api_jwt" = []))
)]
pub async fn set_user_quota(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(user_id): Path<Uuid>,
    Json(payload): Json<UserQuotaPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let profile = app_state
        .admin_service
        .set_user_quota(
            &caller,
            user_id,
            payload.is_admin,
            payload.restricted,
            payload.allowed_puestos,
            payload.allowed_time_slots,
            payload.daily_max_slots,
            payload.daily_max_hours,
            payload.monthly_max_hours,
        )
        .await?;
    Ok((StatusCode::OK, Json(profile)))
}

// ---
// Catálogo: habilitar / desabilitar turnos
// ---

#[derive(Debug, Deserialize, ToSchema)]
pub struct SetEnabledPayload {
    pub enabled: bool,
}

/// Habilita/desabilita um turno. Não cancela reservas existentes.
#[utoipa::path(
    patch,
    path = "/api/admin/slots/{id}",
    tag = "Administração",
    request_body = SetEnabledPayload,
    responses((status = 200, description = "Turno atualizado")),
    security(("api_jwt" = []))
)]
pub async fn set_slot_enabled(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(time_slot_id): Path<i32>,
    Json(payload): Json<SetEnabledPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .catalog_service
        .set_slot_enabled(&caller, time_slot_id, payload.enabled)
        .await?;
    Ok(StatusCode::OK)
}

/// Habilita/desabilita todos os turnos de um puesto de uma vez.
#[utoipa::path(
    patch,
    path = "/api/admin/puestos/{id}/slots",
    tag = "Administração",
    request_body = SetEnabledPayload,
    responses((status = 200, description = "Quantidade de turnos atualizados")),
    security(("api_jwt" = []))
)]
pub async fn set_all_slots_enabled(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Path(puesto_id): Path<i32>,
    Json(payload): Json<SetEnabledPayload>,
) -> Result<impl IntoResponse, AppError> {
    let updated = app_state
        .catalog_service
        .set_all_slots_enabled(&caller, puesto_id, payload.enabled)
        .await?;
    Ok((StatusCode::OK, Json(json!({ "updated": updated }))))
}
