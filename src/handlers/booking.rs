// src/handlers/booking.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};

use crate::{
    common::error::AppError,
    config::AppState,
    handlers::validate_date_range,
    middleware::auth::CurrentUser,
    models::booking::{OccupancyEntry, Reservation, UserReservation},
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct RangeQuery {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

// ---
// Payload: reservar / cancelar um par (data, turno)
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReservationActionPayload {
    pub date: NaiveDate,
    pub time_slot_id: i32,
}

/// Reserva um turno para o chamador. Quem perde a corrida pelo turno
/// recebe 409 e deve consultar a disponibilidade de novo.
#[utoipa::path(
    post,
    path = "/api/reservations",
    tag = "Reservas",
    request_body = ReservationActionPayload,
    responses(
        (status = 201, body = Reservation),
        (status = 409, description = "Turno já reservado nesta data"),
        (status = 422, description = "Turno fechado ou cota excedida"),
    ),
    security(("api_jwt" = []))
)]
pub async fn reserve(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<ReservationActionPayload>,
) -> Result<impl IntoResponse, AppError> {
    let reservation = app_state
        .booking_service
        .reserve(&caller, payload.date, payload.time_slot_id)
        .await?;
    Ok((StatusCode::CREATED, Json(reservation)))
}

/// Cancela a reserva do par (data, turno). Admins cancelam a de
/// qualquer usuário; os demais, só a própria.
#[utoipa::path(
    delete,
    path = "/api/reservations",
    tag = "Reservas",
    request_body = ReservationActionPayload,
    responses(
        (status = 200, description = "Reserva cancelada"),
        (status = 404, description = "Reserva não encontrada"),
    ),
    security(("api_jwt" = []))
)]
pub async fn cancel(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Json(payload): Json<ReservationActionPayload>,
) -> Result<impl IntoResponse, AppError> {
    app_state
        .booking_service
        .cancel(&caller, payload.date, payload.time_slot_id)
        .await?;
    Ok(StatusCode::OK)
}

/// As reservas do próprio chamador no intervalo, com a duração de cada
/// turno.
#[utoipa::path(
    get,
    path = "/api/reservations",
    tag = "Reservas",
    params(RangeQuery),
    responses((status = 200, body = Vec<UserReservation>)),
    security(("api_jwt" = []))
)]
pub async fn my_reservations(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(query.from, query.to)?;

    let reservations = app_state
        .booking_service
        .user_reservations(caller.id, query.from, query.to)
        .await?;
    Ok((StatusCode::OK, Json(reservations)))
}

/// Ocupação anônima do intervalo: quais pares (data, turno) estão
/// tomados, sem expor a identidade de quem reservou.
#[utoipa::path(
    get,
    path = "/api/occupancy",
    tag = "Reservas",
    params(RangeQuery),
    responses((status = 200, body = Vec<OccupancyEntry>)),
    security(("api_jwt" = []))
)]
pub async fn occupancy(
    State(app_state): State<AppState>,
    CurrentUser(_caller): CurrentUser,
    Query(query): Query<RangeQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(query.from, query.to)?;

    let entries = app_state
        .booking_service
        .occupancy(query.from, query.to)
        .await?;
    Ok((StatusCode::OK, Json(entries)))
}
