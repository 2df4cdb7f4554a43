// src/handlers/availability.rs

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    common::error::AppError, config::AppState, handlers::validate_date_range,
    middleware::auth::CurrentUser, models::booking::AvailabilityReport,
};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AvailabilityQuery {
    pub puesto_id: i32,
    pub from: NaiveDate,
    pub to: NaiveDate,
}

/// Estado de cada (dia, turno) do puesto no intervalo, na visão do
/// chamador, com o uso diário/mensal dele para pré-validação de cota.
#[utoipa::path(
    get,
    path = "/api/availability",
    tag = "Reservas",
    params(AvailabilityQuery),
    responses((status = 200, body = AvailabilityReport)),
    security(("api_jwt" = []))
)]
pub async fn get_availability(
    State(app_state): State<AppState>,
    CurrentUser(caller): CurrentUser,
    Query(query): Query<AvailabilityQuery>,
) -> Result<impl IntoResponse, AppError> {
    validate_date_range(query.from, query.to)?;

    let report = app_state
        .availability_service
        .get_availability(&caller, query.puesto_id, query.from, query.to)
        .await?;
    Ok((StatusCode::OK, Json(report)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parametros_da_consulta_em_snake_case() {
        // os demais handlers usam snake_case na query string; este também
        let query: AvailabilityQuery =
            serde_json::from_str(r#"{"puesto_id": 1, "from": "2024-03-01", "to": "2024-03-05"}"#)
                .unwrap();
        assert_eq!(query.puesto_id, 1);
        assert_eq!(query.from, "2024-03-01".parse::<NaiveDate>().unwrap());
    }
}
