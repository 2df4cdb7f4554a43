// src/models/catalog.rs

use chrono::NaiveTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

// --- Puesto (unidade física reservável) ---
// Desabilitar um puesto não cancela reservas existentes; apenas o
// esconde das visões de disponibilidade de quem não é admin.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Puesto {
    pub id: i32,
    pub name: String,
    pub enabled: bool,
}

// --- Turno (janela horária de um puesto) ---
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TimeSlot {
    pub id: i32,
    pub puesto_id: i32,
    pub label: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: Decimal,
    pub enabled: bool,
}
