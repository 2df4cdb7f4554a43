// src/models/booking.rs

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Reserva: a posse de UM turno em UMA data por UM usuário ---
// A unicidade em (date, time_slot_id) é garantida por constraint no banco.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Reservation {
    pub id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub time_slot_id: i32,
    pub created_at: DateTime<Utc>,
}

// Linha de ocupação anônima: diz que o turno está tomado, sem expor quem.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyEntry {
    pub date: NaiveDate,
    pub time_slot_id: i32,
}

// Reserva do próprio usuário, já com a duração do turno (para a cota).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserReservation {
    pub date: NaiveDate,
    pub time_slot_id: i32,
    pub duration_hours: Decimal,
}

// Linha bem tipada para o formatador externo de relatórios.
// A formatação (CSV/XLS) é responsabilidade de quem consome.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExportRow {
    pub date: NaiveDate,
    pub puesto: String,
    pub slot: String,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub duration_hours: Decimal,
    pub full_name: Option<String>,
    pub hierarchy: Option<String>,
}

// Reserva que ficou dentro de um bloqueio criado depois dela.
// Bloqueios não apagam reservas existentes; o conflito é exposto ao
// admin para resolução manual.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BlackoutConflict {
    pub reservation_id: Uuid,
    pub user_id: Uuid,
    pub date: NaiveDate,
    pub time_slot_id: i32,
    pub blackout_id: Uuid,
    pub reason: Option<String>,
}

// --- Estado de um par (data, turno) visto pelo chamador ---
// Precedência: Closed (bloqueio OU turno desabilitado) vence ocupação;
// ocupação vence Open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SlotState {
    Open,
    ReservedByOther,
    ReservedByCaller,
    Closed,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SlotAvailability {
    pub time_slot_id: i32,
    pub state: SlotState,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DayAvailability {
    pub date: NaiveDate,
    pub slots: Vec<SlotAvailability>,
    // Uso do próprio chamador no dia, para a UI pré-validar a cota
    // antes de chamar o serviço de reserva.
    pub own_count: i64,
    pub own_hours: Decimal,
    // Horas do chamador acumuladas no mês-calendário deste dia. Por dia
    // porque o intervalo consultado pode cruzar a virada do mês.
    pub month_hours: Decimal,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityReport {
    pub puesto_id: i32,
    pub days: Vec<DayAvailability>,
}
