// src/models/blackout.rs

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Bloqueio administrativo (fechamento de turnos) ---
// O escopo é dado pelos campos opcionais:
//   - puesto_id definido       -> fecha o puesto inteiro no intervalo
//   - time_slot_id definido    -> fecha só aquele turno
//   - ambos nulos              -> fechamento de todo o catálogo (feriado)
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Blackout {
    pub id: Uuid,
    pub date_from: NaiveDate,
    pub date_to: NaiveDate,
    pub puesto_id: Option<i32>,
    pub time_slot_id: Option<i32>,
    pub reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Blackout {
    /// Um bloqueio cobre o par (data, puesto, turno) quando a data cai no
    /// intervalo e cada campo de escopo, quando definido, coincide.
    pub fn covers(&self, date: NaiveDate, puesto_id: i32, time_slot_id: i32) -> bool {
        if date < self.date_from || date > self.date_to {
            return false;
        }
        if self.puesto_id.is_some_and(|p| p != puesto_id) {
            return false;
        }
        if self.time_slot_id.is_some_and(|s| s != time_slot_id) {
            return false;
        }
        true
    }
}

/// Verdadeiro se algum bloqueio ativo fecha o turno nessa data.
pub fn is_closed(blackouts: &[Blackout], date: NaiveDate, puesto_id: i32, time_slot_id: i32) -> bool {
    blackouts.iter().any(|b| b.covers(date, puesto_id, time_slot_id))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn blackout(from: &str, to: &str, puesto: Option<i32>, slot: Option<i32>) -> Blackout {
        Blackout {
            id: Uuid::new_v4(),
            date_from: d(from),
            date_to: d(to),
            puesto_id: puesto,
            time_slot_id: slot,
            reason: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn bloqueio_de_puesto_fecha_todos_os_turnos_do_puesto() {
        let bs = vec![blackout("2024-03-05", "2024-03-05", Some(1), None)];
        // qualquer turno do puesto 1 está fechado, mesmo sem linha específica
        assert!(is_closed(&bs, d("2024-03-05"), 1, 10));
        assert!(is_closed(&bs, d("2024-03-05"), 1, 11));
        // outro puesto segue aberto
        assert!(!is_closed(&bs, d("2024-03-05"), 2, 20));
    }

    #[test]
    fn bloqueio_de_turno_nao_afeta_os_demais() {
        let bs = vec![blackout("2024-03-10", "2024-03-12", Some(1), Some(10))];
        assert!(is_closed(&bs, d("2024-03-11"), 1, 10));
        assert!(!is_closed(&bs, d("2024-03-11"), 1, 11));
    }

    #[test]
    fn bloqueio_global_fecha_o_catalogo_inteiro() {
        let bs = vec![blackout("2024-12-25", "2024-12-25", None, None)];
        assert!(is_closed(&bs, d("2024-12-25"), 1, 10));
        assert!(is_closed(&bs, d("2024-12-25"), 7, 99));
        assert!(!is_closed(&bs, d("2024-12-26"), 1, 10));
    }

    #[test]
    fn datas_fora_do_intervalo_ficam_abertas() {
        let bs = vec![blackout("2024-03-05", "2024-03-07", None, None)];
        assert!(!is_closed(&bs, d("2024-03-04"), 1, 10));
        assert!(is_closed(&bs, d("2024-03-05"), 1, 10));
        assert!(is_closed(&bs, d("2024-03-07"), 1, 10));
        assert!(!is_closed(&bs, d("2024-03-08"), 1, 10));
    }
}
