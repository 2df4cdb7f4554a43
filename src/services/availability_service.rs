// src/services/availability_service.rs
//
// O resolver de disponibilidade: leitura pura composta de catálogo +
// reservas + bloqueios + perfil do chamador. Nenhum cache de processo —
// cada consulta vai à fonte autoritativa.

use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BlackoutRepository, CatalogRepository, ReservationRepository},
    models::{
        blackout::{self, Blackout},
        booking::{
            AvailabilityReport, DayAvailability, Reservation, SlotAvailability, SlotState,
            UserReservation,
        },
        catalog::{Puesto, TimeSlot},
        profile::Profile,
    },
    services::quota,
};

#[derive(Clone)]
pub struct AvailabilityService {
    catalog_repo: CatalogRepository,
    reservation_repo: ReservationRepository,
    blackout_repo: BlackoutRepository,
    pool: sqlx::PgPool,
}

impl AvailabilityService {
    pub fn new(
        catalog_repo: CatalogRepository,
        reservation_repo: ReservationRepository,
        blackout_repo: BlackoutRepository,
        pool: sqlx::PgPool,
    ) -> Self {
        Self {
            catalog_repo,
            reservation_repo,
            blackout_repo,
            pool,
        }
    }

    /// Estado de cada (dia, turno) do puesto no intervalo, na visão do
    /// chamador, mais o uso diário e mensal dele (para a UI pré-validar
    /// a cota antes de tentar reservar).
    pub async fn get_availability(
        &self,
        caller: &Profile,
        puesto_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<AvailabilityReport, AppError> {
        if !caller.can_use_puesto(puesto_id) {
            return Err(AppError::PermissionDenied);
        }

        let puesto = self
            .catalog_repo
            .find_puesto(&self.pool, puesto_id)
            .await?
            .ok_or(AppError::PuestoNotFound)?;

        // Quem não é admin não vê turnos desabilitados; o admin os vê
        // como Closed.
        let slots: Vec<TimeSlot> = self
            .catalog_repo
            .list_slots(puesto_id, caller.is_admin)
            .await?
            .into_iter()
            .filter(|s| caller.can_use_slot(s.id))
            .collect();

        let reservations = self
            .reservation_repo
            .list_for_puesto(puesto_id, from, to)
            .await?;
        let blackouts = self.blackout_repo.list_range(from, to).await?;

        // Uso do chamador em todos os puestos, cobrindo os meses-
        // calendário inteiros que o intervalo toca (é o que a cota
        // mensal olha, e o intervalo pode cruzar a virada do mês).
        let (months_from, _) = quota::month_bounds(from);
        let (_, months_to) = quota::month_bounds(to);
        let own = self
            .reservation_repo
            .user_reservations(&self.pool, caller.id, months_from, months_to)
            .await?;

        let days = resolve_range(
            caller.id,
            &puesto,
            &slots,
            from,
            to,
            &reservations,
            &blackouts,
            &own,
        );

        Ok(AvailabilityReport { puesto_id, days })
    }

}

/// Composição pura do estado por (dia, turno).
/// Precedência: Closed (bloqueio ou turno/puesto desabilitado) vence
/// ocupação; ocupação vence Open.
#[allow(clippy::too_many_arguments)]
fn resolve_range(
    caller_id: Uuid,
    puesto: &Puesto,
    slots: &[TimeSlot],
    from: NaiveDate,
    to: NaiveDate,
    reservations: &[Reservation],
    blackouts: &[Blackout],
    own: &[UserReservation],
) -> Vec<DayAvailability> {
    let mut days = Vec::new();
    for date in from.iter_days().take_while(|d| *d <= to) {
        let slot_states = slots
            .iter()
            .map(|slot| {
                let state = if !puesto.enabled
                    || !slot.enabled
                    || blackout::is_closed(blackouts, date, puesto.id, slot.id)
                {
                    SlotState::Closed
                } else if let Some(r) = reservations
                    .iter()
                    .find(|r| r.date == date && r.time_slot_id == slot.id)
                {
                    if r.user_id == caller_id {
                        SlotState::ReservedByCaller
                    } else {
                        SlotState::ReservedByOther
                    }
                } else {
                    SlotState::Open
                };
                SlotAvailability {
                    time_slot_id: slot.id,
                    state,
                }
            })
            .collect();

        let own_today: Vec<_> = own.iter().filter(|r| r.date == date).collect();
        let month_hours = own
            .iter()
            .filter(|r| r.date.year() == date.year() && r.date.month() == date.month())
            .map(|r| r.duration_hours)
            .sum::<Decimal>();
        days.push(DayAvailability {
            date,
            slots: slot_states,
            own_count: own_today.len() as i64,
            own_hours: own_today.iter().map(|r| r.duration_hours).sum::<Decimal>(),
            month_hours,
        });
    }
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveTime, Utc};

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn t(s: &str) -> NaiveTime {
        s.parse().unwrap()
    }

    fn puesto(id: i32, name: &str) -> Puesto {
        Puesto {
            id,
            name: name.into(),
            enabled: true,
        }
    }

    fn slot(id: i32, puesto_id: i32, label: &str, start: &str, end: &str, hours: i64) -> TimeSlot {
        TimeSlot {
            id,
            puesto_id,
            label: label.into(),
            start_time: t(start),
            end_time: t(end),
            duration_hours: Decimal::from(hours),
            enabled: true,
        }
    }

    fn reservation(user: Uuid, date: &str, slot_id: i32) -> Reservation {
        Reservation {
            id: Uuid::new_v4(),
            user_id: user,
            date: d(date),
            time_slot_id: slot_id,
            created_at: Utc::now(),
        }
    }

    fn blackout_for_puesto(from: &str, to: &str, puesto_id: i32, reason: &str) -> Blackout {
        Blackout {
            id: Uuid::new_v4(),
            date_from: d(from),
            date_to: d(to),
            puesto_id: Some(puesto_id),
            time_slot_id: None,
            reason: Some(reason.into()),
            created_at: Utc::now(),
        }
    }

    fn state_of(days: &[DayAvailability], date: &str, slot_id: i32) -> SlotState {
        days.iter()
            .find(|day| day.date == d(date))
            .and_then(|day| day.slots.iter().find(|s| s.time_slot_id == slot_id))
            .map(|s| s.state)
            .unwrap()
    }

    #[test]
    fn distingue_minha_reserva_da_de_outro() {
        let me = Uuid::new_v4();
        let other = Uuid::new_v4();
        let p = puesto(1, "SALON");
        let slots = vec![
            slot(10, 1, "10:00-14:00", "10:00:00", "14:00:00", 4),
            slot(11, 1, "14:00-18:00", "14:00:00", "18:00:00", 4),
        ];
        let reservations = vec![
            reservation(me, "2024-03-01", 10),
            reservation(other, "2024-03-01", 11),
        ];
        let days = resolve_range(
            me,
            &p,
            &slots,
            d("2024-03-01"),
            d("2024-03-02"),
            &reservations,
            &[],
            &[],
        );
        assert_eq!(state_of(&days, "2024-03-01", 10), SlotState::ReservedByCaller);
        assert_eq!(state_of(&days, "2024-03-01", 11), SlotState::ReservedByOther);
        assert_eq!(state_of(&days, "2024-03-02", 10), SlotState::Open);
        assert_eq!(state_of(&days, "2024-03-02", 11), SlotState::Open);
    }

    #[test]
    fn bloqueio_de_puesto_fecha_todos_os_turnos_do_dia() {
        // bloqueio "holiday" no SALON em 2024-03-05 fecha todos os
        // turnos daquele dia
        let me = Uuid::new_v4();
        let p = puesto(1, "SALON");
        let slots = vec![
            slot(10, 1, "10:00-14:00", "10:00:00", "14:00:00", 4),
            slot(11, 1, "14:00-18:00", "14:00:00", "18:00:00", 4),
        ];
        let blackouts = vec![blackout_for_puesto("2024-03-05", "2024-03-05", 1, "holiday")];
        let days = resolve_range(
            me,
            &p,
            &slots,
            d("2024-03-04"),
            d("2024-03-06"),
            &[],
            &blackouts,
            &[],
        );
        assert_eq!(state_of(&days, "2024-03-05", 10), SlotState::Closed);
        assert_eq!(state_of(&days, "2024-03-05", 11), SlotState::Closed);
        assert_eq!(state_of(&days, "2024-03-04", 10), SlotState::Open);
        assert_eq!(state_of(&days, "2024-03-06", 10), SlotState::Open);
    }

    #[test]
    fn closed_tem_precedencia_sobre_ocupacao() {
        // reserva feita antes do bloqueio continua existindo, mas a visão
        // do dia é Closed
        let me = Uuid::new_v4();
        let p = puesto(1, "SALON");
        let slots = vec![slot(10, 1, "10:00-14:00", "10:00:00", "14:00:00", 4)];
        let reservations = vec![reservation(me, "2024-03-05", 10)];
        let blackouts = vec![blackout_for_puesto("2024-03-05", "2024-03-05", 1, "holiday")];
        let days = resolve_range(
            me,
            &p,
            &slots,
            d("2024-03-05"),
            d("2024-03-05"),
            &reservations,
            &blackouts,
            &[],
        );
        assert_eq!(state_of(&days, "2024-03-05", 10), SlotState::Closed);
    }

    #[test]
    fn turno_desabilitado_aparece_como_closed() {
        let me = Uuid::new_v4();
        let p = puesto(1, "SALON");
        let mut s = slot(10, 1, "10:00-14:00", "10:00:00", "14:00:00", 4);
        s.enabled = false;
        let days = resolve_range(
            me,
            &p,
            &[s],
            d("2024-03-01"),
            d("2024-03-01"),
            &[],
            &[],
            &[],
        );
        assert_eq!(state_of(&days, "2024-03-01", 10), SlotState::Closed);
    }

    #[test]
    fn uso_diario_do_chamador_acompanha_cada_dia() {
        let me = Uuid::new_v4();
        let p = puesto(1, "SALON");
        let slots = vec![slot(10, 1, "10:00-14:00", "10:00:00", "14:00:00", 4)];
        let own = vec![
            UserReservation {
                date: d("2024-03-01"),
                time_slot_id: 10,
                duration_hours: Decimal::from(4),
            },
            UserReservation {
                date: d("2024-03-01"),
                time_slot_id: 22,
                duration_hours: Decimal::from(4),
            },
        ];
        let days = resolve_range(
            me,
            &p,
            &slots,
            d("2024-03-01"),
            d("2024-03-02"),
            &[],
            &[],
            &own,
        );
        assert_eq!(days[0].own_count, 2);
        assert_eq!(days[0].own_hours, Decimal::from(8));
        assert_eq!(days[1].own_count, 0);
        assert_eq!(days[1].own_hours, Decimal::ZERO);
        // o acumulado do mês vale para os dois dias, que estão no mesmo mês
        assert_eq!(days[0].month_hours, Decimal::from(8));
        assert_eq!(days[1].month_hours, Decimal::from(8));
    }

    #[test]
    fn intervalo_que_cruza_o_mes_usa_o_acumulado_de_cada_mes() {
        // reservas em março E abril; um intervalo 30/03..03/04 deve
        // mostrar o uso de abril nos dias de abril, não zerá-los
        let me = Uuid::new_v4();
        let p = puesto(1, "SALON");
        let slots = vec![slot(10, 1, "10:00-14:00", "10:00:00", "14:00:00", 4)];
        let own = vec![
            UserReservation {
                date: d("2024-03-30"),
                time_slot_id: 10,
                duration_hours: Decimal::from(4),
            },
            UserReservation {
                date: d("2024-04-02"),
                time_slot_id: 10,
                duration_hours: Decimal::from(4),
            },
            UserReservation {
                date: d("2024-04-03"),
                time_slot_id: 22,
                duration_hours: Decimal::from(2),
            },
        ];
        let days = resolve_range(
            me,
            &p,
            &slots,
            d("2024-03-30"),
            d("2024-04-03"),
            &[],
            &[],
            &own,
        );

        let day = |s: &str| days.iter().find(|day| day.date == d(s)).unwrap();

        assert_eq!(day("2024-03-30").own_count, 1);
        assert_eq!(day("2024-03-30").month_hours, Decimal::from(4));
        assert_eq!(day("2024-03-31").own_count, 0);
        assert_eq!(day("2024-03-31").month_hours, Decimal::from(4));

        assert_eq!(day("2024-04-02").own_count, 1);
        assert_eq!(day("2024-04-02").own_hours, Decimal::from(4));
        assert_eq!(day("2024-04-02").month_hours, Decimal::from(6));
        assert_eq!(day("2024-04-03").own_count, 1);
        assert_eq!(day("2024-04-03").month_hours, Decimal::from(6));
    }
}
