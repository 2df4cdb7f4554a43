// src/services/quota.rs
//
// Política de cotas. Os contadores nunca são armazenados: sempre são
// recalculados a partir das reservas vivas do mês, passadas pelo chamador
// (dentro da transação de reserva, quando for o caso).

use chrono::{Datelike, Days, Months, NaiveDate};
use rust_decimal::Decimal;

use crate::{
    common::error::AppError,
    models::{booking::UserReservation, profile::Profile},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDecision {
    Allow,
    Deny(QuotaDenyReason),
}

// Os motivos são distinguíveis para a UI mostrar a mensagem certa.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaDenyReason {
    DailySlotLimit,
    DailyHourLimit,
    MonthlyHourLimit,
}

impl From<QuotaDenyReason> for AppError {
    fn from(reason: QuotaDenyReason) -> Self {
        match reason {
            QuotaDenyReason::DailySlotLimit => AppError::DailySlotLimit,
            QuotaDenyReason::DailyHourLimit => AppError::DailyHourLimit,
            QuotaDenyReason::MonthlyHourLimit => AppError::MonthlyHourLimit,
        }
    }
}

/// Primeiro e último dia do mês-calendário que contém `date`.
pub fn month_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let first = NaiveDate::from_ymd_opt(date.year(), date.month(), 1).unwrap_or(date);
    let last = first + Months::new(1) - Days::new(1);
    (first, last)
}

/// Avalia se o usuário ainda cabe na cota para reservar `candidate_hours`
/// em `date`. As checagens rodam nesta ordem e param na primeira falha:
/// 1. quantidade de reservas no dia < daily_max_slots
/// 2. horas do dia + candidata <= daily_max_hours
/// 3. horas do mês + candidata <= monthly_max_hours
pub fn evaluate(
    profile: &Profile,
    date: NaiveDate,
    candidate_hours: Decimal,
    month_reservations: &[UserReservation],
) -> QuotaDecision {
    let day_count = month_reservations.iter().filter(|r| r.date == date).count();
    if day_count as i32 >= profile.daily_max_slots {
        return QuotaDecision::Deny(QuotaDenyReason::DailySlotLimit);
    }

    let day_hours: Decimal = month_reservations
        .iter()
        .filter(|r| r.date == date)
        .map(|r| r.duration_hours)
        .sum();
    if day_hours + candidate_hours > profile.daily_max_hours {
        return QuotaDecision::Deny(QuotaDenyReason::DailyHourLimit);
    }

    let month_hours: Decimal = month_reservations.iter().map(|r| r.duration_hours).sum();
    if month_hours + candidate_hours > profile.monthly_max_hours {
        return QuotaDecision::Deny(QuotaDenyReason::MonthlyHourLimit);
    }

    QuotaDecision::Allow
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn d(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn reservation(date: &str, slot: i32, hours: i64) -> UserReservation {
        UserReservation {
            date: d(date),
            time_slot_id: slot,
            duration_hours: Decimal::from(hours),
        }
    }

    fn profile() -> Profile {
        // padrão: 2 turnos/dia, 8 h/dia, 160 h/mês
        Profile::defaults_for(Uuid::new_v4())
    }

    #[test]
    fn dia_vazio_permite_reservar() {
        let decision = evaluate(&profile(), d("2024-03-01"), Decimal::from(4), &[]);
        assert_eq!(decision, QuotaDecision::Allow);
    }

    #[test]
    fn terceira_reserva_no_dia_e_negada_por_quantidade() {
        // 2×4h no dia: a terceira cai no limite de quantidade, seja
        // qual for a duração
        let existing = vec![
            reservation("2024-03-01", 1, 4),
            reservation("2024-03-01", 2, 4),
        ];
        let decision = evaluate(&profile(), d("2024-03-01"), Decimal::from(1), &existing);
        assert_eq!(
            decision,
            QuotaDecision::Deny(QuotaDenyReason::DailySlotLimit)
        );
    }

    #[test]
    fn teto_de_horas_do_dia() {
        let existing = vec![reservation("2024-03-01", 1, 6)];
        // 6 + 4 > 8
        let decision = evaluate(&profile(), d("2024-03-01"), Decimal::from(4), &existing);
        assert_eq!(
            decision,
            QuotaDecision::Deny(QuotaDenyReason::DailyHourLimit)
        );
        // 6 + 2 = 8 ainda cabe
        let decision = evaluate(&profile(), d("2024-03-01"), Decimal::from(2), &existing);
        assert_eq!(decision, QuotaDecision::Allow);
    }

    #[test]
    fn limite_de_quantidade_vence_o_de_horas() {
        // com 2 reservas curtas no dia, as horas ainda caberiam, mas a
        // checagem de quantidade vem primeiro
        let existing = vec![
            reservation("2024-03-01", 1, 2),
            reservation("2024-03-01", 2, 2),
        ];
        let decision = evaluate(&profile(), d("2024-03-01"), Decimal::from(2), &existing);
        assert_eq!(
            decision,
            QuotaDecision::Deny(QuotaDenyReason::DailySlotLimit)
        );
    }

    #[test]
    fn teto_mensal_conta_todos_os_dias_do_mes() {
        // 19 dias × 2 turnos × 4h = 152h; mais 8h em outro dia = 160h.
        let mut existing = Vec::new();
        for day in 1..=19 {
            existing.push(reservation(&format!("2024-03-{:02}", day), day * 2, 4));
            existing.push(reservation(&format!("2024-03-{:02}", day), day * 2 + 1, 4));
        }
        // dia novo, primeira reserva de 8h fecha exatamente em 160
        let decision = evaluate(&profile(), d("2024-03-20"), Decimal::from(8), &existing);
        assert_eq!(decision, QuotaDecision::Allow);

        existing.push(reservation("2024-03-20", 99, 8));
        // qualquer hora a mais estoura o mês
        let decision = evaluate(&profile(), d("2024-03-21"), Decimal::from(4), &existing);
        assert_eq!(
            decision,
            QuotaDecision::Deny(QuotaDenyReason::MonthlyHourLimit)
        );
    }

    #[test]
    fn dias_diferentes_nao_compartilham_cota_diaria() {
        let existing = vec![
            reservation("2024-03-01", 1, 4),
            reservation("2024-03-01", 2, 4),
        ];
        let decision = evaluate(&profile(), d("2024-03-02"), Decimal::from(4), &existing);
        assert_eq!(decision, QuotaDecision::Allow);
    }

    #[test]
    fn limites_do_mes_calendario() {
        assert_eq!(
            month_bounds(d("2024-03-15")),
            (d("2024-03-01"), d("2024-03-31"))
        );
        // fevereiro bissexto
        assert_eq!(
            month_bounds(d("2024-02-10")),
            (d("2024-02-01"), d("2024-02-29"))
        );
        assert_eq!(
            month_bounds(d("2023-12-31")),
            (d("2023-12-01"), d("2023-12-31"))
        );
    }
}
