// src/services/booking_service.rs
//
// O núcleo transacional: reservar e cancelar. A máquina de estados de um
// par (data, turno) é Open -> Reserved -> Open (cancelamento), ou
// Open -> Closed (bloqueio/desabilitação). Reserved nunca vira Closed só
// por um bloqueio: reservas existentes sobrevivem.

use chrono::NaiveDate;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BlackoutRepository, CatalogRepository, ReservationRepository},
    models::{
        blackout,
        booking::{ExportRow, OccupancyEntry, Reservation, UserReservation},
        profile::Profile,
    },
    services::quota::{self, QuotaDecision},
};

#[derive(Clone)]
pub struct BookingService {
    catalog_repo: CatalogRepository,
    reservation_repo: ReservationRepository,
    blackout_repo: BlackoutRepository,
    pool: PgPool,
}

impl BookingService {
    pub fn new(
        catalog_repo: CatalogRepository,
        reservation_repo: ReservationRepository,
        blackout_repo: BlackoutRepository,
        pool: PgPool,
    ) -> Self {
        Self {
            catalog_repo,
            reservation_repo,
            blackout_repo,
            pool,
        }
    }

    /// Reserva um turno para o chamador. Toda a validação e o INSERT
    /// rodam numa única transação SERIALIZABLE: a releitura da cota não
    /// pode correr contra um INSERT concorrente do próprio usuário, e a
    /// constraint de unicidade decide sozinha quem vence a corrida pelo
    /// turno.
    pub async fn reserve(
        &self,
        caller: &Profile,
        date: NaiveDate,
        time_slot_id: i32,
    ) -> Result<Reservation, AppError> {
        let mut tx = self.pool.begin().await?;
        self.set_transaction_serializable(&mut tx).await?;

        // 1. O turno existe, está habilitado e não está bloqueado na data
        let slot = self
            .catalog_repo
            .find_slot(&mut *tx, time_slot_id)
            .await?
            .ok_or(AppError::SlotNotFound)?;
        let puesto = self
            .catalog_repo
            .find_puesto(&mut *tx, slot.puesto_id)
            .await?
            .ok_or(AppError::PuestoNotFound)?;
        if !slot.enabled || !puesto.enabled {
            return Err(AppError::SlotClosed);
        }
        let blackouts = self.blackout_repo.overlapping(&mut *tx, date, date).await?;
        if blackout::is_closed(&blackouts, date, puesto.id, slot.id) {
            return Err(AppError::SlotClosed);
        }

        // 2. As allow-lists do chamador permitem este puesto/turno
        if !caller.can_use_puesto(puesto.id) || !caller.can_use_slot(slot.id) {
            return Err(AppError::PermissionDenied);
        }

        // 3. Cota, recalculada das reservas vivas do mês DENTRO da transação
        let (month_from, month_to) = quota::month_bounds(date);
        let month_reservations = self
            .reservation_repo
            .user_reservations(&mut *tx, caller.id, month_from, month_to)
            .await?;
        if let QuotaDecision::Deny(reason) =
            quota::evaluate(caller, date, slot.duration_hours, &month_reservations)
        {
            return Err(reason.into());
        }

        // 4. INSERT atômico sob a constraint de unicidade
        let reservation = self
            .reservation_repo
            .insert(&mut *tx, caller.id, date, slot.id)
            .await?;

        tx.commit().await?;
        tracing::info!(
            "Reserva criada: usuário {} / {} / turno {}",
            caller.id,
            date,
            slot.id
        );
        Ok(reservation)
    }

    /// Cancela a reserva do par (data, turno). A segunda chamada sobre o
    /// mesmo par devolve `ReservationNotFound` — não é sucesso silencioso,
    /// a distinção importa para auditoria.
    pub async fn cancel(
        &self,
        caller: &Profile,
        date: NaiveDate,
        time_slot_id: i32,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;

        let reservation = self
            .reservation_repo
            .find_by_date_slot(&mut *tx, date, time_slot_id)
            .await?
            .ok_or(AppError::ReservationNotFound)?;

        // Só o dono cancela, a não ser que o chamador seja admin
        if !caller.is_admin && reservation.user_id != caller.id {
            return Err(AppError::PermissionDenied);
        }

        let deleted = self.reservation_repo.delete(&mut *tx, reservation.id).await?;
        if deleted == 0 {
            // outro cancel venceu a corrida entre o SELECT e o DELETE
            return Err(AppError::ReservationNotFound);
        }

        tx.commit().await?;
        tracing::info!(
            "Reserva cancelada: {} / turno {} (por {})",
            date,
            time_slot_id,
            caller.id
        );
        Ok(())
    }

    /// Apaga em lote as reservas do intervalo (opcionalmente de um só
    /// puesto). Irreversível; a confirmação explícita fica na camada de
    /// cima. Tudo-ou-nada dentro da transação.
    pub async fn delete_reservations(
        &self,
        caller: &Profile,
        from: NaiveDate,
        to: NaiveDate,
        puesto_id: Option<i32>,
    ) -> Result<u64, AppError> {
        if !caller.is_admin {
            return Err(AppError::PermissionDenied);
        }

        let mut tx = self.pool.begin().await?;
        let count = self
            .reservation_repo
            .delete_range(&mut *tx, from, to, puesto_id)
            .await?;
        tx.commit().await?;

        tracing::info!(
            "Remoção em lote: {} reservas entre {} e {} (puesto: {:?})",
            count,
            from,
            to,
            puesto_id
        );
        Ok(count)
    }

    // ---
    // Leituras expostas à UI / camada de exportação
    // ---

    pub async fn occupancy(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OccupancyEntry>, AppError> {
        self.reservation_repo.occupancy(from, to).await
    }

    pub async fn user_reservations(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<UserReservation>, AppError> {
        self.reservation_repo
            .user_reservations(&self.pool, user_id, from, to)
            .await
    }

    pub async fn export_rows(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExportRow>, AppError> {
        self.reservation_repo.export_rows(from, to).await
    }

    // Isolamento SERIALIZABLE para as transações de escrita deste serviço.
    async fn set_transaction_serializable(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
    ) -> Result<(), AppError> {
        sqlx::query("SET TRANSACTION ISOLATION LEVEL SERIALIZABLE")
            .execute(&mut **tx)
            .await?;
        Ok(())
    }
}
