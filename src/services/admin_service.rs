// src/services/admin_service.rs
//
// Operações administrativas: bloqueios, cotas/permissões por usuário e a
// listagem de conflitos. Todas exigem chamador admin.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{BlackoutRepository, CatalogRepository, ProfileRepository, ReservationRepository},
    models::{blackout::Blackout, booking::BlackoutConflict, catalog::TimeSlot, profile::Profile},
};

#[derive(Clone)]
pub struct AdminService {
    profile_repo: ProfileRepository,
    blackout_repo: BlackoutRepository,
    catalog_repo: CatalogRepository,
    reservation_repo: ReservationRepository,
}

impl AdminService {
    pub fn new(
        profile_repo: ProfileRepository,
        blackout_repo: BlackoutRepository,
        catalog_repo: CatalogRepository,
        reservation_repo: ReservationRepository,
    ) -> Self {
        Self {
            profile_repo,
            blackout_repo,
            catalog_repo,
            reservation_repo,
        }
    }

    // ---
    // Bloqueios
    // ---

    pub async fn list_blackouts(
        &self,
        caller: &Profile,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Blackout>, AppError> {
        self.require_admin(caller)?;
        self.blackout_repo.list_range(from, to).await
    }

    /// Cria um bloqueio para o intervalo. Escopos possíveis: um puesto
    /// inteiro, um turno específico, ou o catálogo todo (ambos nulos).
    /// Não apaga reservas já existentes no intervalo — elas aparecem em
    /// `blackout_conflicts` para o admin resolver.
    pub async fn add_blackout(
        &self,
        caller: &Profile,
        from: NaiveDate,
        to: NaiveDate,
        puesto_id: Option<i32>,
        time_slot_id: Option<i32>,
        reason: Option<&str>,
    ) -> Result<Blackout, AppError> {
        self.require_admin(caller)?;
        if let Some(pid) = puesto_id {
            self.catalog_repo
                .find_puesto_by_id(pid)
                .await?
                .ok_or(AppError::PuestoNotFound)?;
        }
        if let Some(sid) = time_slot_id {
            let slot = self
                .catalog_repo
                .find_slot_by_id(sid)
                .await?
                .ok_or(AppError::SlotNotFound)?;
            check_blackout_scope(&slot, puesto_id)?;
        }
        let blackout = self
            .blackout_repo
            .add(from, to, puesto_id, time_slot_id, reason)
            .await?;
        tracing::info!(
            "Bloqueio criado: {}..{} (puesto: {:?}, turno: {:?}, motivo: {:?})",
            from,
            to,
            puesto_id,
            time_slot_id,
            reason
        );
        Ok(blackout)
    }

    /// Remove bloqueios pelos mesmos campos da criação; devolve quantos
    /// caíram. Zero vira `BlackoutNotFound`.
    pub async fn remove_blackout(
        &self,
        caller: &Profile,
        from: NaiveDate,
        to: NaiveDate,
        puesto_id: Option<i32>,
        time_slot_id: Option<i32>,
    ) -> Result<u64, AppError> {
        self.require_admin(caller)?;
        let removed = self
            .blackout_repo
            .remove(from, to, puesto_id, time_slot_id)
            .await?;
        if removed == 0 {
            return Err(AppError::BlackoutNotFound);
        }
        tracing::info!("{} bloqueio(s) removido(s): {}..{}", removed, from, to);
        Ok(removed)
    }

    pub async fn blackout_conflicts(
        &self,
        caller: &Profile,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BlackoutConflict>, AppError> {
        self.require_admin(caller)?;
        self.reservation_repo.blackout_conflicts(from, to).await
    }

    // ---
    // Usuários (PermissionManager)
    // ---

    pub async fn list_users(
        &self,
        caller: &Profile,
        filter: Option<&str>,
    ) -> Result<Vec<Profile>, AppError> {
        self.require_admin(caller)?;
        self.profile_repo.list(filter).await
    }

    /// Substituição completa da cota/permissões de um usuário.
    #[allow(clippy::too_many_arguments)]
    pub async fn set_user_quota(
        &self,
        caller: &Profile,
        user_id: Uuid,
        is_admin: bool,
        restricted: bool,
        allowed_puestos: Option<Vec<i32>>,
        allowed_time_slots: Option<Vec<i32>>,
        daily_max_slots: i32,
        daily_max_hours: Decimal,
        monthly_max_hours: Decimal,
    ) -> Result<Profile, AppError> {
        self.require_admin(caller)?;
        let profile = self
            .profile_repo
            .upsert(
                user_id,
                is_admin,
                restricted,
                allowed_puestos,
                allowed_time_slots,
                daily_max_slots,
                daily_max_hours,
                monthly_max_hours,
            )
            .await?;
        tracing::info!("Cota/permissões atualizadas para o usuário {}", user_id);
        Ok(profile)
    }

    fn require_admin(&self, caller: &Profile) -> Result<(), AppError> {
        if caller.is_admin {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

// Com puesto E turno definidos, o turno precisa pertencer àquele puesto;
// caso contrário o predicado de cobertura nunca casa e o bloqueio fica
// inerte no banco.
fn check_blackout_scope(slot: &TimeSlot, puesto_id: Option<i32>) -> Result<(), AppError> {
    if puesto_id.is_some_and(|pid| pid != slot.puesto_id) {
        let mut errors = validator::ValidationErrors::new();
        let mut err = validator::ValidationError::new("mismatch");
        err.message = Some("O turno não pertence ao puesto informado.".into());
        errors.add("timeSlotId", err);
        return Err(AppError::ValidationError(errors));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn slot_of_puesto(puesto_id: i32) -> TimeSlot {
        TimeSlot {
            id: 10,
            puesto_id,
            label: "10:00-14:00".into(),
            start_time: "10:00:00".parse().unwrap(),
            end_time: "14:00:00".parse().unwrap(),
            duration_hours: Decimal::from(4),
            enabled: true,
        }
    }

    #[test]
    fn turno_de_outro_puesto_e_rejeitado() {
        let slot = slot_of_puesto(1);
        assert!(check_blackout_scope(&slot, Some(2)).is_err());
    }

    #[test]
    fn turno_do_proprio_puesto_passa() {
        let slot = slot_of_puesto(1);
        assert!(check_blackout_scope(&slot, Some(1)).is_ok());
        // sem puesto informado, o turno sozinho define o escopo
        assert!(check_blackout_scope(&slot, None).is_ok());
    }
}
