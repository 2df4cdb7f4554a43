// src/services/catalog_service.rs

use crate::{
    common::error::AppError,
    db::CatalogRepository,
    models::{
        catalog::{Puesto, TimeSlot},
        profile::Profile,
    },
};

#[derive(Clone)]
pub struct CatalogService {
    catalog_repo: CatalogRepository,
}

impl CatalogService {
    pub fn new(catalog_repo: CatalogRepository) -> Self {
        Self { catalog_repo }
    }

    /// Puestos visíveis para o chamador: admins veem tudo; usuários
    /// restritos só veem a allow-list deles.
    pub async fn list_puestos(&self, caller: &Profile) -> Result<Vec<Puesto>, AppError> {
        let puestos = self
            .catalog_repo
            .list_puestos(caller.is_admin)
            .await?
            .into_iter()
            .filter(|p| caller.can_use_puesto(p.id))
            .collect();
        Ok(puestos)
    }

    pub async fn list_slots(
        &self,
        caller: &Profile,
        puesto_id: i32,
    ) -> Result<Vec<TimeSlot>, AppError> {
        if !caller.can_use_puesto(puesto_id) {
            return Err(AppError::PermissionDenied);
        }
        let slots = self
            .catalog_repo
            .list_slots(puesto_id, caller.is_admin)
            .await?
            .into_iter()
            .filter(|s| caller.can_use_slot(s.id))
            .collect();
        Ok(slots)
    }

    /// Habilita/desabilita um turno. Não cancela reservas existentes;
    /// só impede novas.
    pub async fn set_slot_enabled(
        &self,
        caller: &Profile,
        time_slot_id: i32,
        enabled: bool,
    ) -> Result<(), AppError> {
        if !caller.is_admin {
            return Err(AppError::PermissionDenied);
        }
        let updated = self.catalog_repo.set_slot_enabled(time_slot_id, enabled).await?;
        if updated == 0 {
            return Err(AppError::SlotNotFound);
        }
        tracing::info!("Turno {} habilitado = {}", time_slot_id, enabled);
        Ok(())
    }

    /// Habilita/desabilita todos os turnos de um puesto de uma vez.
    pub async fn set_all_slots_enabled(
        &self,
        caller: &Profile,
        puesto_id: i32,
        enabled: bool,
    ) -> Result<u64, AppError> {
        if !caller.is_admin {
            return Err(AppError::PermissionDenied);
        }
        let puesto = self
            .catalog_repo
            .find_puesto_by_id(puesto_id)
            .await?
            .ok_or(AppError::PuestoNotFound)?;
        let updated = self
            .catalog_repo
            .set_all_slots_enabled(puesto.id, enabled)
            .await?;
        tracing::info!(
            "Puesto {}: {} turnos com habilitado = {}",
            puesto.name,
            updated,
            enabled
        );
        Ok(updated)
    }
}
