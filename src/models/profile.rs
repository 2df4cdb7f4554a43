// src/models/profile.rs

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Perfil: permissões e limites de cota de um usuário ---
// A identidade (login por magic link) vem do provedor externo; aqui só
// guardamos o que o motor de reservas precisa saber sobre o usuário.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub hierarchy: Option<String>,
    pub is_admin: bool,
    pub restricted: bool,
    // Allow-lists: só fazem efeito quando `restricted = true` E a lista
    // estiver definida. Lista ausente = sem restrição naquele eixo.
    pub allowed_puestos: Option<Vec<i32>>,
    pub allowed_time_slots: Option<Vec<i32>>,
    pub daily_max_slots: i32,
    pub daily_max_hours: Decimal,
    pub monthly_max_hours: Decimal,
}

impl Profile {
    /// Perfil implícito de quem ainda não tem linha em `profiles`:
    /// usuário comum com os limites padrão (2 turnos, 8 h/dia, 160 h/mês).
    pub fn defaults_for(id: Uuid) -> Self {
        Self {
            id,
            full_name: None,
            hierarchy: None,
            is_admin: false,
            restricted: false,
            allowed_puestos: None,
            allowed_time_slots: None,
            daily_max_slots: 2,
            daily_max_hours: Decimal::from(8),
            monthly_max_hours: Decimal::from(160),
        }
    }

    pub fn can_use_puesto(&self, puesto_id: i32) -> bool {
        if self.is_admin || !self.restricted {
            return true;
        }
        match &self.allowed_puestos {
            Some(allowed) => allowed.contains(&puesto_id),
            None => true,
        }
    }

    pub fn can_use_slot(&self, time_slot_id: i32) -> bool {
        if self.is_admin || !self.restricted {
            return true;
        }
        match &self.allowed_time_slots {
            Some(allowed) => allowed.contains(&time_slot_id),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn restricted_profile(puestos: Option<Vec<i32>>, slots: Option<Vec<i32>>) -> Profile {
        Profile {
            restricted: true,
            allowed_puestos: puestos,
            allowed_time_slots: slots,
            ..Profile::defaults_for(Uuid::new_v4())
        }
    }

    #[test]
    fn usuario_restrito_so_enxerga_a_allow_list() {
        let p = restricted_profile(Some(vec![1, 3]), Some(vec![10]));
        assert!(p.can_use_puesto(1));
        assert!(p.can_use_puesto(3));
        assert!(!p.can_use_puesto(2));
        assert!(p.can_use_slot(10));
        assert!(!p.can_use_slot(11));
    }

    #[test]
    fn lista_ausente_nao_restringe_aquele_eixo() {
        let p = restricted_profile(Some(vec![1]), None);
        assert!(!p.can_use_puesto(2));
        // sem lista de turnos, qualquer turno passa
        assert!(p.can_use_slot(99));
    }

    #[test]
    fn admin_ignora_restricoes() {
        let mut p = restricted_profile(Some(vec![1]), Some(vec![10]));
        p.is_admin = true;
        assert!(p.can_use_puesto(2));
        assert!(p.can_use_slot(11));
    }

    #[test]
    fn usuario_comum_sem_flag_restricted_nao_e_limitado() {
        let p = Profile::defaults_for(Uuid::new_v4());
        assert!(p.can_use_puesto(42));
        assert!(p.can_use_slot(42));
    }
}
