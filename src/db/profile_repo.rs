// src/db/profile_repo.rs

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::profile::Profile};

#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn find(&self, id: Uuid) -> Result<Option<Profile>, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, hierarchy, is_admin, restricted,
                   allowed_puestos, allowed_time_slots,
                   daily_max_slots, daily_max_hours, monthly_max_hours
            FROM profiles
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Usuário sem linha em `profiles` opera com os limites padrão.
    pub async fn get_or_default(&self, id: Uuid) -> Result<Profile, AppError> {
        Ok(self.find(id).await?.unwrap_or_else(|| Profile::defaults_for(id)))
    }

    /// Substituição completa (setUserQuota): o admin define de uma vez
    /// permissões, restrições e limites.
    #[allow(clippy::too_many_arguments)]
    pub async fn upsert(
        &self,
        id: Uuid,
        is_admin: bool,
        restricted: bool,
        allowed_puestos: Option<Vec<i32>>,
        allowed_time_slots: Option<Vec<i32>>,
        daily_max_slots: i32,
        daily_max_hours: Decimal,
        monthly_max_hours: Decimal,
    ) -> Result<Profile, AppError> {
        let profile = sqlx::query_as::<_, Profile>(
            r#"
            INSERT INTO profiles
                (id, is_admin, restricted, allowed_puestos, allowed_time_slots,
                 daily_max_slots, daily_max_hours, monthly_max_hours)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                is_admin = $2,
                restricted = $3,
                allowed_puestos = $4,
                allowed_time_slots = $5,
                daily_max_slots = $6,
                daily_max_hours = $7,
                monthly_max_hours = $8
            RETURNING id, full_name, hierarchy, is_admin, restricted,
                      allowed_puestos, allowed_time_slots,
                      daily_max_slots, daily_max_hours, monthly_max_hours
            "#,
        )
        .bind(id)
        .bind(is_admin)
        .bind(restricted)
        .bind(allowed_puestos)
        .bind(allowed_time_slots)
        .bind(daily_max_slots)
        .bind(daily_max_hours)
        .bind(monthly_max_hours)
        .fetch_one(&self.pool)
        .await?;
        Ok(profile)
    }

    /// Filtro simples por substring em nome, hierarquia ou id.
    pub async fn list(&self, filter: Option<&str>) -> Result<Vec<Profile>, AppError> {
        let pattern = filter.map(|q| format!("%{}%", q));
        let profiles = sqlx::query_as::<_, Profile>(
            r#"
            SELECT id, full_name, hierarchy, is_admin, restricted,
                   allowed_puestos, allowed_time_slots,
                   daily_max_slots, daily_max_hours, monthly_max_hours
            FROM profiles
            WHERE $1::TEXT IS NULL
               OR full_name ILIKE $1
               OR hierarchy ILIKE $1
               OR id::TEXT ILIKE $1
            ORDER BY full_name ASC NULLS LAST
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(profiles)
    }
}
