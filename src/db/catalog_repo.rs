// src/db/catalog_repo.rs

use sqlx::{Executor, PgPool, Postgres};

use crate::{
    common::error::AppError,
    models::catalog::{Puesto, TimeSlot},
};

#[derive(Clone)]
pub struct CatalogRepository {
    pool: PgPool,
}

impl CatalogRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Leituras do catálogo
    // ---

    /// Lista os puestos. Quem não é admin só enxerga os habilitados.
    pub async fn list_puestos(&self, include_disabled: bool) -> Result<Vec<Puesto>, AppError> {
        let puestos = sqlx::query_as::<_, Puesto>(
            r#"
            SELECT id, name, enabled
            FROM puestos
            WHERE enabled OR $1
            ORDER BY name ASC
            "#,
        )
        .bind(include_disabled)
        .fetch_all(&self.pool)
        .await?;
        Ok(puestos)
    }

    pub async fn list_slots(
        &self,
        puesto_id: i32,
        include_disabled: bool,
    ) -> Result<Vec<TimeSlot>, AppError> {
        let slots = sqlx::query_as::<_, TimeSlot>(
            r#"
            SELECT id, puesto_id, label, start_time, end_time, duration_hours, enabled
            FROM time_slots
            WHERE puesto_id = $1 AND (enabled OR $2)
            ORDER BY start_time ASC
            "#,
        )
        .bind(puesto_id)
        .bind(include_disabled)
        .fetch_all(&self.pool)
        .await?;
        Ok(slots)
    }

    pub async fn find_puesto_by_id(&self, puesto_id: i32) -> Result<Option<Puesto>, AppError> {
        self.find_puesto(&self.pool, puesto_id).await
    }

    pub async fn find_slot_by_id(&self, time_slot_id: i32) -> Result<Option<TimeSlot>, AppError> {
        self.find_slot(&self.pool, time_slot_id).await
    }

    // As buscas pontuais aceitam um executor genérico para poderem rodar
    // dentro da transação de reserva.

    pub async fn find_puesto<'e, E>(
        &self,
        executor: E,
        puesto_id: i32,
    ) -> Result<Option<Puesto>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let puesto = sqlx::query_as::<_, Puesto>(
            "SELECT id, name, enabled FROM puestos WHERE id = $1",
        )
        .bind(puesto_id)
        .fetch_optional(executor)
        .await?;
        Ok(puesto)
    }

    pub async fn find_slot<'e, E>(
        &self,
        executor: E,
        time_slot_id: i32,
    ) -> Result<Option<TimeSlot>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let slot = sqlx::query_as::<_, TimeSlot>(
            r#"
            SELECT id, puesto_id, label, start_time, end_time, duration_hours, enabled
            FROM time_slots
            WHERE id = $1
            "#,
        )
        .bind(time_slot_id)
        .fetch_optional(executor)
        .await?;
        Ok(slot)
    }

    // ---
    // Habilitar / desabilitar turnos
    // ---
    // Desabilitar não cancela reservas existentes: só impede novas e
    // esconde o turno das visões de quem não é admin.

    pub async fn set_slot_enabled(&self, time_slot_id: i32, enabled: bool) -> Result<u64, AppError> {
        let res = sqlx::query("UPDATE time_slots SET enabled = $2 WHERE id = $1")
            .bind(time_slot_id)
            .bind(enabled)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }

    pub async fn set_all_slots_enabled(
        &self,
        puesto_id: i32,
        enabled: bool,
    ) -> Result<u64, AppError> {
        let res = sqlx::query("UPDATE time_slots SET enabled = $2 WHERE puesto_id = $1")
            .bind(puesto_id)
            .bind(enabled)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected())
    }
}
