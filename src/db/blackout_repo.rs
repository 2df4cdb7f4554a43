// src/db/blackout_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};

use crate::{common::error::AppError, models::blackout::Blackout};

#[derive(Clone)]
pub struct BlackoutRepository {
    pool: PgPool,
}

impl BlackoutRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Bloqueios cujo intervalo toca [from, to]. Aceita executor para a
    /// checagem de fechamento dentro da transação de reserva.
    pub async fn overlapping<'e, E>(
        &self,
        executor: E,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Blackout>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let blackouts = sqlx::query_as::<_, Blackout>(
            r#"
            SELECT id, date_from, date_to, puesto_id, time_slot_id, reason, created_at
            FROM blackouts
            WHERE date_from <= $2 AND date_to >= $1
            ORDER BY date_from, created_at
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(blackouts)
    }

    pub async fn list_range(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Blackout>, AppError> {
        self.overlapping(&self.pool, from, to).await
    }

    pub async fn add(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        puesto_id: Option<i32>,
        time_slot_id: Option<i32>,
        reason: Option<&str>,
    ) -> Result<Blackout, AppError> {
        let blackout = sqlx::query_as::<_, Blackout>(
            r#"
            INSERT INTO blackouts (date_from, date_to, puesto_id, time_slot_id, reason)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, date_from, date_to, puesto_id, time_slot_id, reason, created_at
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(puesto_id)
        .bind(time_slot_id)
        .bind(reason)
        .fetch_one(&self.pool)
        .await?;
        Ok(blackout)
    }

    /// Remove pelos mesmos campos usados na criação — o predicado
    /// simétrico permite desfazer em lote um `add` em lote.
    pub async fn remove(
        &self,
        from: NaiveDate,
        to: NaiveDate,
        puesto_id: Option<i32>,
        time_slot_id: Option<i32>,
    ) -> Result<u64, AppError> {
        let res = sqlx::query(
            r#"
            DELETE FROM blackouts
            WHERE date_from = $1
              AND date_to = $2
              AND puesto_id IS NOT DISTINCT FROM $3
              AND time_slot_id IS NOT DISTINCT FROM $4
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(puesto_id)
        .bind(time_slot_id)
        .execute(&self.pool)
        .await?;
        Ok(res.rows_affected())
    }
}
