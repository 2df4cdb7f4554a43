// src/db/reservation_repo.rs

use chrono::NaiveDate;
use sqlx::{Executor, PgPool, Postgres};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::booking::{BlackoutConflict, ExportRow, OccupancyEntry, Reservation, UserReservation},
};

#[derive(Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // ---
    // Escritas (sempre dentro da transação do BookingService)
    // ---

    /// Insere a reserva sob a constraint de unicidade (date, time_slot_id).
    /// Se uma inserção concorrente venceu a corrida, a violação da
    /// constraint vira `SlotAlreadyReserved` — quem perdeu deve consultar
    /// a disponibilidade de novo e escolher outro turno.
    pub async fn insert<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        date: NaiveDate,
        time_slot_id: i32,
    ) -> Result<Reservation, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query_as::<_, Reservation>(
            r#"
            INSERT INTO reservations (user_id, date, time_slot_id)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, date, time_slot_id, created_at
            "#,
        )
        .bind(user_id)
        .bind(date)
        .bind(time_slot_id)
        .fetch_one(executor)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.is_unique_violation() {
                    return AppError::SlotAlreadyReserved;
                }
            }
            e.into()
        })
    }

    pub async fn find_by_date_slot<'e, E>(
        &self,
        executor: E,
        date: NaiveDate,
        time_slot_id: i32,
    ) -> Result<Option<Reservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reservation = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT id, user_id, date, time_slot_id, created_at
            FROM reservations
            WHERE date = $1 AND time_slot_id = $2
            "#,
        )
        .bind(date)
        .bind(time_slot_id)
        .fetch_optional(executor)
        .await?;
        Ok(reservation)
    }

    pub async fn delete<'e, E>(&self, executor: E, id: Uuid) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let res = sqlx::query("DELETE FROM reservations WHERE id = $1")
            .bind(id)
            .execute(executor)
            .await?;
        Ok(res.rows_affected())
    }

    /// Apaga todas as reservas do intervalo, opcionalmente limitadas a um
    /// puesto. Um único comando: ou apaga tudo, ou nada.
    pub async fn delete_range<'e, E>(
        &self,
        executor: E,
        from: NaiveDate,
        to: NaiveDate,
        puesto_id: Option<i32>,
    ) -> Result<u64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let res = sqlx::query(
            r#"
            DELETE FROM reservations AS r
            USING time_slots AS ts
            WHERE ts.id = r.time_slot_id
              AND r.date BETWEEN $1 AND $2
              AND ($3::INT IS NULL OR ts.puesto_id = $3)
            "#,
        )
        .bind(from)
        .bind(to)
        .bind(puesto_id)
        .execute(executor)
        .await?;
        Ok(res.rows_affected())
    }

    // ---
    // Leituras
    // ---

    /// Ocupação anônima do intervalo: quais pares (data, turno) estão
    /// tomados, sem expor o dono.
    pub async fn occupancy(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<OccupancyEntry>, AppError> {
        let entries = sqlx::query_as::<_, OccupancyEntry>(
            r#"
            SELECT date, time_slot_id
            FROM reservations
            WHERE date BETWEEN $1 AND $2
            ORDER BY date, time_slot_id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(entries)
    }

    /// Reservas completas de um puesto no intervalo (para o resolver
    /// distinguir "minha" de "de outro").
    pub async fn list_for_puesto(
        &self,
        puesto_id: i32,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<Reservation>, AppError> {
        let reservations = sqlx::query_as::<_, Reservation>(
            r#"
            SELECT r.id, r.user_id, r.date, r.time_slot_id, r.created_at
            FROM reservations AS r
            INNER JOIN time_slots AS ts ON ts.id = r.time_slot_id
            WHERE ts.puesto_id = $1 AND r.date BETWEEN $2 AND $3
            ORDER BY r.date
            "#,
        )
        .bind(puesto_id)
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(reservations)
    }

    /// Reservas de um usuário com a duração de cada turno. Aceita executor
    /// porque a avaliação de cota precisa rodar na mesma transação do
    /// INSERT da reserva.
    pub async fn user_reservations<'e, E>(
        &self,
        executor: E,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<UserReservation>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let reservations = sqlx::query_as::<_, UserReservation>(
            r#"
            SELECT r.date, r.time_slot_id, ts.duration_hours
            FROM reservations AS r
            INNER JOIN time_slots AS ts ON ts.id = r.time_slot_id
            WHERE r.user_id = $1 AND r.date BETWEEN $2 AND $3
            ORDER BY r.date
            "#,
        )
        .bind(user_id)
        .bind(from)
        .bind(to)
        .fetch_all(executor)
        .await?;
        Ok(reservations)
    }

    /// Linhas prontas para o formatador externo de relatórios.
    pub async fn export_rows(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExportRow>, AppError> {
        let rows = sqlx::query_as::<_, ExportRow>(
            r#"
            SELECT r.date,
                   p.name AS puesto,
                   ts.label AS slot,
                   ts.start_time,
                   ts.end_time,
                   ts.duration_hours,
                   pr.full_name,
                   pr.hierarchy
            FROM reservations AS r
            INNER JOIN time_slots AS ts ON ts.id = r.time_slot_id
            INNER JOIN puestos AS p ON p.id = ts.puesto_id
            LEFT JOIN profiles AS pr ON pr.id = r.user_id
            WHERE r.date BETWEEN $1 AND $2
            ORDER BY r.date, p.name, ts.start_time
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Reservas que ficaram dentro de um bloqueio criado depois delas.
    /// Bloqueios não apagam reservas; o admin resolve manualmente.
    pub async fn blackout_conflicts(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BlackoutConflict>, AppError> {
        let conflicts = sqlx::query_as::<_, BlackoutConflict>(
            r#"
            SELECT r.id AS reservation_id,
                   r.user_id,
                   r.date,
                   r.time_slot_id,
                   b.id AS blackout_id,
                   b.reason
            FROM reservations AS r
            INNER JOIN time_slots AS ts ON ts.id = r.time_slot_id
            INNER JOIN blackouts AS b
                ON r.date BETWEEN b.date_from AND b.date_to
               AND (b.puesto_id IS NULL OR b.puesto_id = ts.puesto_id)
               AND (b.time_slot_id IS NULL OR b.time_slot_id = r.time_slot_id)
            WHERE r.date BETWEEN $1 AND $2
            ORDER BY r.date, r.time_slot_id
            "#,
        )
        .bind(from)
        .bind(to)
        .fetch_all(&self.pool)
        .await?;
        Ok(conflicts)
    }
}
