// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::{
    db::{BlackoutRepository, CatalogRepository, ProfileRepository, ReservationRepository},
    services::{AdminService, AvailabilityService, BookingService, CatalogService},
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub profile_repo: ProfileRepository,
    pub catalog_service: CatalogService,
    pub availability_service: AvailabilityService,
    pub booking_service: BookingService,
    pub admin_service: AdminService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");

        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let catalog_repo = CatalogRepository::new(db_pool.clone());
        let reservation_repo = ReservationRepository::new(db_pool.clone());
        let blackout_repo = BlackoutRepository::new(db_pool.clone());
        let profile_repo = ProfileRepository::new(db_pool.clone());

        let catalog_service = CatalogService::new(catalog_repo.clone());
        let availability_service = AvailabilityService::new(
            catalog_repo.clone(),
            reservation_repo.clone(),
            blackout_repo.clone(),
            db_pool.clone(),
        );
        let booking_service = BookingService::new(
            catalog_repo.clone(),
            reservation_repo.clone(),
            blackout_repo.clone(),
            db_pool.clone(),
        );
        let admin_service = AdminService::new(
            profile_repo.clone(),
            blackout_repo,
            catalog_repo,
            reservation_repo,
        );

        Ok(Self {
            db_pool,
            jwt_secret,
            profile_repo,
            catalog_service,
            availability_service,
            booking_service,
            admin_service,
        })
    }
}
