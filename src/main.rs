//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{delete, get, patch, post, put},
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::docs::ApiDoc;
use crate::middleware::auth::{admin_guard, auth_guard};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas autenticadas (qualquer usuário com token válido)
    let api_routes = Router::new()
        .route("/catalog/puestos", get(handlers::catalog::list_puestos))
        .route(
            "/catalog/puestos/{id}/slots",
            get(handlers::catalog::list_slots),
        )
        .route("/availability", get(handlers::availability::get_availability))
        .route("/occupancy", get(handlers::booking::occupancy))
        .route(
            "/reservations",
            post(handlers::booking::reserve)
                .delete(handlers::booking::cancel)
                .get(handlers::booking::my_reservations),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Rotas administrativas (token válido + is_admin)
    let admin_routes = Router::new()
        .route(
            "/blackouts",
            get(handlers::admin::list_blackouts)
                .post(handlers::admin::add_blackout)
                .delete(handlers::admin::remove_blackout),
        )
        .route(
            "/blackouts/conflicts",
            get(handlers::admin::blackout_conflicts),
        )
        .route(
            "/reservations",
            delete(handlers::admin::delete_reservations),
        )
        .route(
            "/reservations/export",
            get(handlers::admin::export_reservations),
        )
        .route("/users", get(handlers::admin::list_users))
        .route("/users/{id}", put(handlers::admin::set_user_quota))
        .route("/slots/{id}", patch(handlers::admin::set_slot_enabled))
        .route(
            "/puestos/{id}/slots",
            patch(handlers::admin::set_all_slots_enabled),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            admin_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest("/api", api_routes)
        .nest("/api/admin", admin_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
