// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Catálogo ---
        handlers::catalog::list_puestos,
        handlers::catalog::list_slots,

        // --- Reservas ---
        handlers::availability::get_availability,
        handlers::booking::reserve,
        handlers::booking::cancel,
        handlers::booking::my_reservations,
        handlers::booking::occupancy,

        // --- Administração ---
        handlers::admin::list_blackouts,
        handlers::admin::add_blackout,
        handlers::admin::remove_blackout,
        handlers::admin::blackout_conflicts,
        handlers::admin::delete_reservations,
        handlers::admin::export_reservations,
        handlers::admin::list_users,
        handlers::admin::set_user_quota,
        handlers::admin::set_slot_enabled,
        handlers::admin::set_all_slots_enabled,
    ),
    components(
        schemas(
            // --- Catálogo ---
            models::catalog::Puesto,
            models::catalog::TimeSlot,

            // --- Reservas ---
            models::booking::Reservation,
            models::booking::OccupancyEntry,
            models::booking::UserReservation,
            models::booking::ExportRow,
            models::booking::BlackoutConflict,
            models::booking::SlotState,
            models::booking::SlotAvailability,
            models::booking::DayAvailability,
            models::booking::AvailabilityReport,

            // --- Bloqueios / perfis ---
            models::blackout::Blackout,
            models::profile::Profile,

            // --- Payloads ---
            handlers::booking::ReservationActionPayload,
            handlers::admin::CreateBlackoutPayload,
            handlers::admin::RemoveBlackoutPayload,
            handlers::admin::BulkDeletePayload,
            handlers::admin::UserQuotaPayload,
            handlers::admin::SetEnabledPayload,
        )
    ),
    tags(
        (name = "Catálogo", description = "Puestos e turnos reserváveis"),
        (name = "Reservas", description = "Disponibilidade, reservas e ocupação"),
        (name = "Administração", description = "Bloqueios, cotas e gestão de usuários")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
