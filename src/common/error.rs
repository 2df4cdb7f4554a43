use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

// Taxonomia de erros do motor de reservas, com `thiserror`.
// Todo erro volta tipado ao chamador; nada é engolido em silêncio.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Validação de negócio (terminais para a requisição) ---
    #[error("Turno fechado ou indisponível nesta data")]
    SlotClosed,

    #[error("Limite diário: máximo de turnos atingido")]
    DailySlotLimit,

    #[error("Limite diário: máximo de horas atingido")]
    DailyHourLimit,

    #[error("Limite mensal: máximo de horas atingido")]
    MonthlyHourLimit,

    // --- Conflito (a constraint de unicidade decidiu a corrida) ---
    #[error("Turno já reservado nesta data — escolha outro")]
    SlotAlreadyReserved,

    // --- Permissão ---
    #[error("Permissão negada")]
    PermissionDenied,

    #[error("Token de autenticação inválido ou ausente")]
    InvalidToken,

    // --- Não encontrado ---
    #[error("Reserva não encontrada")]
    ReservationNotFound,

    #[error("Bloqueio não encontrado")]
    BlackoutNotFound,

    #[error("Puesto não encontrado")]
    PuestoNotFound,

    #[error("Turno não encontrado")]
    SlotNotFound,

    // --- Infraestrutura ---
    // Único erro da taxonomia que o chamador pode repetir com backoff.
    #[error("Banco de dados indisponível")]
    StoreUnavailable(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado.
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação, campo a campo.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors
                        .iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::SlotClosed
            | AppError::DailySlotLimit
            | AppError::DailyHourLimit
            | AppError::MonthlyHourLimit => (StatusCode::UNPROCESSABLE_ENTITY, self.to_string()),

            AppError::SlotAlreadyReserved => (StatusCode::CONFLICT, self.to_string()),

            AppError::PermissionDenied => (StatusCode::FORBIDDEN, self.to_string()),
            AppError::InvalidToken => (StatusCode::UNAUTHORIZED, self.to_string()),

            AppError::ReservationNotFound
            | AppError::BlackoutNotFound
            | AppError::PuestoNotFound
            | AppError::SlotNotFound => (StatusCode::NOT_FOUND, self.to_string()),

            // Falha transitória de infraestrutura: o cliente pode repetir.
            AppError::StoreUnavailable(ref e) => {
                tracing::error!("Banco de dados indisponível: {}", e);
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "Serviço temporariamente indisponível. Tente novamente.".to_string(),
                )
            }

            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Ocorreu um erro inesperado.".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
