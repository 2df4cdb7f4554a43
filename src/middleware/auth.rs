// src/middleware/auth.rs
//
// A identidade vem de fora: o provedor (login por magic link) emite o
// JWT; aqui só verificamos a assinatura e lemos o `sub`. O que o motor
// de reservas sabe sobre o usuário (admin, restrições, cotas) vem da
// tabela `profiles`.

use axum::{
    extract::{FromRequestParts, State},
    http::{HeaderMap, request::Parts},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::Deserialize;
use uuid::Uuid;

use crate::{common::error::AppError, config::AppState, models::profile::Profile};

#[derive(Debug, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub exp: usize,
}

async fn authenticate(app_state: &AppState, headers: &HeaderMap) -> Result<Profile, AppError> {
    let token = headers
        .get("Authorization")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(AppError::InvalidToken)?;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(app_state.jwt_secret.as_ref()),
        &Validation::default(),
    )
    .map_err(|_| AppError::InvalidToken)?;

    // Usuário sem linha em `profiles` opera com o perfil padrão
    app_state.profile_repo.get_or_default(token_data.claims.sub).await
}

// Middleware das rotas autenticadas
pub async fn auth_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let profile = authenticate(&app_state, request.headers()).await?;
    request.extensions_mut().insert(CurrentUser(profile));
    Ok(next.run(request).await)
}

// Middleware das rotas administrativas: autentica E exige is_admin
pub async fn admin_guard(
    State(app_state): State<AppState>,
    mut request: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, AppError> {
    let profile = authenticate(&app_state, request.headers()).await?;
    if !profile.is_admin {
        return Err(AppError::PermissionDenied);
    }
    request.extensions_mut().insert(CurrentUser(profile));
    Ok(next.run(request).await)
}

// Extrator para obter o perfil autenticado diretamente nos handlers
#[derive(Clone)]
pub struct CurrentUser(pub Profile);

impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .ok_or(AppError::InvalidToken)
    }
}
