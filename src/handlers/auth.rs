// src/handlers/auth.rs

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::auth::{
        AlterarSenhaPayload, AlterarSenhaResponse, LoginPayload, LoginResponse, RegisterPayload,
        RegisterResponse,
    },
};

// Handler de registro
pub async fn register(
    State(app_state): State<AppState>,
    Json(payload): Json<RegisterPayload>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let response = app_state
        .auth_service
        .registrar(
            &payload.nome,
            &payload.email,
            &payload.senha,
            &payload.cpf,
            &payload.tipo_usuario,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

// Handler de login
pub async fn login(
    State(app_state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<Json<LoginResponse>, AppError> {
    let response = app_state
        .auth_service
        .login(&payload.cpf, &payload.senha)
        .await?;

    Ok(Json(response))
}

// Handler de alteração de senha (primeiro acesso -> senha definitiva)
pub async fn alterar_senha(
    State(app_state): State<AppState>,
    Json(payload): Json<AlterarSenhaPayload>,
) -> Result<Json<AlterarSenhaResponse>, AppError> {
    let response = app_state
        .auth_service
        .alterar_senha(payload.cpf.as_deref(), payload.nova_senha.as_deref())
        .await?;

    Ok(Json(response))
}
