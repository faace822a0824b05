// src/handlers/ubs.rs

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::ubs::{
        AtualizarStatusPayload, Disponibilidade, HistoricoEntrada, UbsComStatus, VacinasDaUbs,
    },
};

pub async fn listar_ubs(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<UbsComStatus>>, AppError> {
    Ok(Json(app_state.ubs_service.listar_ubs().await?))
}

pub async fn buscar_ubs(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<UbsComStatus>, AppError> {
    Ok(Json(app_state.ubs_service.buscar_ubs(id).await?))
}

pub async fn listar_vacinas(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<VacinasDaUbs>, AppError> {
    Ok(Json(app_state.ubs_service.listar_vacinas(id).await?))
}

// PUT /api/ubs/{id}/vacinas/{vacina_id} — o fluxo central de atualização
pub async fn atualizar_status(
    State(app_state): State<AppState>,
    Path((id, vacina_id)): Path<(i32, i32)>,
    Json(payload): Json<AtualizarStatusPayload>,
) -> Result<Json<Disponibilidade>, AppError> {
    payload.validate().map_err(AppError::ValidationError)?;

    let linha = app_state
        .ubs_service
        .atualizar_status(id, vacina_id, &payload.status, &payload.cpf_funcionario)
        .await?;

    Ok(Json(linha))
}

pub async fn historico(
    State(app_state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<HistoricoEntrada>>, AppError> {
    Ok(Json(app_state.ubs_service.historico(id).await?))
}
