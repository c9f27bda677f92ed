// src/handlers/operations.rs

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use chrono::Utc;
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::operations::OrderKind,
};

// ---
// Payload: ConfirmOrderPayload
// ---
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmOrderPayload {
    // Condição escolhida na tela; vazio quando a forma não tem condições
    // cadastradas (aí o serviço assume "à vista")
    pub condition_id: Option<Uuid>,

    // Obrigatória só quando alguma parcela vai ser baixada na hora
    pub bank_account_id: Option<Uuid>,
}

// ---
// Handler: confirm_purchase
// ---
#[utoipa::path(
    post,
    path = "/api/operacoes/compras/{id}/confirmar",
    params(("id" = Uuid, Path, description = "ID do pedido de compra")),
    request_body = ConfirmOrderPayload,
    responses(
        (status = 201, description = "Pedido confirmado; títulos gerados", body = Vec<crate::models::finance::FinancialTitle>),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido já confirmado"),
    ),
    tag = "Operations"
)]
pub async fn confirm_purchase(
    State(app_state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<ConfirmOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    // O relógio entra aqui e desce puro pelo restante do fluxo
    let today = Utc::now().date_naive();

    let titles = app_state
        .operations_service
        .confirm_order(
            &app_state.db_pool,
            order_id,
            OrderKind::Purchase,
            payload.condition_id,
            payload.bank_account_id,
            today,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(titles)))
}

// ---
// Handler: confirm_sale
// ---
#[utoipa::path(
    post,
    path = "/api/operacoes/vendas/{id}/confirmar",
    params(("id" = Uuid, Path, description = "ID do pedido de venda")),
    request_body = ConfirmOrderPayload,
    responses(
        (status = 201, description = "Pedido confirmado; títulos gerados", body = Vec<crate::models::finance::FinancialTitle>),
        (status = 404, description = "Pedido não encontrado"),
        (status = 409, description = "Pedido já confirmado"),
    ),
    tag = "Operations"
)]
pub async fn confirm_sale(
    State(app_state): State<AppState>,
    Path(order_id): Path<Uuid>,
    Json(payload): Json<ConfirmOrderPayload>,
) -> Result<impl IntoResponse, AppError> {
    let today = Utc::now().date_naive();

    let titles = app_state
        .operations_service
        .confirm_order(
            &app_state.db_pool,
            order_id,
            OrderKind::Sale,
            payload.condition_id,
            payload.bank_account_id,
            today,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(titles)))
}
