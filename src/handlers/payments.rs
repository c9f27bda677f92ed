// src/handlers/payments.rs

use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{common::error::AppError, config::AppState};

// ---
// Payload: CreateConditionPayload
// ---
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateConditionPayload {
    #[validate(length(min = 1, message = "O nome é obrigatório."))]
    #[schema(example = "Entrada + 30/60")]
    pub name: String,

    #[validate(range(min = 1, max = 360, message = "A quantidade de parcelas deve ficar entre 1 e 360."))]
    #[schema(example = 3)]
    pub installment_count: i32,

    #[validate(range(min = 0, message = "O prazo da primeira parcela não pode ser negativo."))]
    #[serde(default)]
    #[schema(example = 0)]
    pub first_offset_days: i32,

    #[validate(range(min = 0, message = "O intervalo entre parcelas não pode ser negativo."))]
    #[serde(default)]
    #[schema(example = 30)]
    pub interval_days: i32,
}

// ---
// Handler: create_condition
// ---
#[utoipa::path(
    post,
    path = "/api/pagamentos/metodos/{id}/condicoes",
    params(("id" = Uuid, Path, description = "ID da forma de pagamento")),
    request_body = CreateConditionPayload,
    responses(
        (status = 201, description = "Condição cadastrada", body = crate::models::payments::PaymentCondition),
        (status = 404, description = "Forma de pagamento não encontrada"),
    ),
    tag = "Payments"
)]
pub async fn create_condition(
    State(app_state): State<AppState>,
    Path(method_id): Path<Uuid>,
    Json(payload): Json<CreateConditionPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let condition = app_state
        .payments_service
        .create_condition(
            &app_state.db_pool,
            method_id,
            &payload.name,
            payload.installment_count,
            payload.first_offset_days,
            payload.interval_days,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(condition)))
}

// ---
// Handler: list_conditions
// ---
#[utoipa::path(
    get,
    path = "/api/pagamentos/metodos/{id}/condicoes",
    params(("id" = Uuid, Path, description = "ID da forma de pagamento")),
    responses(
        (status = 200, description = "Condições ordenadas por parcelas e nome", body = Vec<crate::models::payments::PaymentCondition>),
    ),
    tag = "Payments"
)]
pub async fn list_conditions(
    State(app_state): State<AppState>,
    Path(method_id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let conditions = app_state
        .payments_service
        .list_conditions(&app_state.db_pool, method_id)
        .await?;

    Ok((StatusCode::OK, Json(conditions)))
}
