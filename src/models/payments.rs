// src/models/payments.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

// --- Enums ---

/// Sentido do método: se ele aparece em telas de recebimento, pagamento ou ambas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "method_flow", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MethodFlow {
    Receive,
    Pay,
    Both,
}

/// O que o método faz com o ledger quando um pedido é confirmado
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "posting_destination", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PostingDestination {
    ImmediateCash, // Dinheiro/PIX: parcela com vencimento hoje já entra no caixa
    Receivable,
    Payable,
    Consignment,   // Consignação: lança comissão, nunca o valor cheio
    Asset,         // Troca por bem (ex: veículo na troca)
    None,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentMethod {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440002")]
    pub id: Uuid,

    #[schema(example = "PIX")]
    pub name: String,

    pub flow: MethodFlow,
    pub destination: PostingDestination,

    #[schema(example = false)]
    pub allows_installments: bool,

    #[schema(example = 12)]
    pub max_installments: i32,

    #[schema(example = true)]
    pub is_active: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCondition {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440003")]
    pub id: Uuid,

    pub payment_method_id: Uuid,

    #[schema(example = "Entrada + 30/60")]
    pub name: String,

    #[schema(example = 3)]
    pub installment_count: i32,

    #[schema(example = 0)]
    pub first_offset_days: i32,

    #[schema(example = 30)]
    pub interval_days: i32,

    #[schema(example = true)]
    pub is_active: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
}
