// src/models/operations.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use utoipa::ToSchema;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderKind {
    Purchase, // Compra de veículo (entrada no estoque)
    Sale,     // Venda de veículo
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "order_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Draft,
    Done,
    Cancelled,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: Uuid,

    pub kind: OrderKind,

    #[schema(example = 1024)]
    pub display_id: i32,

    pub partner_id: Uuid,

    // Escolhido na negociação; obrigatório só na confirmação
    pub payment_method_id: Option<Uuid>,

    #[schema(example = "45000.00")]
    pub total_amount: Decimal,

    pub status: OrderStatus,

    pub notes: Option<String>,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
