// src/models/inventory.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, Utc};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "vehicle_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VehicleStatus {
    Evaluation, // Em avaliação (ainda não comprado)
    Available,  // No pátio, disponível
    Reserved,
    Sold,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Vehicle {
    pub id: Uuid,

    #[schema(example = "ABC1D23")]
    pub plate: Option<String>,

    #[schema(example = "Fiat")]
    pub brand: String,

    #[schema(example = "Argo")]
    pub model: String,

    #[schema(example = 2022)]
    pub model_year: Option<i32>,

    #[schema(example = "Prata")]
    pub color: Option<String>,

    pub status: VehicleStatus,

    // Anúncio no site da loja; limpo quando o pedido é confirmado
    #[schema(example = false)]
    pub is_published: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
}
