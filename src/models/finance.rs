// src/models/finance.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use sqlx::FromRow;
use chrono::{DateTime, Utc, NaiveDate};
use rust_decimal::Decimal;
use utoipa::ToSchema;

// --- Enums (Mapeando o Postgres) ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "title_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleKind {
    Receivable, // A Receber
    Payable,    // A Pagar
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "title_status", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TitleStatus {
    Pending,   // Aberto
    Paid,      // Quitado
    Cancelled, // Cancelado
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "category_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryKind {
    Fixed,
    Variable,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "category_nature", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CategoryNature {
    Income,  // Receita
    Expense, // Despesa
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_direction", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementDirection {
    In,  // Entrada no caixa
    Out, // Saída do caixa
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[sqlx(type_name = "movement_kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MovementKind {
    Purchase,
    Sale,
}

// --- Structs ---

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,

    #[schema(example = "Conta Principal")]
    pub name: String,

    #[schema(example = "Banco do Brasil")]
    pub bank_name: Option<String>,

    #[schema(example = "1500.50")]
    pub current_balance: Decimal,

    #[schema(example = true)]
    pub is_active: Option<bool>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialCategory {
    #[schema(example = "550e8400-e29b-41d4-a716-446655440001")]
    pub id: Uuid,

    #[schema(example = "Venda de Veículos")]
    pub name: String,

    pub kind: CategoryKind,
    pub nature: CategoryNature,

    #[schema(example = true)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialTitle {
    pub id: Uuid,

    #[schema(example = "Compra de Veículo - Pedido #1024 (1/3)")]
    pub description: String,

    pub kind: TitleKind,
    pub status: TitleStatus,

    // Valores
    #[schema(example = "3333.33")]
    pub amount_original: Decimal,
    #[schema(example = "0.00")]
    pub amount_paid: Decimal,

    // Datas
    #[schema(value_type = String, format = Date, example = "2025-12-01")]
    pub issue_date: NaiveDate,
    #[schema(value_type = String, format = Date, example = "2025-12-31")]
    pub due_date: NaiveDate,

    // Parcela
    #[schema(example = 1)]
    pub installment_number: i32,
    #[schema(example = 3)]
    pub installment_count: i32,

    // Vínculos
    pub order_id: Option<Uuid>,
    pub partner_id: Option<Uuid>,
    pub payment_method_id: Option<Uuid>,
    // Fica NULL quando a condição "à vista" foi sintetizada em memória
    pub payment_condition_id: Option<Uuid>,
    pub category_id: Option<Uuid>,

    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FinancialMovement {
    pub id: Uuid,

    pub title_id: Option<Uuid>,
    pub account_id: Uuid,

    #[schema(example = "3333.33")]
    pub amount: Decimal,

    pub direction: MovementDirection,
    pub kind: MovementKind,

    pub payment_method_id: Option<Uuid>,

    #[schema(example = "Quitação Compra de Veículo - Pedido #1024 (1/3)")]
    pub description: Option<String>,

    #[schema(value_type = String, format = Date, example = "2025-12-20")]
    pub movement_date: NaiveDate,

    pub created_at: Option<DateTime<Utc>>,
}
