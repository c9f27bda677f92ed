// src/docs.rs

use utoipa::OpenApi;
use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Payments ---
        handlers::payments::list_conditions,
        handlers::payments::create_condition,

        // --- Operations ---
        handlers::operations::confirm_purchase,
        handlers::operations::confirm_sale,
    ),
    components(
        schemas(
            // --- Payments ---
            models::payments::MethodFlow,
            models::payments::PostingDestination,
            models::payments::PaymentMethod,
            models::payments::PaymentCondition,
            handlers::payments::CreateConditionPayload,

            // --- Operations ---
            models::operations::OrderKind,
            models::operations::OrderStatus,
            models::operations::Order,
            handlers::operations::ConfirmOrderPayload,

            // --- Inventory ---
            models::inventory::VehicleStatus,
            models::inventory::Vehicle,

            // --- Finance ---
            models::finance::TitleKind,
            models::finance::TitleStatus,
            models::finance::CategoryKind,
            models::finance::CategoryNature,
            models::finance::MovementDirection,
            models::finance::MovementKind,
            models::finance::BankAccount,
            models::finance::FinancialCategory,
            models::finance::FinancialTitle,
            models::finance::FinancialMovement,
        )
    ),
    tags(
        (name = "Payments", description = "Formas e Condições de Pagamento"),
        (name = "Operations", description = "Confirmação de Pedidos de Compra e Venda")
    )
)]
pub struct ApiDoc;
