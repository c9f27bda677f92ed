use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

// Nosso tipo de erro, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    #[error("Pedido não encontrado")]
    OrderNotFound,

    #[error("O pedido não é do tipo esperado por esta rota")]
    OrderKindMismatch,

    #[error("Pedido já confirmado")]
    OrderAlreadyConfirmed,

    #[error("Pedido sem forma de pagamento definida")]
    PaymentMethodRequired,

    #[error("Forma de pagamento não encontrada")]
    PaymentMethodNotFound,

    #[error("Condição de pagamento não encontrada")]
    PaymentConditionNotFound,

    #[error("Escolha uma condição de pagamento")]
    PaymentConditionRequired,

    #[error("Informe a conta bancária para a baixa imediata")]
    BankAccountRequired,

    #[error("Conta bancária não encontrada")]
    BankAccountNotFound,

    #[error("Quantidade de parcelas inválida")]
    InvalidInstallmentCount,

    // Variante para erros de banco de dados (sqlx)
    #[error("Erro de banco de dados")]
    DatabaseError(#[from] sqlx::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor")]
    InternalServerError(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            // Retorna todos os detalhes da validação.
            AppError::ValidationError(errors) => {
                let mut details = std::collections::HashMap::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<String> = field_errors.iter()
                        .filter_map(|e| e.message.as_ref().map(|m| m.to_string()))
                        .collect();
                    details.insert(field.to_string(), messages);
                }
                let body = Json(json!({
                    "error": "Um ou mais campos são inválidos.",
                    "details": details,
                }));
                return (StatusCode::BAD_REQUEST, body).into_response();
            }

            AppError::OrderNotFound => (StatusCode::NOT_FOUND, "Pedido não encontrado."),
            AppError::PaymentMethodNotFound => (StatusCode::NOT_FOUND, "Forma de pagamento não encontrada."),
            AppError::PaymentConditionNotFound => (StatusCode::NOT_FOUND, "Condição de pagamento não encontrada."),
            AppError::BankAccountNotFound => (StatusCode::NOT_FOUND, "Conta bancária não encontrada."),

            AppError::OrderAlreadyConfirmed => (StatusCode::CONFLICT, "Este pedido já foi confirmado."),

            AppError::OrderKindMismatch => (StatusCode::UNPROCESSABLE_ENTITY, "O pedido não é do tipo esperado por esta rota."),
            AppError::PaymentMethodRequired => (StatusCode::UNPROCESSABLE_ENTITY, "Defina a forma de pagamento antes de confirmar o pedido."),
            AppError::PaymentConditionRequired => (StatusCode::UNPROCESSABLE_ENTITY, "Escolha uma condição de pagamento."),
            AppError::BankAccountRequired => (StatusCode::UNPROCESSABLE_ENTITY, "Informe a conta bancária para a baixa imediata."),
            AppError::InvalidInstallmentCount => (StatusCode::UNPROCESSABLE_ENTITY, "A quantidade de parcelas deve ser de pelo menos 1."),

            // Todos os outros erros (DatabaseError, InternalServerError) viram 500.
            // O `tracing` loga a mensagem detalhada que o `thiserror` nos deu.
            ref e => {
                tracing::error!("Erro Interno do Servidor: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro inesperado.")
            }
        };

        // Resposta padrão para erros simples que só têm uma mensagem.
        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
