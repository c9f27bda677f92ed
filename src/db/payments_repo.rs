// src/db/payments_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::payments::{PaymentCondition, PaymentMethod},
};

#[derive(Clone)]
pub struct PaymentsRepository {
    _pool: PgPool,
}

impl PaymentsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { _pool: pool }
    }

    // =========================================================================
    //  FORMAS DE PAGAMENTO
    // =========================================================================

    pub async fn get_method<'e, E>(
        &self,
        executor: E,
        method_id: Uuid,
    ) -> Result<Option<PaymentMethod>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let method = sqlx::query_as::<_, PaymentMethod>(
            r#"
            SELECT id, name, flow, destination, allows_installments,
                   max_installments, is_active, created_at
            FROM payment_methods
            WHERE id = $1
            "#,
        )
        .bind(method_id)
        .fetch_optional(executor)
        .await?;

        Ok(method)
    }

    // =========================================================================
    //  CONDIÇÕES DE PAGAMENTO
    // =========================================================================

    pub async fn get_condition<'e, E>(
        &self,
        executor: E,
        condition_id: Uuid,
    ) -> Result<Option<PaymentCondition>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let condition = sqlx::query_as::<_, PaymentCondition>(
            r#"
            SELECT id, payment_method_id, name, installment_count,
                   first_offset_days, interval_days, is_active, created_at
            FROM payment_conditions
            WHERE id = $1
            "#,
        )
        .bind(condition_id)
        .fetch_optional(executor)
        .await?;

        Ok(condition)
    }

    /// Ordenadas por quantidade de parcelas e nome, como a tela de seleção exibe
    pub async fn list_conditions_by_method<'e, E>(
        &self,
        executor: E,
        method_id: Uuid,
    ) -> Result<Vec<PaymentCondition>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let conditions = sqlx::query_as::<_, PaymentCondition>(
            r#"
            SELECT id, payment_method_id, name, installment_count,
                   first_offset_days, interval_days, is_active, created_at
            FROM payment_conditions
            WHERE payment_method_id = $1
            ORDER BY installment_count ASC, name ASC
            "#,
        )
        .bind(method_id)
        .fetch_all(executor)
        .await?;

        Ok(conditions)
    }

    pub async fn create_condition<'e, E>(
        &self,
        executor: E,
        method_id: Uuid,
        name: &str,
        installment_count: i32,
        first_offset_days: i32,
        interval_days: i32,
    ) -> Result<PaymentCondition, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let condition = sqlx::query_as::<_, PaymentCondition>(
            r#"
            INSERT INTO payment_conditions (
                payment_method_id, name, installment_count,
                first_offset_days, interval_days
            )
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, payment_method_id, name, installment_count,
                      first_offset_days, interval_days, is_active, created_at
            "#,
        )
        .bind(method_id)
        .bind(name)
        .bind(installment_count)
        .bind(first_offset_days)
        .bind(interval_days)
        .fetch_one(executor)
        .await?;

        Ok(condition)
    }
}
