// src/db/operations_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::operations::{Order, OrderStatus},
};

#[derive(Clone)]
pub struct OperationsRepository {
    _pool: PgPool,
}

impl OperationsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { _pool: pool }
    }

    /// Carrega o pedido travando a linha (FOR UPDATE): duas confirmações
    /// simultâneas do mesmo pedido serializam aqui.
    pub async fn get_order_for_update<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Option<Order>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, kind, display_id, partner_id, payment_method_id,
                   total_amount, status, notes, created_at, updated_at
            FROM orders
            WHERE id = $1
            FOR UPDATE
            "#,
        )
        .bind(order_id)
        .fetch_optional(executor)
        .await?;

        Ok(order)
    }

    pub async fn set_order_status<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
        status: OrderStatus,
    ) -> Result<(), AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        sqlx::query(
            "UPDATE orders SET status = $2, updated_at = now() WHERE id = $1",
        )
        .bind(order_id)
        .bind(status)
        .execute(executor)
        .await?;

        Ok(())
    }

    pub async fn list_order_vehicle_ids<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<Vec<Uuid>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let ids = sqlx::query_scalar::<_, Uuid>(
            "SELECT vehicle_id FROM order_vehicles WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_all(executor)
        .await?;

        Ok(ids)
    }
}
