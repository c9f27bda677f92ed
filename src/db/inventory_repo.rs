// src/db/inventory_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use crate::{
    common::error::AppError,
    models::inventory::{Vehicle, VehicleStatus},
};

#[derive(Clone)]
pub struct InventoryRepository {
    _pool: PgPool,
}

impl InventoryRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { _pool: pool }
    }

    /// Muda o status e despublica do site num único UPDATE
    pub async fn set_vehicle_status<'e, E>(
        &self,
        executor: E,
        vehicle_id: Uuid,
        status: VehicleStatus,
    ) -> Result<Vehicle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let vehicle = sqlx::query_as::<_, Vehicle>(
            r#"
            UPDATE vehicles
            SET status = $2, is_published = false
            WHERE id = $1
            RETURNING id, plate, brand, model, model_year, color,
                      status, is_published, created_at
            "#,
        )
        .bind(vehicle_id)
        .bind(status)
        .fetch_one(executor)
        .await?;

        Ok(vehicle)
    }
}
