// src/services/inventory_service.rs

use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::InventoryRepository,
    models::inventory::VehicleStatus,
};

#[derive(Clone)]
pub struct InventoryService {
    repo: InventoryRepository,
}

impl InventoryService {
    pub fn new(repo: InventoryRepository) -> Self {
        Self { repo }
    }

    /// Aplica o status pós-confirmação aos veículos do pedido e tira
    /// todos do anúncio público.
    pub async fn settle_vehicles(
        &self,
        conn: &mut PgConnection,
        vehicle_ids: &[Uuid],
        status: VehicleStatus,
    ) -> Result<(), AppError> {
        for vehicle_id in vehicle_ids {
            let vehicle = self.repo.set_vehicle_status(&mut *conn, *vehicle_id, status).await?;
            tracing::info!("Veículo {} {} agora {:?}", vehicle.brand, vehicle.model, vehicle.status);
        }
        Ok(())
    }
}
