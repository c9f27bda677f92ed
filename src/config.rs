// src/config.rs

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::{env, time::Duration};

use crate::{
    db::{FinanceRepository, InventoryRepository, OperationsRepository, PaymentsRepository},
    services::{
        finance_service::FinanceService,
        inventory_service::InventoryService,
        operations_service::OperationsService,
        payments_service::PaymentsService,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub payments_service: PaymentsService,
    pub operations_service: OperationsService,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let finance_repo = FinanceRepository::new(db_pool.clone());
        let payments_repo = PaymentsRepository::new(db_pool.clone());
        let operations_repo = OperationsRepository::new(db_pool.clone());
        let inventory_repo = InventoryRepository::new(db_pool.clone());

        let finance_service = FinanceService::new(finance_repo);
        let payments_service = PaymentsService::new(payments_repo);
        let inventory_service = InventoryService::new(inventory_repo);
        let operations_service = OperationsService::new(
            operations_repo,
            inventory_service,
            payments_service.clone(),
            finance_service,
        );

        Ok(Self {
            db_pool,
            payments_service,
            operations_service,
        })
    }
}
