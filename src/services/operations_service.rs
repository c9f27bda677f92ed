// src/services/operations_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::OperationsRepository,
    models::finance::{CategoryKind, CategoryNature, FinancialTitle, MovementKind, TitleKind},
    models::inventory::VehicleStatus,
    models::operations::{OrderKind, OrderStatus},
    models::payments::PostingDestination,
    services::finance_service::{settles_today, FinanceService},
    services::inventory_service::InventoryService,
    services::payments_service::PaymentsService,
    services::schedule::generate_schedule,
};

const ACQUISITION_CATEGORY: &str = "Aquisição de Veículos";
const SALE_CATEGORY: &str = "Venda de Veículos";

// TODO: calcular a comissão real da consignação quando a tabela de comissões
// existir; por enquanto o título sai zerado.
const CONSIGNMENT_COMMISSION: Decimal = Decimal::ZERO;

/// Resultado da classificação do pedido: o que vai ser lançado no financeiro
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Posting {
    pub kind: TitleKind,
    pub movement_kind: MovementKind,
    pub total: Decimal,
    pub base_description: String,
    pub category_name: &'static str,
    pub category_nature: CategoryNature,
}

/// Compra gera contas a pagar, venda gera contas a receber. Consignação é a
/// exceção: o dono do veículo continua sendo o terceiro, então lançamos só a
/// comissão da loja, sempre a receber.
pub(crate) fn classify_posting(
    order_kind: OrderKind,
    display_id: i32,
    total_amount: Decimal,
    destination: PostingDestination,
) -> Posting {
    let movement_kind = match order_kind {
        OrderKind::Purchase => MovementKind::Purchase,
        OrderKind::Sale => MovementKind::Sale,
    };

    if destination == PostingDestination::Consignment {
        return Posting {
            kind: TitleKind::Receivable,
            movement_kind,
            total: CONSIGNMENT_COMMISSION,
            base_description: format!("Comissão Consignação - Pedido #{}", display_id),
            category_name: SALE_CATEGORY,
            category_nature: CategoryNature::Income,
        };
    }

    match order_kind {
        OrderKind::Purchase => Posting {
            kind: TitleKind::Payable,
            movement_kind,
            total: total_amount,
            base_description: format!("Compra de Veículo - Pedido #{}", display_id),
            category_name: ACQUISITION_CATEGORY,
            category_nature: CategoryNature::Expense,
        },
        OrderKind::Sale => Posting {
            kind: TitleKind::Receivable,
            movement_kind,
            total: total_amount,
            base_description: format!("Venda de Veículo - Pedido #{}", display_id),
            category_name: SALE_CATEGORY,
            category_nature: CategoryNature::Income,
        },
    }
}

#[derive(Clone)]
pub struct OperationsService {
    repo: OperationsRepository,
    inventory_service: InventoryService,
    payments_service: PaymentsService,
    finance_service: FinanceService,
}

impl OperationsService {
    pub fn new(
        repo: OperationsRepository,
        inventory_service: InventoryService,
        payments_service: PaymentsService,
        finance_service: FinanceService,
    ) -> Self {
        Self {
            repo,
            inventory_service,
            payments_service,
            finance_service,
        }
    }

    /// Confirma um pedido: gera o cronograma, lança os títulos (e as baixas
    /// imediatas), fecha o pedido e atualiza os veículos.
    ///
    /// Tudo roda numa única transação: se qualquer parcela falhar, nada
    /// fica para trás e o pedido continua DRAFT.
    pub async fn confirm_order(
        &self,
        pool: &PgPool,
        order_id: Uuid,
        expected_kind: OrderKind,
        condition_id: Option<Uuid>,
        bank_account_id: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<Vec<FinancialTitle>, AppError> {
        let mut tx = pool.begin().await?;

        // 1. Trava e valida o pedido
        let order = self.repo
            .get_order_for_update(&mut *tx, order_id)
            .await?
            .ok_or(AppError::OrderNotFound)?;

        if order.kind != expected_kind {
            return Err(AppError::OrderKindMismatch);
        }
        if order.status != OrderStatus::Draft {
            return Err(AppError::OrderAlreadyConfirmed);
        }
        // Cinto e suspensório: pedido DRAFT não deveria ter títulos
        if self.finance_service.has_titles_for_order(&mut tx, order.id).await? {
            return Err(AppError::OrderAlreadyConfirmed);
        }

        // 2. Classifica a direção do lançamento
        let method_id = order.payment_method_id.ok_or(AppError::PaymentMethodRequired)?;
        let method = self.payments_service.get_method(&mut *tx, method_id).await?;
        let posting = classify_posting(order.kind, order.display_id, order.total_amount, method.destination);

        // 3. Categoria fixa da direção
        let category = self.finance_service
            .ensure_category(&mut tx, posting.category_name, CategoryKind::Variable, posting.category_nature)
            .await?;

        // 4. Plano de parcelamento + cronograma
        let plan = self.payments_service.resolve_plan(&mut tx, method.id, condition_id).await?;
        let schedule = generate_schedule(posting.total, &plan.rule(), today)?;

        // 5. Baixa imediata exige conta bancária válida antes de lançar
        let needs_account = schedule
            .iter()
            .any(|i| settles_today(method.destination, i.due_date, today));
        if needs_account {
            let account_id = bank_account_id.ok_or(AppError::BankAccountRequired)?;
            self.finance_service.get_bank_account(&mut tx, account_id).await?;
        }

        // 6. Um título por parcela
        let mut titles = Vec::with_capacity(schedule.len());
        for installment in &schedule {
            let title = self.finance_service.post_title(
                &mut tx,
                &order,
                &method,
                posting.kind,
                posting.movement_kind,
                &posting.base_description,
                installment,
                plan.condition_id(),
                Some(category.id),
                bank_account_id,
                today,
            ).await?;
            titles.push(title);
        }

        // 7. Fecha o pedido e atualiza os veículos
        self.repo.set_order_status(&mut *tx, order.id, OrderStatus::Done).await?;

        let vehicle_ids = self.repo.list_order_vehicle_ids(&mut *tx, order.id).await?;
        let vehicle_status = match order.kind {
            OrderKind::Purchase => VehicleStatus::Available,
            OrderKind::Sale => VehicleStatus::Sold,
        };
        self.inventory_service.settle_vehicles(&mut tx, &vehicle_ids, vehicle_status).await?;

        tx.commit().await?;

        tracing::info!(
            "Pedido #{} confirmado: {} parcela(s) lançada(s)",
            order.display_id, titles.len()
        );

        Ok(titles)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn purchase_posts_a_payable_over_the_full_value() {
        let posting = classify_posting(
            OrderKind::Purchase, 42, dec("45000.00"), PostingDestination::Payable,
        );

        assert_eq!(posting.kind, TitleKind::Payable);
        assert_eq!(posting.movement_kind, MovementKind::Purchase);
        assert_eq!(posting.total, dec("45000.00"));
        assert_eq!(posting.base_description, "Compra de Veículo - Pedido #42");
        assert_eq!(posting.category_nature, CategoryNature::Expense);
    }

    #[test]
    fn sale_posts_a_receivable_over_the_full_value() {
        let posting = classify_posting(
            OrderKind::Sale, 42, dec("52000.00"), PostingDestination::ImmediateCash,
        );

        assert_eq!(posting.kind, TitleKind::Receivable);
        assert_eq!(posting.movement_kind, MovementKind::Sale);
        assert_eq!(posting.total, dec("52000.00"));
        assert_eq!(posting.base_description, "Venda de Veículo - Pedido #42");
        assert_eq!(posting.category_nature, CategoryNature::Income);
    }

    #[test]
    fn consignment_posts_only_the_commission_never_the_full_value() {
        let posting = classify_posting(
            OrderKind::Purchase, 42, dec("45000.00"), PostingDestination::Consignment,
        );

        assert_eq!(posting.kind, TitleKind::Receivable);
        assert_eq!(posting.total, Decimal::ZERO);
        assert_ne!(posting.total, dec("45000.00"));
        assert_eq!(posting.base_description, "Comissão Consignação - Pedido #42");
        assert_eq!(posting.category_nature, CategoryNature::Income);
    }

    #[test]
    fn consignment_flips_sales_too() {
        let posting = classify_posting(
            OrderKind::Sale, 7, dec("30000.00"), PostingDestination::Consignment,
        );

        assert_eq!(posting.kind, TitleKind::Receivable);
        assert_eq!(posting.movement_kind, MovementKind::Sale);
        assert_eq!(posting.total, Decimal::ZERO);
    }
}
