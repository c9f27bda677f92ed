// src/services/finance_service.rs

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgConnection;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::FinanceRepository,
    models::finance::{
        BankAccount, FinancialCategory, FinancialMovement, FinancialTitle,
        CategoryKind, CategoryNature, MovementDirection, MovementKind, TitleKind, TitleStatus,
    },
    models::operations::Order,
    models::payments::{PaymentMethod, PostingDestination},
    services::schedule::Installment,
};

/// Parcela com vencimento hoje numa forma de baixa imediata (dinheiro/PIX)
/// já nasce quitada e entra no caixa.
pub(crate) fn settles_today(
    destination: PostingDestination,
    due_date: NaiveDate,
    today: NaiveDate,
) -> bool {
    destination == PostingDestination::ImmediateCash && due_date == today
}

/// Sufixo "(n/N)" só quando há mais de uma parcela
pub(crate) fn describe_installment(base: &str, number: i32, total: i32) -> String {
    if total > 1 {
        format!("{} ({}/{})", base, number, total)
    } else {
        base.to_string()
    }
}

#[derive(Clone)]
pub struct FinanceService {
    repo: FinanceRepository,
}

impl FinanceService {
    pub fn new(repo: FinanceRepository) -> Self {
        Self { repo }
    }

    /// Busca a categoria por (nome, natureza); se não existir, cria.
    /// O upsert do repo garante que não nascem duplicatas sob concorrência.
    pub async fn ensure_category(
        &self,
        conn: &mut PgConnection,
        name: &str,
        kind: CategoryKind,
        nature: CategoryNature,
    ) -> Result<FinancialCategory, AppError> {
        if let Some(existing) = self.repo.find_category(&mut *conn, name, nature).await? {
            return Ok(existing);
        }

        let created = self.repo.upsert_category(&mut *conn, name, kind, nature).await?;
        tracing::info!("Categoria financeira criada: {} ({:?})", created.name, created.nature);
        Ok(created)
    }

    pub async fn has_titles_for_order(
        &self,
        conn: &mut PgConnection,
        order_id: Uuid,
    ) -> Result<bool, AppError> {
        let count = self.repo.count_titles_by_order(&mut *conn, order_id).await?;
        Ok(count > 0)
    }

    pub async fn get_bank_account(
        &self,
        conn: &mut PgConnection,
        account_id: Uuid,
    ) -> Result<BankAccount, AppError> {
        self.repo
            .get_account(&mut *conn, account_id)
            .await?
            .ok_or(AppError::BankAccountNotFound)
    }

    /// Grava o título de uma parcela; parcela liquidada na hora já sai
    /// quitada e dispara a movimentação de caixa na conta informada.
    #[allow(clippy::too_many_arguments)]
    pub async fn post_title(
        &self,
        conn: &mut PgConnection,
        order: &Order,
        method: &PaymentMethod,
        kind: TitleKind,
        movement_kind: MovementKind,
        base_description: &str,
        installment: &Installment,
        condition_id: Option<Uuid>,
        category_id: Option<Uuid>,
        bank_account_id: Option<Uuid>,
        today: NaiveDate,
    ) -> Result<FinancialTitle, AppError> {
        let settled_now = settles_today(method.destination, installment.due_date, today);
        let description = describe_installment(base_description, installment.number, installment.total);

        let (status, amount_paid) = if settled_now {
            (TitleStatus::Paid, installment.amount)
        } else {
            (TitleStatus::Pending, Decimal::ZERO)
        };

        let title = self.repo.create_title(
            &mut *conn,
            &description,
            kind,
            status,
            installment.amount,
            amount_paid,
            today,
            installment.due_date,
            installment.number,
            installment.total,
            Some(order.id),
            Some(order.partner_id),
            Some(method.id),
            condition_id,
            category_id,
        ).await?;

        if settled_now {
            // A rota valida a conta antes de entrar no loop; aqui só protege
            let account_id = bank_account_id.ok_or(AppError::BankAccountRequired)?;
            self.post_movement(conn, &title, account_id, movement_kind, today).await?;
        }

        Ok(title)
    }

    /// Lança a movimentação de caixa da quitação e ajusta o saldo da conta
    pub async fn post_movement(
        &self,
        conn: &mut PgConnection,
        title: &FinancialTitle,
        account_id: Uuid,
        kind: MovementKind,
        today: NaiveDate,
    ) -> Result<FinancialMovement, AppError> {
        let direction = match title.kind {
            TitleKind::Receivable => MovementDirection::In,
            TitleKind::Payable => MovementDirection::Out,
        };

        let delta = match direction {
            MovementDirection::In => title.amount_original,
            MovementDirection::Out => -title.amount_original,
        };

        let description = format!("Quitação {}", title.description);

        let movement = self.repo.create_movement(
            &mut *conn,
            Some(title.id),
            account_id,
            title.amount_original,
            direction,
            kind,
            title.payment_method_id,
            Some(&description),
            today,
        ).await?;

        let account = self.repo
            .adjust_account_balance(&mut *conn, account_id, delta)
            .await?;

        tracing::info!(
            "Caixa: {} {:?} na conta {} (novo saldo {})",
            movement.amount, direction, account.name, account.current_balance
        );

        Ok(movement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn cash_method_due_today_settles_now() {
        let today = date(2025, 8, 1);
        assert!(settles_today(PostingDestination::ImmediateCash, today, today));
    }

    #[test]
    fn cash_method_due_in_the_future_stays_pending() {
        let today = date(2025, 8, 1);
        assert!(!settles_today(PostingDestination::ImmediateCash, date(2025, 8, 31), today));
    }

    #[test]
    fn non_cash_destinations_never_settle_now() {
        let today = date(2025, 8, 1);
        assert!(!settles_today(PostingDestination::Receivable, today, today));
        assert!(!settles_today(PostingDestination::Payable, today, today));
        assert!(!settles_today(PostingDestination::Consignment, today, today));
    }

    #[test]
    fn multi_installment_description_gets_a_suffix() {
        assert_eq!(
            describe_installment("Venda de Veículo - Pedido #7", 2, 3),
            "Venda de Veículo - Pedido #7 (2/3)"
        );
    }

    #[test]
    fn single_installment_description_has_no_suffix() {
        assert_eq!(
            describe_installment("Venda de Veículo - Pedido #7", 1, 1),
            "Venda de Veículo - Pedido #7"
        );
    }
}
