// src/services/payments_service.rs

use sqlx::{Postgres, Executor, Acquire};
use uuid::Uuid;
use validator::{ValidationError, ValidationErrors};

use crate::{
    common::error::AppError,
    db::PaymentsRepository,
    models::payments::{PaymentCondition, PaymentMethod},
    services::schedule::InstallmentRule,
};

/// Plano de parcelamento escolhido para a confirmação.
///
/// Quando a forma de pagamento não tem nenhuma condição cadastrada, o plano
/// "à vista" é sintetizado em memória: ele não existe no banco e os títulos
/// gerados ficam com payment_condition_id NULL.
#[derive(Debug, Clone)]
pub enum InstallmentPlan {
    Stored(PaymentCondition),
    CashToday,
}

impl InstallmentPlan {
    pub fn rule(&self) -> InstallmentRule {
        match self {
            InstallmentPlan::Stored(condition) => InstallmentRule {
                count: condition.installment_count,
                first_offset_days: condition.first_offset_days,
                interval_days: condition.interval_days,
            },
            InstallmentPlan::CashToday => InstallmentRule {
                count: 1,
                first_offset_days: 0,
                interval_days: 0,
            },
        }
    }

    pub fn condition_id(&self) -> Option<Uuid> {
        match self {
            InstallmentPlan::Stored(condition) => Some(condition.id),
            InstallmentPlan::CashToday => None,
        }
    }
}

#[derive(Clone)]
pub struct PaymentsService {
    repo: PaymentsRepository,
}

impl PaymentsService {
    pub fn new(repo: PaymentsRepository) -> Self {
        Self { repo }
    }

    pub async fn get_method<'e, E>(
        &self,
        executor: E,
        method_id: Uuid,
    ) -> Result<PaymentMethod, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo
            .get_method(executor, method_id)
            .await?
            .ok_or(AppError::PaymentMethodNotFound)
    }

    pub async fn list_conditions<'e, E>(
        &self,
        executor: E,
        method_id: Uuid,
    ) -> Result<Vec<PaymentCondition>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        self.repo.list_conditions_by_method(executor, method_id).await
    }

    /// Cadastra uma condição respeitando os limites da forma de pagamento
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
        E: Executor<'e, Database = Postgres> + Acquire<'e, Database = Postgres>,
    {
        let mut tx = executor.begin().await?;

        let method = self.repo
            .get_method(&mut *tx, method_id)
            .await?
            .ok_or(AppError::PaymentMethodNotFound)?;

        if installment_count > 1 && !method.allows_installments {
            return Err(installment_error("Esta forma de pagamento não aceita parcelamento."));
        }
        if installment_count > method.max_installments {
            return Err(installment_error("A quantidade de parcelas excede o limite da forma de pagamento."));
        }

        let condition = self.repo
            .create_condition(&mut *tx, method_id, name, installment_count, first_offset_days, interval_days)
            .await?;

        tx.commit().await?;
        Ok(condition)
    }

    /// Resolve o plano de parcelamento da confirmação.
    ///
    /// Com `chosen` preenchido, a condição precisa existir, estar ativa e
    /// pertencer à forma de pagamento. Sem escolha, sintetiza o plano "à
    /// vista" apenas quando a forma não tem nenhuma condição ativa.
    pub async fn resolve_plan(
        &self,
        conn: &mut sqlx::PgConnection,
        method_id: Uuid,
        chosen: Option<Uuid>,
    ) -> Result<InstallmentPlan, AppError> {
        match chosen {
            Some(condition_id) => {
                let condition = self.repo
                    .get_condition(&mut *conn, condition_id)
                    .await?
                    .ok_or(AppError::PaymentConditionNotFound)?;

                if condition.payment_method_id != method_id
                    || !condition.is_active.unwrap_or(true)
                {
                    return Err(AppError::PaymentConditionNotFound);
                }

                Ok(InstallmentPlan::Stored(condition))
            }
            None => {
                let active_count = self.repo
                    .list_conditions_by_method(&mut *conn, method_id)
                    .await?
                    .into_iter()
                    .filter(|c| c.is_active.unwrap_or(true))
                    .count();

                if active_count > 0 {
                    // A tela deveria ter exigido a escolha
                    return Err(AppError::PaymentConditionRequired);
                }

                tracing::info!(
                    "Forma de pagamento {} sem condições cadastradas; usando plano à vista",
                    method_id
                );
                Ok(InstallmentPlan::CashToday)
            }
        }
    }
}

fn installment_error(message: &'static str) -> AppError {
    let mut errors = ValidationErrors::new();
    let mut err = ValidationError::new("range");
    err.message = Some(message.into());
    errors.add("installmentCount", err);
    AppError::ValidationError(errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stored_condition() -> PaymentCondition {
        PaymentCondition {
            id: Uuid::new_v4(),
            payment_method_id: Uuid::new_v4(),
            name: "Entrada + 30/60".to_string(),
            installment_count: 3,
            first_offset_days: 0,
            interval_days: 30,
            is_active: Some(true),
            created_at: None,
        }
    }

    #[test]
    fn cash_plan_is_single_installment_due_today() {
        let plan = InstallmentPlan::CashToday;
        let rule = plan.rule();

        assert_eq!(rule.count, 1);
        assert_eq!(rule.first_offset_days, 0);
        assert_eq!(rule.interval_days, 0);
        assert_eq!(plan.condition_id(), None);
    }

    #[test]
    fn stored_plan_carries_the_condition_fields() {
        let condition = stored_condition();
        let id = condition.id;
        let plan = InstallmentPlan::Stored(condition);
        let rule = plan.rule();

        assert_eq!(rule.count, 3);
        assert_eq!(rule.first_offset_days, 0);
        assert_eq!(rule.interval_days, 30);
        assert_eq!(plan.condition_id(), Some(id));
    }
}
