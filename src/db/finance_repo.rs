// src/db/finance_repo.rs

use sqlx::{PgPool, Postgres, Executor};
use uuid::Uuid;
use rust_decimal::Decimal;
use chrono::NaiveDate;
use crate::{
    common::error::AppError,
    models::finance::{
        BankAccount, FinancialCategory, FinancialMovement, FinancialTitle,
        CategoryKind, CategoryNature, MovementDirection, MovementKind, TitleKind, TitleStatus,
    },
};

#[derive(Clone)]
pub struct FinanceRepository {
    _pool: PgPool,
}

impl FinanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { _pool: pool }
    }

    // =========================================================================
    //  CATEGORIAS (Plano de Contas)
    // =========================================================================

    pub async fn find_category<'e, E>(
        &self,
        executor: E,
        name: &str,
        nature: CategoryNature,
    ) -> Result<Option<FinancialCategory>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, FinancialCategory>(
            r#"
            SELECT id, name, kind, nature, is_active
            FROM financial_categories
            WHERE name = $1 AND nature = $2
            "#,
        )
        .bind(name)
        .bind(nature)
        .fetch_optional(executor)
        .await?;

        Ok(category)
    }

    /// Get-or-create atômico: o índice único (name, nature) + ON CONFLICT
    /// garantem que duas confirmações concorrentes não dupliquem a categoria.
    pub async fn upsert_category<'e, E>(
        &self,
        executor: E,
        name: &str,
        kind: CategoryKind,
        nature: CategoryNature,
    ) -> Result<FinancialCategory, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let category = sqlx::query_as::<_, FinancialCategory>(
            r#"
            INSERT INTO financial_categories (name, kind, nature)
            VALUES ($1, $2, $3)
            ON CONFLICT (name, nature) DO UPDATE SET name = EXCLUDED.name
            RETURNING id, name, kind, nature, is_active
            "#,
        )
        .bind(name)
        .bind(kind)
        .bind(nature)
        .fetch_one(executor)
        .await?;

        Ok(category)
    }

    // =========================================================================
    //  TÍTULOS (Contas a Pagar / Receber)
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_title<'e, E>(
        &self,
        executor: E,
        description: &str,
        kind: TitleKind,
        status: TitleStatus,
        amount_original: Decimal,
        amount_paid: Decimal,
        issue_date: NaiveDate,
        due_date: NaiveDate,
        installment_number: i32,
        installment_count: i32,
        order_id: Option<Uuid>,
        partner_id: Option<Uuid>,
        payment_method_id: Option<Uuid>,
        payment_condition_id: Option<Uuid>,
        category_id: Option<Uuid>,
    ) -> Result<FinancialTitle, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let title = sqlx::query_as::<_, FinancialTitle>(
            r#"
            INSERT INTO financial_titles (
                description, kind, status,
                amount_original, amount_paid,
                issue_date, due_date,
                installment_number, installment_count,
                order_id, partner_id,
                payment_method_id, payment_condition_id, category_id
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14)
            RETURNING
                id, description, kind, status,
                amount_original, amount_paid,
                issue_date, due_date,
                installment_number, installment_count,
                order_id, partner_id,
                payment_method_id, payment_condition_id, category_id,
                created_at
            "#,
        )
        .bind(description)
        .bind(kind)
        .bind(status)
        .bind(amount_original)
        .bind(amount_paid)
        .bind(issue_date)
        .bind(due_date)
        .bind(installment_number)
        .bind(installment_count)
        .bind(order_id)
        .bind(partner_id)
        .bind(payment_method_id)
        .bind(payment_condition_id)
        .bind(category_id)
        .fetch_one(executor)
        .await?;

        Ok(title)
    }

    pub async fn count_titles_by_order<'e, E>(
        &self,
        executor: E,
        order_id: Uuid,
    ) -> Result<i64, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let count = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM financial_titles WHERE order_id = $1",
        )
        .bind(order_id)
        .fetch_one(executor)
        .await?;

        Ok(count)
    }

    // =========================================================================
    //  CAIXA (Movimentações e Contas Bancárias)
    // =========================================================================

    #[allow(clippy::too_many_arguments)]
    pub async fn create_movement<'e, E>(
        &self,
        executor: E,
        title_id: Option<Uuid>,
        account_id: Uuid,
        amount: Decimal,
        direction: MovementDirection,
        kind: MovementKind,
        payment_method_id: Option<Uuid>,
        description: Option<&str>,
        movement_date: NaiveDate,
    ) -> Result<FinancialMovement, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let movement = sqlx::query_as::<_, FinancialMovement>(
            r#"
            INSERT INTO financial_movements (
                title_id, account_id, amount, direction, kind,
                payment_method_id, description, movement_date
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING
                id, title_id, account_id, amount, direction, kind,
                payment_method_id, description, movement_date, created_at
            "#,
        )
        .bind(title_id)
        .bind(account_id)
        .bind(amount)
        .bind(direction)
        .bind(kind)
        .bind(payment_method_id)
        .bind(description)
        .bind(movement_date)
        .fetch_one(executor)
        .await?;

        Ok(movement)
    }

    pub async fn get_account<'e, E>(
        &self,
        executor: E,
        account_id: Uuid,
    ) -> Result<Option<BankAccount>, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account = sqlx::query_as::<_, BankAccount>(
            r#"
            SELECT id, name, bank_name, current_balance, is_active, created_at
            FROM bank_accounts
            WHERE id = $1
            "#,
        )
        .bind(account_id)
        .fetch_optional(executor)
        .await?;

        Ok(account)
    }

    /// Incremento atômico no próprio UPDATE: sem ler-e-regravar o saldo,
    /// duas baixas simultâneas na mesma conta não se perdem.
    pub async fn adjust_account_balance<'e, E>(
        &self,
        executor: E,
        account_id: Uuid,
        delta: Decimal,
    ) -> Result<BankAccount, AppError>
    where
        E: Executor<'e, Database = Postgres>,
    {
        let account = sqlx::query_as::<_, BankAccount>(
            r#"
            UPDATE bank_accounts
            SET current_balance = current_balance + $2
            WHERE id = $1
            RETURNING id, name, bank_name, current_balance, is_active, created_at
            "#,
        )
        .bind(account_id)
        .bind(delta)
        .fetch_optional(executor)
        .await?;

        account.ok_or(AppError::BankAccountNotFound)
    }
}
