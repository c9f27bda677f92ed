// src/services/schedule.rs

use chrono::{Duration, NaiveDate};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::common::error::AppError;

/// Regra de parcelamento já resolvida (vinda de uma condição cadastrada
/// ou sintetizada "à vista")
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallmentRule {
    pub count: i32,
    pub first_offset_days: i32,
    pub interval_days: i32,
}

/// Uma parcela do cronograma. Vive só durante a confirmação do pedido,
/// nunca é persistida.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Installment {
    pub number: i32,
    pub total: i32,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

/// Gera o cronograma de parcelas sobre o valor negociado.
///
/// As parcelas 1..N-1 recebem round(total / N, 2); a última recebe o que
/// sobrou, de modo que a soma bate com o total mesmo com arredondamento.
/// Vencimento da parcela i (0-indexada): today + first_offset + i * interval.
pub fn generate_schedule(
    total_value: Decimal,
    rule: &InstallmentRule,
    today: NaiveDate,
) -> Result<Vec<Installment>, AppError> {
    if rule.count < 1 {
        return Err(AppError::InvalidInstallmentCount);
    }

    let count = rule.count;
    let base = (total_value / Decimal::from(count))
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);

    let mut installments = Vec::with_capacity(count as usize);
    let mut allocated = Decimal::ZERO;

    for i in 0..count {
        let amount = if i == count - 1 {
            total_value - allocated // a última absorve o resto do arredondamento
        } else {
            base
        };
        allocated += amount;

        let offset = i64::from(rule.first_offset_days) + i64::from(i) * i64::from(rule.interval_days);

        installments.push(Installment {
            number: i + 1,
            total: count,
            due_date: today + Duration::days(offset),
            amount,
        });
    }

    Ok(installments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, 1).unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn three_installments_last_absorbs_remainder() {
        let rule = InstallmentRule { count: 3, first_offset_days: 0, interval_days: 30 };
        let schedule = generate_schedule(dec("10000.00"), &rule, today()).unwrap();

        assert_eq!(schedule.len(), 3);
        assert_eq!(schedule[0].amount, dec("3333.33"));
        assert_eq!(schedule[1].amount, dec("3333.33"));
        assert_eq!(schedule[2].amount, dec("3333.34"));

        assert_eq!(schedule[0].due_date, today());
        assert_eq!(schedule[1].due_date, today() + Duration::days(30));
        assert_eq!(schedule[2].due_date, today() + Duration::days(60));

        let sum: Decimal = schedule.iter().map(|i| i.amount).sum();
        assert_eq!(sum, dec("10000.00"));
    }

    #[test]
    fn single_installment_uses_first_offset_and_ignores_interval() {
        let rule = InstallmentRule { count: 1, first_offset_days: 15, interval_days: 30 };
        let schedule = generate_schedule(dec("500.00"), &rule, today()).unwrap();

        assert_eq!(schedule.len(), 1);
        assert_eq!(schedule[0].number, 1);
        assert_eq!(schedule[0].total, 1);
        assert_eq!(schedule[0].amount, dec("500.00"));
        assert_eq!(schedule[0].due_date, today() + Duration::days(15));
    }

    #[test]
    fn sum_matches_total_for_every_count_up_to_360() {
        let total = dec("999.99");
        for count in 1..=360 {
            let rule = InstallmentRule { count, first_offset_days: 0, interval_days: 30 };
            let schedule = generate_schedule(total, &rule, today()).unwrap();

            let sum: Decimal = schedule.iter().map(|i| i.amount).sum();
            assert_eq!(sum, total, "soma divergiu para {} parcelas", count);

            for installment in &schedule[..schedule.len() - 1] {
                assert!(installment.amount.scale() <= 2);
            }
        }
    }

    #[test]
    fn due_dates_are_non_decreasing() {
        let rule = InstallmentRule { count: 12, first_offset_days: 10, interval_days: 30 };
        let schedule = generate_schedule(dec("1200.00"), &rule, today()).unwrap();

        for pair in schedule.windows(2) {
            assert!(pair[0].due_date <= pair[1].due_date);
        }
        assert_eq!(schedule[0].due_date, today() + Duration::days(10));
        assert_eq!(schedule[11].due_date, today() + Duration::days(10 + 11 * 30));
    }

    #[test]
    fn zero_installments_is_rejected() {
        let rule = InstallmentRule { count: 0, first_offset_days: 0, interval_days: 0 };
        let result = generate_schedule(dec("100.00"), &rule, today());
        assert!(matches!(result, Err(AppError::InvalidInstallmentCount)));
    }

    #[test]
    fn zero_total_generates_zero_amount_installments() {
        let rule = InstallmentRule { count: 2, first_offset_days: 0, interval_days: 30 };
        let schedule = generate_schedule(Decimal::ZERO, &rule, today()).unwrap();

        assert_eq!(schedule[0].amount, Decimal::ZERO);
        assert_eq!(schedule[1].amount, Decimal::ZERO);
    }
}
