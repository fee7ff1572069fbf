//! Random debt portfolios for benchmarks and ad-hoc experiments.

use crate::core::debt::{Debt, DebtKind, MAX_AMOUNT};
use rand::Rng;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Configuration for generating a random debt portfolio.
#[derive(Debug, Clone)]
pub struct PortfolioConfig {
    /// Number of debts to generate.
    pub debt_count: usize,
    /// Smallest opening balance.
    pub min_balance: Decimal,
    /// Largest opening balance.
    pub max_balance: Decimal,
    /// Highest APR; rates are drawn from `0..max_apr`.
    pub max_apr: Decimal,
    /// Minimum payment as a percentage of the balance.
    pub minimum_payment_percent: Decimal,
    /// Probability that a debt is flagged delinquent.
    pub delinquency_rate: f64,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            debt_count: 5,
            min_balance: dec!(250),
            max_balance: dec!(25_000),
            max_apr: dec!(30),
            minimum_payment_percent: dec!(3),
            delinquency_rate: 0.0,
        }
    }
}

/// Generate a random portfolio.
///
/// Minimum payments are floored at 25 so every generated debt satisfies
/// the simulation-entry invariants. Pass the result to the simulator with
/// a payment comfortably above the minimums; a minimum that barely covers
/// interest can legitimately overrun the month ceiling.
pub fn generate_random_portfolio(config: &PortfolioConfig) -> Vec<Debt> {
    let mut rng = rand::thread_rng();
    let min_balance = config.min_balance.to_f64().unwrap_or(250.0);
    let max_balance = config
        .max_balance
        .to_f64()
        .unwrap_or(25_000.0)
        .max(min_balance + 1.0);
    let max_apr = config.max_apr.to_f64().unwrap_or(30.0).clamp(0.0, 100.0);

    (0..config.debt_count)
        .map(|i| {
            let balance = Decimal::from_f64_retain(rng.gen_range(min_balance..max_balance))
                .unwrap_or(config.min_balance)
                .round_dp(2)
                .clamp(dec!(1), MAX_AMOUNT);
            let apr = if max_apr > 0.0 {
                Decimal::from_f64_retain(rng.gen_range(0.0..max_apr))
                    .unwrap_or(Decimal::ZERO)
                    .round_dp(2)
            } else {
                Decimal::ZERO
            };
            let minimum = balance
                .checked_mul(config.minimum_payment_percent)
                .map_or(MAX_AMOUNT, |scaled| scaled / Decimal::ONE_HUNDRED)
                .round_dp(2)
                .clamp(dec!(25), MAX_AMOUNT);
            let kind = match rng.gen_range(0..3) {
                0 => DebtKind::CreditCard { credit_limit: None },
                1 => DebtKind::PersonalLoan { term_months: None },
                _ => DebtKind::InstallmentLoan { term_months: None },
            };
            let delinquent = config.delinquency_rate > 0.0
                && rng.gen_bool(config.delinquency_rate.clamp(0.0, 1.0));

            Debt::new(
                format!("DEBT-{:03}", i),
                format!("Debt {}", i + 1),
                balance,
                apr,
                minimum,
            )
            .with_kind(kind)
            .with_delinquent(delinquent)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_oversized_config_stays_within_ceiling() {
        let config = PortfolioConfig {
            debt_count: 3,
            min_balance: dec!(10_000_000_000_000_000),
            max_balance: dec!(90_000_000_000_000_000),
            minimum_payment_percent: dec!(500),
            ..Default::default()
        };
        for debt in generate_random_portfolio(&config) {
            assert!(debt.check().is_ok());
            assert_eq!(debt.balance(), MAX_AMOUNT);
            assert_eq!(debt.minimum_payment(), MAX_AMOUNT);
        }
    }

    #[test]
    fn test_generate_default_portfolio() {
        let config = PortfolioConfig::default();
        let debts = generate_random_portfolio(&config);
        assert_eq!(debts.len(), 5);
        for debt in &debts {
            assert!(debt.check().is_ok());
            assert!(debt.balance() >= dec!(250));
            assert!(debt.balance() <= dec!(25_000));
            assert!(debt.apr() <= dec!(30));
            assert!(debt.minimum_payment() >= dec!(25));
            assert!(!debt.is_delinquent());
        }
    }

    #[test]
    fn test_generate_all_delinquent() {
        let config = PortfolioConfig {
            debt_count: 8,
            delinquency_rate: 1.0,
            ..Default::default()
        };
        let debts = generate_random_portfolio(&config);
        assert!(debts.iter().all(|d| d.is_delinquent()));
    }

    #[test]
    fn test_generate_empty() {
        let config = PortfolioConfig {
            debt_count: 0,
            ..Default::default()
        };
        assert!(generate_random_portfolio(&config).is_empty());
    }
}
