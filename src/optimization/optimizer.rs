//! Payment optimization: find the monthly payment that reaches a target
//! payoff horizon, and build complete optimized plans around it.

use crate::core::debt::{total_balance, total_minimums, Debt};
use crate::core::error::PayoffError;
use crate::core::strategy::Strategy;
use crate::simulation::scenario::{PayoffScenario, ScenarioKind};
use crate::simulation::simulator::{
    minimum_payment_scenario, validate, validate_debts, PayoffSimulator, SimulationRequest,
};
use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Search parameters for [`PaymentOptimizer`].
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub max_iterations: u32,
    /// Stop once the payment bracket is narrower than this.
    pub tolerance: Decimal,
    /// Accept a payment whose payoff lands within this many months of the target.
    pub month_tolerance: u32,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            tolerance: Decimal::ONE,
            month_tolerance: 1,
        }
    }
}

/// Outcome of a target-months search.
///
/// When `converged` is false the payment is the midpoint of the final
/// bracket: a best estimate, not a guaranteed hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentOptimization {
    pub monthly_payment: Decimal,
    pub target_months: u32,
    pub converged: bool,
    pub iterations: u32,
    /// Months to payoff at `monthly_payment`, if that payment simulates.
    pub achieved_months: Option<u32>,
}

/// How an optimized plan chooses its payment.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "kebab-case")]
pub enum PlanGoal {
    /// Debt-free in this many months.
    TargetMonths(u32),
    /// Pay this much every month.
    MaxPayment(Decimal),
    /// 20% above the sum of minimums.
    Default,
}

/// An optimized payment plan with its projected scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizedPlan {
    pub recommended_payment: Decimal,
    pub scenario: PayoffScenario,
    pub rationale: String,
    /// Interest saved against paying minimums only. `None` when the
    /// minimums-only baseline never pays off within the month ceiling.
    pub savings_vs_minimum: Option<Decimal>,
    /// False only for a target-months goal that did not converge.
    pub converged: bool,
}

const DEFAULT_PLAN_MULTIPLIER: Decimal = dec!(1.2);

/// Binary-search payment optimizer.
#[derive(Debug, Clone, Default)]
pub struct PaymentOptimizer {
    simulator: PayoffSimulator,
    config: OptimizerConfig,
}

impl PaymentOptimizer {
    pub fn new(simulator: PayoffSimulator, config: OptimizerConfig) -> Self {
        Self { simulator, config }
    }

    /// Find the monthly payment that pays off `debts` in about
    /// `target_months`.
    ///
    /// Searches `[sum(minimums), max(sum(balances), sum(minimums))]`. A
    /// midpoint whose simulation lands within `month_tolerance` months of
    /// the target is returned at once; otherwise the bracket is narrowed
    /// (failed simulations count as "pay more") until it is narrower than
    /// `tolerance` or the iteration budget runs out.
    ///
    /// # Errors
    ///
    /// [`PayoffError::NoDebts`], [`PayoffError::InvalidDebt`], or
    /// [`PayoffError::InvalidParameter`] for a zero target.
    pub fn optimize_for_target_months(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        target_months: u32,
        start_date: NaiveDate,
    ) -> Result<PaymentOptimization, PayoffError> {
        if target_months == 0 {
            return Err(PayoffError::InvalidParameter(
                "target months must be at least 1".into(),
            ));
        }
        validate_debts(debts)?;
        let minimums = total_minimums(debts);
        validate(debts, minimums)?;

        let mut low = minimums;
        let mut high = total_balance(debts).max(minimums);
        let mut iterations = 0;

        while iterations < self.config.max_iterations {
            iterations += 1;
            let mid = (low + high) / Decimal::TWO;
            let request = SimulationRequest::new(debts, strategy, mid, start_date);
            match self.simulator.simulate(&request) {
                Ok(scenario) => {
                    let months = scenario.total_months();
                    debug!(
                        "optimizer iteration {}: payment={} months={} target={}",
                        iterations, mid, months, target_months
                    );
                    if months.abs_diff(target_months) <= self.config.month_tolerance {
                        return Ok(PaymentOptimization {
                            monthly_payment: mid,
                            target_months,
                            converged: true,
                            iterations,
                            achieved_months: Some(months),
                        });
                    } else if months > target_months {
                        low = mid;
                    } else {
                        high = mid;
                    }
                }
                Err(err) => {
                    debug!("optimizer iteration {}: payment={} failed: {}", iterations, mid, err);
                    low = mid;
                }
            }
            if high - low < self.config.tolerance {
                break;
            }
        }

        let payment = (low + high) / Decimal::TWO;
        let achieved_months = self
            .simulator
            .simulate(&SimulationRequest::new(debts, strategy, payment, start_date))
            .ok()
            .map(|s| s.total_months());
        warn!(
            "optimizer did not reach {} months after {} iterations; best estimate {} ({:?} months)",
            target_months, iterations, payment, achieved_months
        );
        Ok(PaymentOptimization {
            monthly_payment: payment,
            target_months,
            converged: false,
            iterations,
            achieved_months,
        })
    }

    /// Build a complete optimized plan for `goal`.
    ///
    /// The resulting scenario is named "Optimized Payment Plan" and tagged
    /// [`ScenarioKind::Optimized`].
    pub fn optimize_plan(
        &self,
        debts: &[Debt],
        strategy: Strategy,
        goal: PlanGoal,
        start_date: NaiveDate,
    ) -> Result<OptimizedPlan, PayoffError> {
        validate_debts(debts)?;
        let (payment, rationale, converged) = match goal {
            PlanGoal::TargetMonths(months) => {
                let found = self.optimize_for_target_months(debts, strategy, months, start_date)?;
                let rationale = format!(
                    "To reach debt freedom in {} months, you need to pay ${:.2} per month.",
                    months,
                    found.monthly_payment.round_dp(2)
                );
                (found.monthly_payment, rationale, found.converged)
            }
            PlanGoal::MaxPayment(amount) => (
                amount,
                format!(
                    "With your maximum affordable payment of ${:.2}/month, you can optimize your debt payoff.",
                    amount.round_dp(2)
                ),
                true,
            ),
            PlanGoal::Default => {
                let payment = total_minimums(debts) * DEFAULT_PLAN_MULTIPLIER;
                (
                    payment,
                    format!(
                        "We recommend paying ${:.2}/month (20% more than minimums) to make meaningful progress.",
                        payment.round_dp(2)
                    ),
                    true,
                )
            }
        };

        let request = SimulationRequest::new(debts, strategy, payment, start_date)
            .with_name("Optimized Payment Plan");
        let scenario = self
            .simulator
            .simulate(&request)?
            .with_kind(ScenarioKind::Optimized);

        let savings_vs_minimum = match minimum_payment_scenario(debts, start_date) {
            Ok(baseline) => Some(baseline.total_interest() - scenario.total_interest()),
            Err(err) => {
                debug!("minimum-payment baseline unavailable: {}", err);
                None
            }
        };

        Ok(OptimizedPlan {
            recommended_payment: payment,
            scenario,
            rationale,
            savings_vs_minimum,
            converged,
        })
    }
}

/// Target-months search with the default simulator and search parameters.
pub fn optimize_for_target_months(
    debts: &[Debt],
    strategy: Strategy,
    target_months: u32,
    start_date: NaiveDate,
) -> Result<PaymentOptimization, PayoffError> {
    PaymentOptimizer::default().optimize_for_target_months(
        debts,
        strategy,
        target_months,
        start_date,
    )
}
