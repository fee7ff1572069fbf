//! Month-by-month payoff simulation.
//!
//! The simulator services every active debt's minimum payment, then sends
//! whatever is left of the monthly budget to the first unpaid debt in
//! strategy order. It stops once every balance reaches zero, or fails once
//! the month ceiling is hit.

use crate::core::debt::{total_minimums, Debt, DebtId};
use crate::core::error::PayoffError;
use crate::core::interest::monthly_interest;
use crate::core::strategy::{order_debts, Strategy};
use crate::simulation::scenario::{
    DebtPayoffSummary, PayoffScenario, ScenarioParts, ScheduleItem,
};
use chrono::{Days, Months, NaiveDate};
use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Hard ceiling on simulated months (50 years).
pub const MAX_MONTHS: u32 = 600;

/// Remaining balance at or below which a debt counts as paid off.
pub const PAYOFF_THRESHOLD: Decimal = dec!(0.01);

/// How payment dates advance from the start date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DateConvention {
    /// Every month is 30 days. Drifts against the calendar over long
    /// horizons but never changes financial totals.
    #[default]
    ThirtyDay,
    /// True calendar months, clamped to the last day of short months.
    CalendarMonth,
}

impl DateConvention {
    /// Date of payment number `month` counted from `start`.
    pub fn advance(&self, start: NaiveDate, month: u32) -> NaiveDate {
        let date = match self {
            DateConvention::ThirtyDay => start.checked_add_days(Days::new(30 * u64::from(month))),
            DateConvention::CalendarMonth => start.checked_add_months(Months::new(month)),
        };
        date.unwrap_or(NaiveDate::MAX)
    }
}

/// Tunables for the simulation loop.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub max_months: u32,
    pub payoff_threshold: Decimal,
    pub date_convention: DateConvention,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_months: MAX_MONTHS,
            payoff_threshold: PAYOFF_THRESHOLD,
            date_convention: DateConvention::ThirtyDay,
        }
    }
}

/// Inputs for one simulation run.
#[derive(Debug, Clone)]
pub struct SimulationRequest<'a> {
    pub debts: &'a [Debt],
    pub strategy: Strategy,
    pub monthly_payment: Decimal,
    pub start_date: NaiveDate,
    pub custom_order: Option<&'a [DebtId]>,
    pub name: Option<String>,
}

impl<'a> SimulationRequest<'a> {
    pub fn new(
        debts: &'a [Debt],
        strategy: Strategy,
        monthly_payment: Decimal,
        start_date: NaiveDate,
    ) -> Self {
        Self {
            debts,
            strategy,
            monthly_payment,
            start_date,
            custom_order: None,
            name: None,
        }
    }

    pub fn with_custom_order(mut self, order: &'a [DebtId]) -> Self {
        self.custom_order = Some(order);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Per-debt state owned by a single simulation call.
struct WorkingDebt {
    debt: Debt,
    remaining: Decimal,
    total_paid: Decimal,
    total_interest: Decimal,
    months_to_payoff: u32,
    paid_off: bool,
}

impl WorkingDebt {
    fn new(debt: Debt) -> Self {
        Self {
            remaining: debt.balance(),
            debt,
            total_paid: Decimal::ZERO,
            total_interest: Decimal::ZERO,
            months_to_payoff: 0,
            paid_off: false,
        }
    }

    fn settle_if_paid(&mut self, month: u32, threshold: Decimal) {
        if self.remaining <= threshold {
            self.remaining = Decimal::ZERO;
            self.paid_off = true;
            self.months_to_payoff = month;
        }
    }
}

/// The payoff simulation engine.
///
/// Stateless apart from its configuration; one instance can serve any
/// number of concurrent calls.
#[derive(Debug, Clone, Default)]
pub struct PayoffSimulator {
    config: SimulationConfig,
}

impl PayoffSimulator {
    pub fn new(config: SimulationConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Simulate a full payoff plan.
    ///
    /// # Errors
    ///
    /// - [`PayoffError::NoDebts`] if `request.debts` is empty.
    /// - [`PayoffError::InvalidDebt`] if a debt has a non-positive balance or
    ///   minimum payment, or an APR outside 0 to 100.
    /// - [`PayoffError::InsufficientPayment`] if the monthly payment does not
    ///   cover the sum of minimums.
    /// - [`PayoffError::SimulationOverrun`] if debts remain after
    ///   `max_months`.
    pub fn simulate(
        &self,
        request: &SimulationRequest<'_>,
    ) -> Result<PayoffScenario, PayoffError> {
        validate(request.debts, request.monthly_payment)?;

        let threshold = self.config.payoff_threshold;
        let convention = self.config.date_convention;
        let start = request.start_date;

        let mut working: Vec<WorkingDebt> =
            order_debts(request.debts, request.strategy, request.custom_order)
                .into_iter()
                .map(WorkingDebt::new)
                .collect();

        debug!(
            "simulating {} debts, strategy={}, payment={}",
            working.len(),
            request.strategy,
            request.monthly_payment
        );

        let mut schedule = Vec::new();
        let mut month = 0u32;
        let mut total_interest = Decimal::ZERO;
        let mut total_paid = Decimal::ZERO;

        while working.iter().any(|w| !w.paid_off) {
            if month >= self.config.max_months {
                let unpaid = working.iter().filter(|w| !w.paid_off).count();
                warn!(
                    "simulation overran {} months with {} debts unpaid (payment {})",
                    month, unpaid, request.monthly_payment
                );
                return Err(PayoffError::SimulationOverrun {
                    months: month,
                    unpaid,
                });
            }
            month += 1;
            let payment_date = convention.advance(start, month);
            let mut remaining_payment = request.monthly_payment;

            // Minimum-payment phase. Rows are buffered so the surplus can be
            // folded in before the month is appended.
            let mut rows: Vec<(usize, ScheduleItem)> = Vec::with_capacity(working.len());
            for (idx, w) in working.iter_mut().enumerate() {
                if w.paid_off {
                    continue;
                }
                let interest = monthly_interest(w.remaining, w.debt.apr());
                let payment = w.debt.minimum_payment().min(w.remaining + interest);
                let interest_portion = interest.min(payment);
                let principal = payment - interest_portion;

                w.remaining -= principal;
                w.total_paid += payment;
                w.total_interest += interest_portion;
                total_interest += interest_portion;
                remaining_payment -= payment;
                w.settle_if_paid(month, threshold);

                rows.push((
                    idx,
                    ScheduleItem {
                        month,
                        payment_date,
                        debt_id: w.debt.id().clone(),
                        debt_name: w.debt.name().to_string(),
                        payment,
                        principal,
                        interest: interest_portion,
                        remaining_balance: w.remaining.max(Decimal::ZERO),
                    },
                ));
            }

            // Surplus phase: everything left goes to one target debt.
            if remaining_payment > Decimal::ZERO {
                if let Some(target) = working.iter().position(|w| !w.paid_off) {
                    let w = &mut working[target];
                    let extra = remaining_payment.min(w.remaining);
                    w.remaining -= extra;
                    w.total_paid += extra;
                    w.settle_if_paid(month, threshold);

                    if let Some((_, row)) = rows.iter_mut().find(|(idx, _)| *idx == target) {
                        row.payment += extra;
                        row.principal += extra;
                        row.remaining_balance = w.remaining.max(Decimal::ZERO);
                    }
                }
            }

            for (_, row) in rows {
                total_paid += row.payment;
                schedule.push(row);
            }
        }

        let debt_summaries = working
            .iter()
            .map(|w| DebtPayoffSummary {
                debt_id: w.debt.id().clone(),
                debt_name: w.debt.name().to_string(),
                original_balance: w.debt.balance(),
                total_paid: w.total_paid,
                total_interest: w.total_interest,
                months_to_payoff: w.months_to_payoff,
                payoff_date: convention.advance(start, w.months_to_payoff),
            })
            .collect();

        debug!(
            "simulation finished: {} months, interest={}, paid={}",
            month, total_interest, total_paid
        );

        Ok(PayoffScenario::from_parts(ScenarioParts {
            name: request
                .name
                .clone()
                .unwrap_or_else(|| request.strategy.scenario_name().to_string()),
            strategy: request.strategy,
            monthly_payment: request.monthly_payment,
            start_date: start,
            total_months: month,
            payoff_date: convention.advance(start, month),
            total_interest,
            total_paid,
            schedule,
            debt_summaries,
        }))
    }
}

/// Check that there is at least one debt and every debt is valid.
///
/// Runs before any sum over the debts is formed.
pub(crate) fn validate_debts(debts: &[Debt]) -> Result<(), PayoffError> {
    if debts.is_empty() {
        return Err(PayoffError::NoDebts);
    }
    for debt in debts {
        debt.check().map_err(|reason| PayoffError::InvalidDebt {
            id: debt.id().clone(),
            reason,
        })?;
    }
    Ok(())
}

/// Check simulation-entry preconditions.
pub(crate) fn validate(debts: &[Debt], monthly_payment: Decimal) -> Result<(), PayoffError> {
    validate_debts(debts)?;
    let required = total_minimums(debts);
    if monthly_payment < required {
        return Err(PayoffError::insufficient(monthly_payment, required));
    }
    Ok(())
}

/// Simulate with the default configuration.
pub fn simulate(
    debts: &[Debt],
    strategy: Strategy,
    monthly_payment: Decimal,
    start_date: NaiveDate,
    custom_order: Option<&[DebtId]>,
) -> Result<PayoffScenario, PayoffError> {
    let mut request = SimulationRequest::new(debts, strategy, monthly_payment, start_date);
    request.custom_order = custom_order;
    PayoffSimulator::default().simulate(&request)
}

/// Baseline that pays exactly the sum of minimums, highest APR first.
pub fn minimum_payment_scenario(
    debts: &[Debt],
    start_date: NaiveDate,
) -> Result<PayoffScenario, PayoffError> {
    validate_debts(debts)?;
    let request = SimulationRequest::new(
        debts,
        Strategy::Avalanche,
        total_minimums(debts),
        start_date,
    )
    .with_name("Minimum Payments Only");
    PayoffSimulator::default().simulate(&request)
}
