use crate::core::debt::DebtId;
use crate::core::strategy::Strategy;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How a scenario came about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ScenarioKind {
    #[default]
    Base,
    WhatIf,
    Optimized,
}

/// One payment against one debt in one month.
///
/// `principal + interest == payment` and `remaining_balance >= 0` hold for
/// every row the simulator produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleItem {
    /// 1-based month index.
    pub month: u32,
    pub payment_date: NaiveDate,
    pub debt_id: DebtId,
    pub debt_name: String,
    pub payment: Decimal,
    pub principal: Decimal,
    pub interest: Decimal,
    pub remaining_balance: Decimal,
}

/// Terminal record for a single debt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DebtPayoffSummary {
    pub debt_id: DebtId,
    pub debt_name: String,
    pub original_balance: Decimal,
    pub total_paid: Decimal,
    pub total_interest: Decimal,
    pub months_to_payoff: u32,
    pub payoff_date: NaiveDate,
}

/// A complete simulated payoff plan.
///
/// Built in one piece by the simulator and never modified afterwards,
/// apart from relabelling with [`PayoffScenario::with_name`] and
/// [`PayoffScenario::with_kind`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffScenario {
    scenario_id: Uuid,
    name: String,
    strategy: Strategy,
    kind: ScenarioKind,
    monthly_payment: Decimal,
    start_date: NaiveDate,
    total_months: u32,
    payoff_date: NaiveDate,
    total_interest: Decimal,
    total_paid: Decimal,
    schedule: Vec<ScheduleItem>,
    debt_summaries: Vec<DebtPayoffSummary>,
}

/// Parts of a scenario assembled by the simulator.
pub(crate) struct ScenarioParts {
    pub name: String,
    pub strategy: Strategy,
    pub monthly_payment: Decimal,
    pub start_date: NaiveDate,
    pub total_months: u32,
    pub payoff_date: NaiveDate,
    pub total_interest: Decimal,
    pub total_paid: Decimal,
    pub schedule: Vec<ScheduleItem>,
    pub debt_summaries: Vec<DebtPayoffSummary>,
}

impl PayoffScenario {
    pub(crate) fn from_parts(parts: ScenarioParts) -> Self {
        Self {
            scenario_id: Uuid::new_v4(),
            name: parts.name,
            strategy: parts.strategy,
            kind: ScenarioKind::Base,
            monthly_payment: parts.monthly_payment,
            start_date: parts.start_date,
            total_months: parts.total_months,
            payoff_date: parts.payoff_date,
            total_interest: parts.total_interest,
            total_paid: parts.total_paid,
            schedule: parts.schedule,
            debt_summaries: parts.debt_summaries,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_kind(mut self, kind: ScenarioKind) -> Self {
        self.kind = kind;
        self
    }

    /// Replace the generated id (useful for testing / determinism).
    pub fn with_id(mut self, id: Uuid) -> Self {
        self.scenario_id = id;
        self
    }

    // --- Accessors ---

    pub fn scenario_id(&self) -> Uuid {
        self.scenario_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    pub fn kind(&self) -> ScenarioKind {
        self.kind
    }

    pub fn monthly_payment(&self) -> Decimal {
        self.monthly_payment
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn total_months(&self) -> u32 {
        self.total_months
    }

    pub fn payoff_date(&self) -> NaiveDate {
        self.payoff_date
    }

    pub fn total_interest(&self) -> Decimal {
        self.total_interest
    }

    pub fn total_paid(&self) -> Decimal {
        self.total_paid
    }

    pub fn schedule(&self) -> &[ScheduleItem] {
        &self.schedule
    }

    pub fn debt_summaries(&self) -> &[DebtPayoffSummary] {
        &self.debt_summaries
    }

    /// Rows for a single month, in strategy order.
    pub fn month(&self, month: u32) -> impl Iterator<Item = &ScheduleItem> {
        self.schedule.iter().filter(move |item| item.month == month)
    }

    pub fn summary_for(&self, debt_id: &DebtId) -> Option<&DebtPayoffSummary> {
        self.debt_summaries.iter().find(|s| &s.debt_id == debt_id)
    }

    /// Average interest paid per month.
    pub fn average_monthly_interest(&self) -> Decimal {
        if self.total_months == 0 {
            return Decimal::ZERO;
        }
        self.total_interest / Decimal::from(self.total_months)
    }

    /// Interest as a percentage of principal repaid.
    pub fn interest_to_principal_ratio(&self) -> Decimal {
        let principal = self.total_paid - self.total_interest;
        if principal == Decimal::ZERO {
            return Decimal::ZERO;
        }
        self.total_interest / principal * Decimal::ONE_HUNDRED
    }
}

impl std::fmt::Display for PayoffScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== {} ===", self.name)?;
        writeln!(f, "Strategy:        {}", self.strategy)?;
        writeln!(f, "Monthly Payment: {}", self.monthly_payment.round_dp(2))?;
        writeln!(f, "Start Date:      {}", self.start_date)?;
        writeln!(f, "Total Months:    {}", self.total_months)?;
        writeln!(f, "Payoff Date:     {}", self.payoff_date)?;
        writeln!(f, "Total Interest:  {}", self.total_interest.round_dp(2))?;
        writeln!(f, "Total Paid:      {}", self.total_paid.round_dp(2))?;

        writeln!(f, "\n--- Debts ---")?;
        for summary in &self.debt_summaries {
            writeln!(
                f,
                "  {:<20} {:>12} paid off in month {:>3} ({})  interest {}",
                summary.debt_name,
                summary.original_balance.round_dp(2),
                summary.months_to_payoff,
                summary.payoff_date,
                summary.total_interest.round_dp(2)
            )?;
        }
        Ok(())
    }
}
