//! What-if analysis: re-run the simulator against a modified debt set or
//! payment and label the result.

use crate::core::debt::{Debt, DebtId, DebtKind, MAX_AMOUNT};
use crate::core::error::PayoffError;
use crate::core::strategy::{order_debts, Strategy};
use crate::simulation::scenario::{PayoffScenario, ScenarioKind};
use crate::simulation::simulator::{validate_debts, PayoffSimulator, SimulationRequest};
use chrono::NaiveDate;
use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Id given to the loan produced by a consolidation.
pub const CONSOLIDATED_ID: &str = "consolidated";

/// The hypothetical change to evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WhatIfChange {
    /// One-time lump sum against a debt (or the first debt in strategy
    /// order when `debt_id` is absent). `month` only labels the scenario;
    /// the payment is applied to the opening balance.
    ExtraPayment {
        amount: Decimal,
        month: u32,
        #[serde(default)]
        debt_id: Option<DebtId>,
    },
    /// A different monthly budget.
    IncreasedMonthly { amount: Decimal },
    /// Fold several debts into one loan at `apr`.
    Consolidation { apr: Decimal, debt_ids: Vec<DebtId> },
    /// Move a balance to a new APR, optionally paying a percentage fee.
    BalanceTransfer {
        debt_id: DebtId,
        new_apr: Decimal,
        #[serde(default)]
        fee_percent: Option<Decimal>,
    },
    /// A debt's APR changes.
    RateChange { debt_id: DebtId, new_apr: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhatIfRequest {
    pub strategy: Strategy,
    pub monthly_payment: Decimal,
    pub start_date: NaiveDate,
    pub change: WhatIfChange,
}

/// Evaluate a what-if change with the default simulator.
pub fn what_if(debts: &[Debt], request: &WhatIfRequest) -> Result<PayoffScenario, PayoffError> {
    what_if_with(&PayoffSimulator::default(), debts, request)
}

/// Evaluate a what-if change with a caller-configured simulator.
///
/// Returns a [`ScenarioKind::WhatIf`] scenario named after the change.
pub fn what_if_with(
    simulator: &PayoffSimulator,
    debts: &[Debt],
    request: &WhatIfRequest,
) -> Result<PayoffScenario, PayoffError> {
    validate_debts(debts)?;
    let (modified, payment, name) = apply_change(debts, request)?;
    debug!("what-if '{}' over {} debts", name, modified.len());
    let sim_request =
        SimulationRequest::new(&modified, request.strategy, payment, request.start_date)
            .with_name(name);
    Ok(simulator
        .simulate(&sim_request)?
        .with_kind(ScenarioKind::WhatIf))
}

fn apply_change(
    debts: &[Debt],
    request: &WhatIfRequest,
) -> Result<(Vec<Debt>, Decimal, String), PayoffError> {
    let payment = request.monthly_payment;
    match &request.change {
        WhatIfChange::ExtraPayment {
            amount,
            month,
            debt_id,
        } => {
            if *amount <= Decimal::ZERO || *month == 0 {
                return Err(PayoffError::InvalidParameter(
                    "extra payment needs a positive amount and a month of at least 1".into(),
                ));
            }
            let target = match debt_id {
                Some(id) => find(debts, id)?.id().clone(),
                None => order_debts(debts, request.strategy, None)
                    .first()
                    .map(|d| d.id().clone())
                    .ok_or(PayoffError::NoDebts)?,
            };
            let modified: Vec<Debt> = debts
                .iter()
                .filter_map(|d| {
                    if d.id() != &target {
                        return Some(d.clone());
                    }
                    let reduced = d.balance() - *amount;
                    (reduced > Decimal::ZERO).then(|| d.clone().with_balance(reduced))
                })
                .collect();
            if modified.is_empty() {
                return Err(PayoffError::InvalidParameter(
                    "extra payment clears every debt".into(),
                ));
            }
            let name = format!("Extra Payment: ${:.2} in Month {}", amount, month);
            Ok((modified, payment, name))
        }
        WhatIfChange::IncreasedMonthly { amount } => {
            if *amount <= Decimal::ZERO {
                return Err(PayoffError::InvalidParameter(
                    "increased payment must be positive".into(),
                ));
            }
            let name = format!("Increased Payment: ${:.2}/mo", amount);
            Ok((debts.to_vec(), *amount, name))
        }
        WhatIfChange::Consolidation { apr, debt_ids } => {
            check_apr(*apr)?;
            if debt_ids.is_empty() {
                return Err(PayoffError::InvalidParameter(
                    "consolidation needs at least one debt id".into(),
                ));
            }
            let (merged, mut others): (Vec<Debt>, Vec<Debt>) = debts
                .iter()
                .cloned()
                .partition(|d| debt_ids.contains(d.id()));
            if merged.is_empty() {
                return Err(PayoffError::DebtNotFound(debt_ids[0].clone()));
            }
            let balance: Decimal = merged.iter().map(|d| d.balance()).sum();
            let minimum: Decimal = merged.iter().map(|d| d.minimum_payment()).sum();
            if balance > MAX_AMOUNT || minimum > MAX_AMOUNT {
                return Err(PayoffError::InvalidParameter(format!(
                    "consolidated loan would exceed {MAX_AMOUNT}"
                )));
            }
            others.push(
                Debt::new(CONSOLIDATED_ID, "Consolidated Loan", balance, *apr, minimum)
                    .with_kind(DebtKind::PersonalLoan { term_months: None }),
            );
            let name = format!("Consolidation at {:.2}% APR", apr);
            Ok((others, payment, name))
        }
        WhatIfChange::BalanceTransfer {
            debt_id,
            new_apr,
            fee_percent,
        } => {
            check_apr(*new_apr)?;
            let current = find(debts, debt_id)?.balance();
            let fee_rate = fee_percent.unwrap_or(Decimal::ZERO);
            if fee_rate < Decimal::ZERO {
                return Err(PayoffError::InvalidParameter(
                    "balance transfer fee cannot be negative".into(),
                ));
            }
            let balance = current
                .checked_mul(fee_rate)
                .and_then(|fee| current.checked_add(fee / Decimal::ONE_HUNDRED))
                .filter(|balance| *balance <= MAX_AMOUNT)
                .ok_or_else(|| {
                    PayoffError::InvalidParameter(format!(
                        "balance after a {fee_rate}% fee would exceed {MAX_AMOUNT}"
                    ))
                })?;
            let modified =
                replace(debts, debt_id, |d| d.with_balance(balance).with_apr(*new_apr));
            let name = format!("Balance Transfer to {:.2}% APR", new_apr);
            Ok((modified, payment, name))
        }
        WhatIfChange::RateChange { debt_id, new_apr } => {
            check_apr(*new_apr)?;
            let old_apr = find(debts, debt_id)?.apr();
            let modified = replace(debts, debt_id, |d| d.with_apr(*new_apr));
            let name = format!("Rate Change: {:.2}% → {:.2}%", old_apr, new_apr);
            Ok((modified, payment, name))
        }
    }
}

fn find<'a>(debts: &'a [Debt], id: &DebtId) -> Result<&'a Debt, PayoffError> {
    debts
        .iter()
        .find(|d| d.id() == id)
        .ok_or_else(|| PayoffError::DebtNotFound(id.clone()))
}

fn replace(debts: &[Debt], id: &DebtId, f: impl Fn(Debt) -> Debt) -> Vec<Debt> {
    debts
        .iter()
        .map(|d| if d.id() == id { f(d.clone()) } else { d.clone() })
        .collect()
}

fn check_apr(apr: Decimal) -> Result<(), PayoffError> {
    if apr < Decimal::ZERO || apr > Decimal::ONE_HUNDRED {
        return Err(PayoffError::InvalidParameter(format!(
            "APR must be between 0 and 100, got {apr}"
        )));
    }
    Ok(())
}
