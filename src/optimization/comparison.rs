use crate::simulation::scenario::PayoffScenario;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Differences between two scenarios, expressed as "what A saves over B".
///
/// Positive `interest_savings` / `time_savings_months` / `total_savings`
/// mean scenario A is cheaper or faster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    /// `B.total_interest - A.total_interest`
    pub interest_savings: Decimal,
    /// `B.total_months - A.total_months`
    pub time_savings_months: i64,
    /// `A.monthly_payment - B.monthly_payment`
    pub monthly_payment_difference: Decimal,
    /// `B.total_paid - A.total_paid`
    pub total_savings: Decimal,
}

impl ScenarioComparison {
    /// One-sentence verdict on which scenario comes out ahead.
    pub fn summary(&self) -> String {
        let interest = self.interest_savings.round_dp(2);
        let months = self.time_savings_months;
        if self.interest_savings > Decimal::ZERO && months > 0 {
            format!(
                "Scenario A saves ${:.2} in interest and pays off {} months faster.",
                interest, months
            )
        } else if self.interest_savings > Decimal::ZERO {
            format!(
                "Scenario A saves ${:.2} in interest but takes {} months longer.",
                interest,
                months.abs()
            )
        } else if months > 0 {
            format!(
                "Scenario A pays off {} months faster but costs ${:.2} more in interest.",
                months,
                interest.abs()
            )
        } else {
            "Scenario B is more cost-effective overall.".to_string()
        }
    }
}

/// Compare two scenarios.
pub fn compare_scenarios(a: &PayoffScenario, b: &PayoffScenario) -> ScenarioComparison {
    ScenarioComparison {
        interest_savings: b.total_interest() - a.total_interest(),
        time_savings_months: i64::from(b.total_months()) - i64::from(a.total_months()),
        monthly_payment_difference: a.monthly_payment() - b.monthly_payment(),
        total_savings: b.total_paid() - a.total_paid(),
    }
}

impl std::fmt::Display for ScenarioComparison {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Scenario Comparison ===")?;
        writeln!(f, "Interest Savings:   {}", self.interest_savings.round_dp(2))?;
        writeln!(f, "Time Savings:       {} months", self.time_savings_months)?;
        writeln!(f, "Payment Difference: {}", self.monthly_payment_difference.round_dp(2))?;
        writeln!(f, "Total Savings:      {}", self.total_savings.round_dp(2))?;
        writeln!(f, "{}", self.summary())
    }
}
