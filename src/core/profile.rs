use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Calmest self-reported stress level.
pub const MIN_STRESS: u8 = 1;
/// Most stressed self-reported stress level.
pub const MAX_STRESS: u8 = 5;

/// What the user most wants out of a repayment plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PrimaryGoal {
    PayFaster,
    ReduceInterest,
    LowerPayment,
    AvoidDefault,
}

impl PrimaryGoal {
    pub fn as_str(&self) -> &'static str {
        match self {
            PrimaryGoal::PayFaster => "pay-faster",
            PrimaryGoal::ReduceInterest => "reduce-interest",
            PrimaryGoal::LowerPayment => "lower-payment",
            PrimaryGoal::AvoidDefault => "avoid-default",
        }
    }
}

impl fmt::Display for PrimaryGoal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PrimaryGoal {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pay-faster" => Ok(PrimaryGoal::PayFaster),
            "reduce-interest" => Ok(PrimaryGoal::ReduceInterest),
            "lower-payment" => Ok(PrimaryGoal::LowerPayment),
            "avoid-default" => Ok(PrimaryGoal::AvoidDefault),
            other => Err(format!("unknown goal: {other}")),
        }
    }
}

/// Profile signals consumed by the strategy recommender.
///
/// Every field is optional; the recommender resolves gaps through its
/// [`RecommenderConfig`](crate::optimization::recommender::RecommenderConfig).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub primary_goal: Option<PrimaryGoal>,
    /// Self-reported stress, 1 (calm) to 5 (overwhelmed).
    #[serde(default)]
    pub stress_level: Option<u8>,
    /// Money available for debt repayment each month.
    #[serde(default)]
    pub available_monthly_payment: Option<Decimal>,
    /// Fraction of the profile the user has filled in, 0.0 to 1.0.
    #[serde(default)]
    pub profile_completeness: Option<f64>,
}

impl UserProfile {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_goal(mut self, goal: PrimaryGoal) -> Self {
        self.primary_goal = Some(goal);
        self
    }

    /// Set the stress level, clamped to `MIN_STRESS..=MAX_STRESS`.
    pub fn with_stress_level(mut self, level: u8) -> Self {
        self.stress_level = Some(level.clamp(MIN_STRESS, MAX_STRESS));
        self
    }

    pub fn with_available_payment(mut self, amount: Decimal) -> Self {
        self.available_monthly_payment = Some(amount);
        self
    }

    pub fn with_completeness(mut self, completeness: f64) -> Self {
        self.profile_completeness = Some(completeness);
        self
    }
}
