//! Strategy recommendation.
//!
//! Picks snowball or avalanche from the user's primary goal and a few
//! signals derived from the two simulated scenarios, then scores how much
//! the recommendation should be trusted.
//!
//! # Decision table
//!
//! | Goal              | Recommendation                                                                  |
//! |-------------------|---------------------------------------------------------------------------------|
//! | `pay-faster`      | avalanche if ≥3 months faster; else snowball if stress ≥4 and ≥2 small debts; else avalanche |
//! | `reduce-interest` | avalanche                                                                       |
//! | `lower-payment`   | snowball if ≥2 small debts, else avalanche                                      |
//! | `avoid-default`   | snowball if ≥1 small debt, else avalanche                                       |
//! | none              | avalanche                                                                       |

use crate::core::debt::Debt;
use crate::core::error::PayoffError;
use crate::core::profile::{PrimaryGoal, UserProfile, MAX_STRESS, MIN_STRESS};
use crate::core::strategy::Strategy;
use crate::simulation::scenario::PayoffScenario;
use crate::simulation::simulator::{PayoffSimulator, SimulationRequest};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// Thresholds and defaults used by the recommender.
#[derive(Debug, Clone)]
pub struct RecommenderConfig {
    /// Debts below this balance count as "small".
    pub small_debt_threshold: Decimal,
    /// Stress level assumed when the profile has none.
    pub default_stress_level: u8,
    /// Completeness assumed when the profile has none. Lower it to make
    /// unknown profiles cost confidence.
    pub default_completeness: f64,
}

impl Default for RecommenderConfig {
    fn default() -> Self {
        Self {
            small_debt_threshold: dec!(2000),
            default_stress_level: 3,
            default_completeness: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyRecommendation {
    pub strategy: Strategy,
    pub rationale: String,
    /// 0 to 100.
    pub confidence_score: f64,
    pub factors: Vec<String>,
    /// `snowball.total_interest - avalanche.total_interest`
    pub interest_difference: Decimal,
    /// `snowball.total_months - avalanche.total_months`
    pub time_difference_months: i64,
}

/// Profile-level confidence, before comparing strategies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfidenceReport {
    pub confidence_score: f64,
    pub profile_completeness: f64,
    pub debt_count: usize,
    pub has_delinquent: bool,
    pub cash_flow_ratio: f64,
    pub factors: Vec<String>,
}

/// Signals shared by the decision table and the confidence score.
struct Signals {
    interest_savings: Decimal,
    time_difference: i64,
    small_debts: usize,
    stress: u8,
}

#[derive(Debug, Clone, Default)]
pub struct StrategyRecommender {
    config: RecommenderConfig,
}

impl StrategyRecommender {
    pub fn new(config: RecommenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RecommenderConfig {
        &self.config
    }

    /// Recommend a strategy given already-simulated snowball and avalanche
    /// scenarios over `debts`.
    pub fn recommend(
        &self,
        profile: &UserProfile,
        debts: &[Debt],
        snowball: &PayoffScenario,
        avalanche: &PayoffScenario,
    ) -> StrategyRecommendation {
        let signals = Signals {
            interest_savings: snowball.total_interest() - avalanche.total_interest(),
            time_difference: i64::from(snowball.total_months())
                - i64::from(avalanche.total_months()),
            small_debts: debts
                .iter()
                .filter(|d| d.balance() < self.config.small_debt_threshold)
                .count(),
            stress: profile
                .stress_level
                .unwrap_or(self.config.default_stress_level)
                .clamp(MIN_STRESS, MAX_STRESS),
        };

        let (strategy, rationale, factors) = decide(profile.primary_goal, &signals);
        let confidence_score = self.adjust_for_spread(
            self.base_confidence(profile, debts),
            signals.interest_savings,
            signals.time_difference,
        );

        StrategyRecommendation {
            strategy,
            rationale,
            confidence_score,
            factors,
            interest_difference: signals.interest_savings,
            time_difference_months: signals.time_difference,
        }
    }

    /// Simulate both strategies at `monthly_payment` and recommend one.
    pub fn recommend_for(
        &self,
        simulator: &PayoffSimulator,
        profile: &UserProfile,
        debts: &[Debt],
        monthly_payment: Decimal,
        start_date: NaiveDate,
    ) -> Result<StrategyRecommendation, PayoffError> {
        let snowball = simulator.simulate(&SimulationRequest::new(
            debts,
            Strategy::Snowball,
            monthly_payment,
            start_date,
        ))?;
        let avalanche = simulator.simulate(&SimulationRequest::new(
            debts,
            Strategy::Avalanche,
            monthly_payment,
            start_date,
        ))?;
        Ok(self.recommend(profile, debts, &snowball, &avalanche))
    }

    /// Profile-level confidence with the factors that lowered it.
    pub fn confidence_report(&self, profile: &UserProfile, debts: &[Debt]) -> ConfidenceReport {
        let completeness = self.completeness(profile);
        let has_delinquent = debts.iter().any(|d| d.is_delinquent());
        let cash_flow_ratio = cash_flow_ratio(profile, debts);

        let mut factors = Vec::new();
        if completeness < 0.7 {
            factors.push("Incomplete profile information".to_string());
        }
        if debts.len() > 10 {
            factors.push("High number of debts increases complexity".to_string());
        }
        if has_delinquent {
            factors.push("Delinquent debts present".to_string());
        }
        if cash_flow_ratio < 1.2 {
            factors.push("Limited cash flow for debt repayment".to_string());
        }
        if factors.is_empty() {
            factors.push("Strong profile with complete information".to_string());
        }

        ConfidenceReport {
            confidence_score: self.base_confidence(profile, debts),
            profile_completeness: completeness,
            debt_count: debts.len(),
            has_delinquent,
            cash_flow_ratio,
            factors,
        }
    }

    fn completeness(&self, profile: &UserProfile) -> f64 {
        profile
            .profile_completeness
            .unwrap_or(self.config.default_completeness)
            .clamp(0.0, 1.0)
    }

    fn base_confidence(&self, profile: &UserProfile, debts: &[Debt]) -> f64 {
        confidence_score(
            self.completeness(profile),
            debts.len(),
            debts.iter().any(|d| d.is_delinquent()),
            cash_flow_ratio(profile, debts),
        )
    }

    fn adjust_for_spread(&self, score: f64, interest_diff: Decimal, time_diff: i64) -> f64 {
        let interest_diff = interest_diff.abs();
        let time_diff = time_diff.abs();
        let mut score = score;
        if interest_diff < dec!(100) && time_diff < 3 {
            score *= 0.95;
        }
        if interest_diff > dec!(1000) || time_diff > 12 {
            score *= 1.05;
        }
        score.clamp(0.0, 100.0)
    }
}

fn decide(goal: Option<PrimaryGoal>, s: &Signals) -> (Strategy, String, Vec<String>) {
    let savings = s.interest_savings.abs().round_dp(2);
    let months = s.time_difference.abs();
    match goal {
        Some(PrimaryGoal::PayFaster) => {
            if s.time_difference >= 3 {
                (
                    Strategy::Avalanche,
                    format!(
                        "Avalanche strategy aligns with your goal to pay off debt as quickly as possible, saving you {} months.",
                        months
                    ),
                    vec![
                        "Avalanche strategy pays off debt faster".to_string(),
                        format!("Saves {} months compared to snowball", months),
                    ],
                )
            } else if s.stress >= 4 && s.small_debts >= 2 {
                (
                    Strategy::Snowball,
                    "Snowball strategy provides psychological wins by eliminating debts quickly, which is important given your high stress level.".to_string(),
                    vec![
                        "High stress level benefits from quick wins".to_string(),
                        format!("{} small debts can be eliminated quickly", s.small_debts),
                    ],
                )
            } else {
                (
                    Strategy::Avalanche,
                    format!(
                        "Avalanche strategy saves ${:.2} in interest with similar payoff time.",
                        savings
                    ),
                    vec![
                        "Minimal time difference between strategies".to_string(),
                        format!("Avalanche saves ${:.2} in interest", savings),
                    ],
                )
            }
        }
        Some(PrimaryGoal::ReduceInterest) => (
            Strategy::Avalanche,
            format!(
                "Avalanche strategy directly addresses your goal by saving ${:.2} in interest charges.",
                savings
            ),
            vec![
                "Avalanche strategy minimizes total interest paid".to_string(),
                format!("Saves ${:.2} compared to snowball", savings),
            ],
        ),
        Some(PrimaryGoal::LowerPayment) => {
            if s.small_debts >= 2 {
                (
                    Strategy::Snowball,
                    format!(
                        "Snowball strategy eliminates {} small debts quickly, reducing your monthly payment obligations sooner.",
                        s.small_debts
                    ),
                    vec![
                        "Multiple small debts can be eliminated quickly".to_string(),
                        "Quick wins reduce monthly obligations faster".to_string(),
                    ],
                )
            } else {
                (
                    Strategy::Avalanche,
                    "Avalanche strategy is more cost-effective when there aren't many small debts to eliminate.".to_string(),
                    vec![
                        "Few small debts to eliminate".to_string(),
                        format!("Avalanche saves ${:.2} in interest", savings),
                    ],
                )
            }
        }
        Some(PrimaryGoal::AvoidDefault) => {
            let factors = vec![
                "High-stress situation benefits from momentum".to_string(),
                "Quick wins build confidence and motivation".to_string(),
            ];
            if s.small_debts >= 1 {
                (
                    Strategy::Snowball,
                    "Snowball strategy provides quick wins and builds momentum, which is crucial when avoiding default.".to_string(),
                    factors,
                )
            } else {
                (
                    Strategy::Avalanche,
                    "Focus on highest-rate debts to minimize total cost while building a sustainable payment plan.".to_string(),
                    factors,
                )
            }
        }
        None => (
            Strategy::Avalanche,
            "Avalanche strategy minimizes total interest and is mathematically optimal for most situations.".to_string(),
            vec!["Avalanche strategy is mathematically optimal".to_string()],
        ),
    }
}

/// Available payment divided by total minimums; 1.0 when either is unknown,
/// zero or out of range.
fn cash_flow_ratio(profile: &UserProfile, debts: &[Debt]) -> f64 {
    let minimums = debts
        .iter()
        .try_fold(Decimal::ZERO, |sum, d| sum.checked_add(d.minimum_payment()));
    match (profile.available_monthly_payment, minimums) {
        (Some(available), Some(minimums))
            if available > Decimal::ZERO && minimums > Decimal::ZERO =>
        {
            available
                .checked_div(minimums)
                .and_then(|ratio| ratio.to_f64())
                .unwrap_or(1.0)
        }
        _ => 1.0,
    }
}

/// Profile-level confidence score, 0 to 100.
///
/// `profile_completeness` is a 0..=1 fraction; `cash_flow_ratio` is
/// available payment over total minimums.
pub fn confidence_score(
    profile_completeness: f64,
    debt_count: usize,
    has_delinquent: bool,
    cash_flow_ratio: f64,
) -> f64 {
    let mut score = 100.0 * profile_completeness;

    if debt_count > 10 {
        score *= 0.8;
    } else if debt_count > 5 {
        score *= 0.9;
    }

    if has_delinquent {
        score *= 0.7;
    }

    if cash_flow_ratio < 1.1 {
        score *= 0.8;
    } else if cash_flow_ratio < 1.2 {
        score *= 0.9;
    }

    score.clamp(0.0, 100.0)
}

/// Recommend with the default configuration.
pub fn recommend(
    profile: &UserProfile,
    debts: &[Debt],
    snowball: &PayoffScenario,
    avalanche: &PayoffScenario,
) -> StrategyRecommendation {
    StrategyRecommender::default().recommend(profile, debts, snowball, avalanche)
}

/// Simulate both strategies and recommend, all with default configuration.
pub fn recommend_for(
    profile: &UserProfile,
    debts: &[Debt],
    monthly_payment: Decimal,
    start_date: NaiveDate,
) -> Result<StrategyRecommendation, PayoffError> {
    StrategyRecommender::default().recommend_for(
        &PayoffSimulator::default(),
        profile,
        debts,
        monthly_payment,
        start_date,
    )
}

/// Profile-level confidence with the default configuration.
pub fn confidence_report(profile: &UserProfile, debts: &[Debt]) -> ConfidenceReport {
    StrategyRecommender::default().confidence_report(profile, debts)
}
