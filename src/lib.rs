//! # payoff-engine
//!
//! Debt payoff simulation and strategy recommendation engine.
//!
//! Given a set of debts and a monthly budget, this engine simulates a
//! month-by-month payoff plan, compares plans, searches for the payment that
//! meets a target horizon, and recommends a strategy for a user profile.
//!
//! ## Architecture
//!
//! - **core**: Foundational types: debts, strategies, interest, user profiles, errors
//! - **simulation**: The payoff simulator, scenarios, what-if analysis, portfolio generation
//! - **optimization**: Scenario comparison, payment optimization, strategy recommendation

pub mod core;
pub mod optimization;
pub mod simulation;

/// Convenience re-exports for common usage.
pub mod prelude {
    pub use crate::core::debt::{Debt, DebtId, DebtKind};
    pub use crate::core::error::PayoffError;
    pub use crate::core::profile::{PrimaryGoal, UserProfile};
    pub use crate::core::strategy::Strategy;
    pub use crate::optimization::comparison::{compare_scenarios, ScenarioComparison};
    pub use crate::optimization::optimizer::{PaymentOptimizer, PlanGoal};
    pub use crate::optimization::recommender::{StrategyRecommendation, StrategyRecommender};
    pub use crate::simulation::scenario::{PayoffScenario, ScheduleItem};
    pub use crate::simulation::simulator::{simulate, PayoffSimulator, SimulationRequest};
}
