//! Snowball vs. avalanche, plus a recommendation for three different users.

use chrono::NaiveDate;
use payoff_engine::core::debt::Debt;
use payoff_engine::core::profile::{PrimaryGoal, UserProfile};
use payoff_engine::core::strategy::Strategy;
use payoff_engine::optimization::comparison::compare_scenarios;
use payoff_engine::optimization::optimizer::{PaymentOptimizer, PlanGoal};
use payoff_engine::optimization::recommender::StrategyRecommender;
use payoff_engine::simulation::simulator::simulate;
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════════╗");
    println!("║  payoff-engine: Strategy Comparison Example  ║");
    println!("╚══════════════════════════════════════════════╝\n");

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let debts = vec![
        Debt::new("medical", "Medical Bill", dec!(900), dec!(0), dec!(40)),
        Debt::new("store", "Store Card", dec!(1_400), dec!(24.99), dec!(45)),
        Debt::new("visa", "Visa", dec!(7_800), dec!(27.4), dec!(210)),
        Debt::new("student", "Student Loan", dec!(18_000), dec!(5.5), dec!(200)),
    ];
    let payment = dec!(900);

    println!("━━━ Snowball vs. Avalanche at ${}/month ━━━\n", payment);
    let snowball = simulate(&debts, Strategy::Snowball, payment, start, None).expect("valid plan");
    let avalanche =
        simulate(&debts, Strategy::Avalanche, payment, start, None).expect("valid plan");
    println!("{}", snowball);
    println!("{}", avalanche);
    println!("  (A = avalanche, B = snowball)");
    println!("{}", compare_scenarios(&avalanche, &snowball));

    println!("━━━ Recommendations ━━━\n");
    let recommender = StrategyRecommender::default();
    let users = [
        ("Wants lowest cost", UserProfile::new().with_goal(PrimaryGoal::ReduceInterest)),
        (
            "Stressed, wants it gone",
            UserProfile::new()
                .with_goal(PrimaryGoal::PayFaster)
                .with_stress_level(5),
        ),
        (
            "Worried about default",
            UserProfile::new()
                .with_goal(PrimaryGoal::AvoidDefault)
                .with_available_payment(dec!(520))
                .with_completeness(0.6),
        ),
    ];
    for (label, profile) in users {
        let rec = recommender.recommend(&profile, &debts, &snowball, &avalanche);
        println!("  {}: {} ({:.0}% confidence)", label, rec.strategy, rec.confidence_score);
        println!("    {}", rec.rationale);
        for factor in &rec.factors {
            println!("    - {}", factor);
        }
        println!();
    }

    println!("━━━ Debt-Free in 3 Years ━━━\n");
    let plan = PaymentOptimizer::default()
        .optimize_plan(&debts, Strategy::Avalanche, PlanGoal::TargetMonths(36), start)
        .expect("valid plan");
    println!("  {}", plan.rationale);
    if let Some(savings) = plan.savings_vs_minimum {
        println!(
            "  Saves ${} in interest compared with paying only the minimums.",
            savings.round_dp(2)
        );
    }
}
