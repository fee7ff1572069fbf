//! Basic payoff simulation example.
//!
//! Simulates an avalanche plan for a small household, then shows how much
//! a one-time extra payment and a higher monthly budget change the outcome.

use chrono::NaiveDate;
use payoff_engine::core::debt::{Debt, DebtId, DebtKind};
use payoff_engine::core::strategy::Strategy;
use payoff_engine::optimization::comparison::compare_scenarios;
use payoff_engine::simulation::simulator::{minimum_payment_scenario, simulate};
use payoff_engine::simulation::what_if::{what_if, WhatIfChange, WhatIfRequest};
use rust_decimal_macros::dec;

fn main() {
    println!("╔══════════════════════════════════════════╗");
    println!("║  payoff-engine: Basic Payoff Example     ║");
    println!("╚══════════════════════════════════════════╝\n");

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).expect("valid date");
    let debts = vec![
        Debt::new("visa", "Visa", dec!(4_200), dec!(22.9), dec!(120))
            .with_kind(DebtKind::CreditCard { credit_limit: Some(dec!(6_000)) }),
        Debt::new("store", "Store Card", dec!(650), dec!(26.99), dec!(30)),
        Debt::new("car", "Car Loan", dec!(11_500), dec!(6.4), dec!(310))
            .with_kind(DebtKind::AutoLoan { term_months: Some(48) }),
    ];

    // --- Scenario 1: Minimums only ---
    println!("━━━ Scenario 1: Minimum Payments Only ━━━\n");
    let baseline = minimum_payment_scenario(&debts, start).expect("minimums pay off");
    println!("{}", baseline);

    // --- Scenario 2: Avalanche at $800/month ---
    println!("━━━ Scenario 2: Avalanche at $800/month ━━━\n");
    let plan = simulate(&debts, Strategy::Avalanche, dec!(800), start, None).expect("valid plan");
    println!("{}", plan);
    println!("First three months:");
    for row in plan.schedule().iter().take_while(|r| r.month <= 3) {
        println!(
            "  month {:>2}  {:<12} paid {:>8}  principal {:>8}  interest {:>6}  left {:>9}",
            row.month,
            row.debt_name,
            row.payment.round_dp(2),
            row.principal.round_dp(2),
            row.interest.round_dp(2),
            row.remaining_balance.round_dp(2)
        );
    }
    println!();
    println!("{}", compare_scenarios(&plan, &baseline));

    // --- Scenario 3: What-if ---
    println!("━━━ Scenario 3: What If? ━━━\n");
    let changes = [
        WhatIfChange::ExtraPayment {
            amount: dec!(1_500),
            month: 1,
            debt_id: Some(DebtId::new("visa")),
        },
        WhatIfChange::IncreasedMonthly { amount: dec!(1_000) },
        WhatIfChange::RateChange {
            debt_id: DebtId::new("visa"),
            new_apr: dec!(14.9),
        },
    ];
    for change in changes {
        let request = WhatIfRequest {
            strategy: Strategy::Avalanche,
            monthly_payment: dec!(800),
            start_date: start,
            change,
        };
        let scenario = what_if(&debts, &request).expect("valid what-if");
        let cmp = compare_scenarios(&scenario, &plan);
        println!("  {}", scenario.name());
        println!("    {}\n", cmp.summary());
    }
}
