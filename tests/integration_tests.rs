use chrono::NaiveDate;
use payoff_engine::core::debt::{Debt, DebtId, DebtKind};
use payoff_engine::core::error::PayoffError;
use payoff_engine::core::profile::{PrimaryGoal, UserProfile};
use payoff_engine::core::strategy::Strategy;
use payoff_engine::optimization::comparison::compare_scenarios;
use payoff_engine::optimization::optimizer::{
    optimize_for_target_months, PaymentOptimizer, PlanGoal,
};
use payoff_engine::optimization::recommender::{recommend, recommend_for};
use payoff_engine::simulation::scenario::{PayoffScenario, ScenarioKind};
use payoff_engine::simulation::simulator::{minimum_payment_scenario, simulate};
use payoff_engine::simulation::what_if::{what_if, WhatIfChange, WhatIfRequest, CONSOLIDATED_ID};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn household() -> Vec<Debt> {
    vec![
        Debt::new("visa", "Visa", dec!(4_200), dec!(22.9), dec!(120))
            .with_kind(DebtKind::CreditCard {
                credit_limit: Some(dec!(6_000)),
            }),
        Debt::new("store", "Store Card", dec!(650), dec!(26.99), dec!(30)),
        Debt::new("car", "Car Loan", dec!(11_500), dec!(6.4), dec!(310)).with_kind(
            DebtKind::AutoLoan {
                term_months: Some(48),
            },
        ),
        Debt::new("medical", "Medical Bill", dec!(1_100), Decimal::ZERO, dec!(50)),
    ]
}

/// Full pipeline: simulate both strategies, compare, recommend, optimize.
#[test]
fn full_pipeline_household() {
    let debts = household();
    let payment = dec!(900);

    let snowball = simulate(&debts, Strategy::Snowball, payment, start(), None).unwrap();
    let avalanche = simulate(&debts, Strategy::Avalanche, payment, start(), None).unwrap();

    // Both plans repay the same principal, up to the payoff threshold per debt.
    let principal: Decimal = debts.iter().map(|d| d.balance()).sum();
    for scenario in [&snowball, &avalanche] {
        let repaid = scenario.total_paid() - scenario.total_interest();
        assert!((repaid - principal).abs() <= dec!(0.04));
        assert_eq!(scenario.debt_summaries().len(), debts.len());
    }

    // Avalanche never pays more interest than snowball here.
    let cmp = compare_scenarios(&avalanche, &snowball);
    assert!(cmp.interest_savings >= Decimal::ZERO);
    assert_eq!(cmp.monthly_payment_difference, Decimal::ZERO);

    let profile = UserProfile::new()
        .with_goal(PrimaryGoal::ReduceInterest)
        .with_available_payment(payment);
    let rec = recommend(&profile, &debts, &snowball, &avalanche);
    assert_eq!(rec.strategy, Strategy::Avalanche);
    assert_eq!(rec.interest_difference, snowball.total_interest() - avalanche.total_interest());
    assert!(rec.confidence_score > 0.0 && rec.confidence_score <= 100.0);

    let faster = optimize_for_target_months(
        &debts,
        Strategy::Avalanche,
        avalanche.total_months() / 2,
        start(),
    )
    .unwrap();
    assert!(faster.monthly_payment > payment);
}

#[test]
fn scenario_a_single_debt_terminates() {
    let debts = vec![Debt::new("a", "Loan", dec!(1200), dec!(12), dec!(100))];
    let scenario = simulate(&debts, Strategy::Snowball, dec!(100), start(), None).unwrap();
    assert!(scenario.total_months() < 600);
    assert!(scenario.total_interest() < dec!(100));
    assert_eq!(scenario.debt_summaries()[0].months_to_payoff, scenario.total_months());
}

#[test]
fn scenario_b_shortfall_is_exact() {
    let debts = vec![
        Debt::new("a", "A", dec!(500), dec!(10), dec!(20)),
        Debt::new("b", "B", dec!(5000), dec!(25), dec!(150)),
    ];
    let err = simulate(&debts, Strategy::Avalanche, dec!(169.50), start(), None).unwrap_err();
    match err {
        PayoffError::InsufficientPayment {
            payment,
            required,
            shortfall,
        } => {
            assert_eq!(payment, dec!(169.50));
            assert_eq!(required, dec!(170));
            assert_eq!(shortfall, dec!(0.50));
        }
        other => panic!("unexpected error: {other}"),
    }

    let message = PayoffError::insufficient(dec!(100), dec!(170)).to_string();
    assert!(message.contains("short by 70"));
}

#[test]
fn scenario_c_extra_payment_target() {
    let debts = vec![
        Debt::new("small", "Small", dec!(500), dec!(10), dec!(20)),
        Debt::new("large", "Large", dec!(5000), dec!(25), dec!(150)),
    ];

    let extra_target = |scenario: &PayoffScenario| -> DebtId {
        scenario
            .month(1)
            .find(|row| {
                let min = debts
                    .iter()
                    .find(|d| d.id() == &row.debt_id)
                    .unwrap()
                    .minimum_payment();
                row.payment > min
            })
            .map(|row| row.debt_id.clone())
            .unwrap()
    };

    let snowball = simulate(&debts, Strategy::Snowball, dec!(400), start(), None).unwrap();
    assert_eq!(extra_target(&snowball), DebtId::new("small"));

    let avalanche = simulate(&debts, Strategy::Avalanche, dec!(400), start(), None).unwrap();
    assert_eq!(extra_target(&avalanche), DebtId::new("large"));
}

#[test]
fn scenario_d_optimizer_finds_hundred_a_month() {
    let debts = vec![Debt::new("a", "Loan", dec!(1200), Decimal::ZERO, dec!(25))];
    let result = optimize_for_target_months(&debts, Strategy::Avalanche, 12, start()).unwrap();
    assert!(result.converged);
    assert!((result.monthly_payment - dec!(100)).abs() < dec!(10));
}

#[test]
fn custom_order_is_respected() {
    let debts = household();
    let order = vec![DebtId::new("car"), DebtId::new("medical")];
    let scenario = simulate(
        &debts,
        Strategy::Custom,
        dec!(900),
        start(),
        Some(order.as_slice()),
    )
    .unwrap();
    let ids: Vec<_> = scenario.month(1).map(|r| r.debt_id.as_str().to_string()).collect();
    // Listed ids first, the rest by ascending balance.
    assert_eq!(ids, vec!["car", "medical", "store", "visa"]);
}

#[test]
fn what_if_increased_payment_saves_interest() {
    let debts = household();
    let base = simulate(&debts, Strategy::Avalanche, dec!(700), start(), None).unwrap();
    let request = WhatIfRequest {
        strategy: Strategy::Avalanche,
        monthly_payment: dec!(700),
        start_date: start(),
        change: WhatIfChange::IncreasedMonthly { amount: dec!(1000) },
    };
    let scenario = what_if(&debts, &request).unwrap();
    assert_eq!(scenario.kind(), ScenarioKind::WhatIf);
    assert_eq!(scenario.name(), "Increased Payment: $1000.00/mo");

    let cmp = compare_scenarios(&scenario, &base);
    assert!(cmp.interest_savings > Decimal::ZERO);
    assert!(cmp.time_savings_months > 0);
}

#[test]
fn what_if_consolidation_merges_debts() {
    let debts = household();
    let request = WhatIfRequest {
        strategy: Strategy::Avalanche,
        monthly_payment: dec!(700),
        start_date: start(),
        change: WhatIfChange::Consolidation {
            apr: dec!(9.5),
            debt_ids: vec![DebtId::new("visa"), DebtId::new("store")],
        },
    };
    let scenario = what_if(&debts, &request).unwrap();
    assert_eq!(scenario.debt_summaries().len(), 3);
    let merged = scenario.summary_for(&DebtId::new(CONSOLIDATED_ID)).unwrap();
    assert_eq!(merged.original_balance, dec!(4_850));
}

#[test]
fn what_if_unknown_debt() {
    let request = WhatIfRequest {
        strategy: Strategy::Avalanche,
        monthly_payment: dec!(700),
        start_date: start(),
        change: WhatIfChange::RateChange {
            debt_id: DebtId::new("nope"),
            new_apr: dec!(5),
        },
    };
    assert_eq!(
        what_if(&household(), &request).unwrap_err(),
        PayoffError::DebtNotFound(DebtId::new("nope"))
    );
}

#[test]
fn optimized_plan_beats_minimums() {
    let debts = household();
    let baseline = minimum_payment_scenario(&debts, start()).unwrap();
    let plan = PaymentOptimizer::default()
        .optimize_plan(&debts, Strategy::Avalanche, PlanGoal::TargetMonths(24), start())
        .unwrap();
    assert!(plan.recommended_payment > baseline.monthly_payment());
    assert_eq!(
        plan.savings_vs_minimum,
        Some(baseline.total_interest() - plan.scenario.total_interest())
    );
}

#[test]
fn recommend_for_runs_both_strategies() {
    let debts = household();
    let profile = UserProfile::new()
        .with_goal(PrimaryGoal::AvoidDefault)
        .with_stress_level(5);
    let rec = recommend_for(&profile, &debts, dec!(700), start()).unwrap();
    // Two debts sit below the small-debt threshold.
    assert_eq!(rec.strategy, Strategy::Snowball);
}

#[test]
fn scenario_serializes_with_iso_dates_and_string_amounts() {
    let debts = vec![Debt::new("a", "Loan", dec!(300), Decimal::ZERO, dec!(100))];
    let scenario = simulate(&debts, Strategy::Snowball, dec!(100), start(), None).unwrap();
    let json = serde_json::to_value(&scenario).unwrap();

    assert_eq!(json["strategy"], "snowball");
    assert_eq!(json["kind"], "base");
    assert_eq!(json["start_date"], "2024-01-01");
    assert_eq!(json["payoff_date"], "2024-03-31");
    assert_eq!(json["schedule"][0]["payment_date"], "2024-01-31");
    assert_eq!(json["schedule"][0]["payment"], "100");
    assert_eq!(json["total_months"], 3);

    let back: PayoffScenario = serde_json::from_value(json).unwrap();
    assert_eq!(back, scenario);
}

#[test]
fn debts_load_from_json_numbers_or_strings() {
    let json = r#"[
        {"id":"a","name":"A","balance":"1500.50","apr":19.9,"minimum_payment":45},
        {"id":"b","name":"B","balance":800,"apr":"0","minimum_payment":"25",
         "is_delinquent":true,"kind":{"type":"student-loan","program":"federal"}}
    ]"#;
    let debts: Vec<Debt> = serde_json::from_str(json).unwrap();
    assert_eq!(debts[0].balance(), dec!(1500.50));
    assert_eq!(debts[0].apr(), dec!(19.9));
    assert!(debts[1].is_delinquent());
    assert_eq!(debts[1].kind().label(), "student-loan");
    assert!(simulate(&debts, Strategy::Avalanche, dec!(200), start(), None).is_ok());
}
