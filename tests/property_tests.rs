use chrono::NaiveDate;
use payoff_engine::core::debt::{total_balance, total_minimums, Debt, DebtId};
use payoff_engine::core::profile::{PrimaryGoal, UserProfile};
use payoff_engine::core::strategy::{order_debts, Strategy as PayoffStrategy};
use payoff_engine::optimization::recommender::{confidence_score, recommend};
use payoff_engine::simulation::simulator::simulate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Generate a debt whose minimum always outpaces its monthly interest.
///
/// APR tops out at 30% (2.5% a month) while the minimum is at least 3% of
/// the balance, so every generated portfolio terminates.
fn arb_debt(index: usize) -> impl Strategy<Value = Debt> {
    (10_000i64..2_000_000i64, 0i64..3_000i64).prop_map(move |(cents, apr_bp)| {
        let balance = Decimal::new(cents, 2);
        let apr = Decimal::new(apr_bp, 2);
        let minimum = (balance * dec!(0.03)).round_dp(2).max(dec!(25));
        Debt::new(format!("D{}", index), format!("Debt {}", index), balance, apr, minimum)
    })
}

/// Generate a portfolio of 1..6 debts with unique ids.
fn arb_debts() -> impl Strategy<Value = Vec<Debt>> {
    (1usize..6).prop_flat_map(|n| (0..n).map(arb_debt).collect::<Vec<_>>())
}

/// Generate a payment strategy (custom falls back to snowball order).
fn arb_strategy() -> impl Strategy<Value = PayoffStrategy> {
    prop::sample::select(vec![
        PayoffStrategy::Snowball,
        PayoffStrategy::Avalanche,
        PayoffStrategy::Custom,
    ])
}

/// Generate an amount paid on top of the minimums (0 to 2,000).
fn arb_extra() -> impl Strategy<Value = Decimal> {
    (0i64..200_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    // ===================================================================
    // INVARIANT 1: Every schedule row splits exactly into principal and
    // interest, and never shows a negative balance.
    // ===================================================================
    #[test]
    fn rows_split_into_principal_and_interest(
        debts in arb_debts(),
        strategy in arb_strategy(),
        extra in arb_extra(),
    ) {
        let payment = total_minimums(&debts) + extra;
        let scenario = simulate(&debts, strategy, payment, start(), None).unwrap();
        for row in scenario.schedule() {
            prop_assert_eq!(row.principal + row.interest, row.payment);
            prop_assert!(row.remaining_balance >= Decimal::ZERO);
            prop_assert!(row.payment > Decimal::ZERO);
        }
    }

    // ===================================================================
    // INVARIANT 2: Principal is conserved.
    //
    // Total paid minus total interest equals the sum of opening balances,
    // up to the payoff threshold written off per debt.
    // ===================================================================
    #[test]
    fn principal_is_conserved(
        debts in arb_debts(),
        strategy in arb_strategy(),
        extra in arb_extra(),
    ) {
        let payment = total_minimums(&debts) + extra;
        let scenario = simulate(&debts, strategy, payment, start(), None).unwrap();
        let repaid = scenario.total_paid() - scenario.total_interest();
        let tolerance = dec!(0.01) * Decimal::from(debts.len());
        prop_assert!(
            (repaid - total_balance(&debts)).abs() <= tolerance,
            "repaid {} vs balances {}", repaid, total_balance(&debts)
        );
    }

    // ===================================================================
    // INVARIANT 3: Every debt ends at zero, in the month its summary says.
    // ===================================================================
    #[test]
    fn every_debt_ends_at_zero(
        debts in arb_debts(),
        strategy in arb_strategy(),
        extra in arb_extra(),
    ) {
        let payment = total_minimums(&debts) + extra;
        let scenario = simulate(&debts, strategy, payment, start(), None).unwrap();
        for summary in scenario.debt_summaries() {
            let last = scenario
                .schedule()
                .iter()
                .rev()
                .find(|row| row.debt_id == summary.debt_id)
                .unwrap();
            prop_assert_eq!(last.remaining_balance, Decimal::ZERO);
            prop_assert_eq!(last.month, summary.months_to_payoff);
            prop_assert!(summary.months_to_payoff <= scenario.total_months());
        }
    }

    // ===================================================================
    // INVARIANT 4: Simulation is deterministic.
    // ===================================================================
    #[test]
    fn simulation_is_deterministic(
        debts in arb_debts(),
        strategy in arb_strategy(),
        extra in arb_extra(),
    ) {
        let payment = total_minimums(&debts) + extra;
        let a = simulate(&debts, strategy, payment, start(), None).unwrap();
        let b = simulate(&debts, strategy, payment, start(), None).unwrap();
        prop_assert_eq!(a.schedule(), b.schedule());
        prop_assert_eq!(a.debt_summaries(), b.debt_summaries());
        prop_assert_eq!(a.total_interest(), b.total_interest());
    }

    // ===================================================================
    // INVARIANT 5: Paying more never takes longer or costs more interest.
    // ===================================================================
    #[test]
    fn more_payment_never_hurts(
        debts in arb_debts(),
        strategy in arb_strategy(),
        extra in arb_extra(),
        bump in 1i64..1_000i64,
    ) {
        let payment = total_minimums(&debts) + extra;
        let lower = simulate(&debts, strategy, payment, start(), None).unwrap();
        let higher =
            simulate(&debts, strategy, payment + Decimal::from(bump), start(), None).unwrap();
        prop_assert!(higher.total_months() <= lower.total_months());
        prop_assert!(higher.total_interest() <= lower.total_interest());
    }

    // ===================================================================
    // INVARIANT 6: Ordering is a permutation of the input.
    // ===================================================================
    #[test]
    fn ordering_is_permutation(debts in arb_debts(), strategy in arb_strategy()) {
        let ordered = order_debts(&debts, strategy, None);
        let mut before: Vec<&DebtId> = debts.iter().map(|d| d.id()).collect();
        let mut after: Vec<&DebtId> = ordered.iter().map(|d| d.id()).collect();
        before.sort();
        after.sort();
        prop_assert_eq!(before, after);
    }

    // ===================================================================
    // INVARIANT 7: The first surplus target matches the strategy.
    //
    // Snowball sends month-one surplus to the smallest balance, avalanche
    // to the highest APR.
    // ===================================================================
    #[test]
    fn first_surplus_goes_to_strategy_target(
        debts in arb_debts(),
        extra in 1i64..2_000i64,
    ) {
        let payment = total_minimums(&debts) + Decimal::from(extra);
        for strategy in [PayoffStrategy::Snowball, PayoffStrategy::Avalanche] {
            let scenario = simulate(&debts, strategy, payment, start(), None).unwrap();
            let first = scenario.month(1).next().unwrap();
            let target = debts.iter().find(|d| d.id() == &first.debt_id).unwrap();
            match strategy {
                PayoffStrategy::Snowball => prop_assert!(
                    debts.iter().all(|d| d.balance() >= target.balance())
                ),
                _ => prop_assert!(debts.iter().all(|d| d.apr() <= target.apr())),
            }
        }
    }

    // ===================================================================
    // INVARIANT 8: reduce-interest always recommends avalanche.
    // ===================================================================
    #[test]
    fn reduce_interest_always_avalanche(
        debts in arb_debts(),
        extra in arb_extra(),
        stress in 1u8..=5,
        completeness in 0.0f64..=1.0,
    ) {
        let payment = total_minimums(&debts) + extra;
        let snowball =
            simulate(&debts, PayoffStrategy::Snowball, payment, start(), None).unwrap();
        let avalanche =
            simulate(&debts, PayoffStrategy::Avalanche, payment, start(), None).unwrap();
        let profile = UserProfile::new()
            .with_goal(PrimaryGoal::ReduceInterest)
            .with_stress_level(stress)
            .with_completeness(completeness);
        let rec = recommend(&profile, &debts, &snowball, &avalanche);
        prop_assert_eq!(rec.strategy, PayoffStrategy::Avalanche);
        prop_assert!((0.0..=100.0).contains(&rec.confidence_score));
    }

    // ===================================================================
    // INVARIANT 9: The schedule adds up to the scenario totals.
    //
    // Summing every row's payment gives total paid, and summing every
    // row's interest gives total interest.
    // ===================================================================
    #[test]
    fn schedule_sums_to_totals(
        debts in arb_debts(),
        strategy in arb_strategy(),
        extra in arb_extra(),
    ) {
        let payment = total_minimums(&debts) + extra;
        let scenario = simulate(&debts, strategy, payment, start(), None).unwrap();
        let paid: Decimal = scenario.schedule().iter().map(|row| row.payment).sum();
        let interest: Decimal = scenario.schedule().iter().map(|row| row.interest).sum();
        prop_assert_eq!(paid, scenario.total_paid());
        prop_assert_eq!(interest, scenario.total_interest());
    }

    // ===================================================================
    // INVARIANT 10: Confidence stays within 0–100.
    // ===================================================================
    #[test]
    fn confidence_in_range(
        completeness in 0.0f64..=1.0,
        debt_count in 0usize..30,
        delinquent in any::<bool>(),
        ratio in 0.0f64..5.0,
    ) {
        let score = confidence_score(completeness, debt_count, delinquent, ratio);
        prop_assert!((0.0..=100.0).contains(&score));
    }
}
