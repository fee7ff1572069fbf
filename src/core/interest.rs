use rust_decimal::Decimal;

const MONTHS_PER_YEAR: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// One month of simple interest: `balance * apr / 100 / 12`.
///
/// Callers guarantee `balance >= 0` and `apr >= 0`.
///
/// ```
/// use payoff_engine::core::interest::monthly_interest;
/// use rust_decimal_macros::dec;
///
/// assert_eq!(monthly_interest(dec!(1200), dec!(12)), dec!(12));
/// ```
pub fn monthly_interest(balance: Decimal, apr: Decimal) -> Decimal {
    balance * apr / Decimal::ONE_HUNDRED / MONTHS_PER_YEAR
}
