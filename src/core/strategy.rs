use crate::core::debt::{Debt, DebtId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Order in which surplus payment is directed at debts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Strategy {
    /// Smallest balance first.
    Snowball,
    /// Highest APR first.
    Avalanche,
    /// Caller-supplied order; unlisted debts follow in snowball order.
    Custom,
}

impl Strategy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Strategy::Snowball => "snowball",
            Strategy::Avalanche => "avalanche",
            Strategy::Custom => "custom",
        }
    }

    /// Name given to scenarios that were not explicitly named.
    pub fn scenario_name(&self) -> &'static str {
        match self {
            Strategy::Snowball => "Snowball Strategy",
            Strategy::Avalanche => "Avalanche Strategy",
            Strategy::Custom => "Custom Strategy",
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Strategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "snowball" => Ok(Strategy::Snowball),
            "avalanche" => Ok(Strategy::Avalanche),
            "custom" => Ok(Strategy::Custom),
            other => Err(format!("unknown strategy: {other}")),
        }
    }
}

/// Order debts according to `strategy`.
///
/// Always returns a permutation of `debts`. Sorting is stable, so ties keep
/// their input order. For [`Strategy::Custom`], ids in `custom_order` that
/// match no debt are ignored, and an empty or absent order degrades to
/// snowball.
pub fn order_debts(
    debts: &[Debt],
    strategy: Strategy,
    custom_order: Option<&[DebtId]>,
) -> Vec<Debt> {
    match strategy {
        Strategy::Snowball => snowball(debts.to_vec()),
        Strategy::Avalanche => {
            let mut ordered = debts.to_vec();
            ordered.sort_by(|a, b| b.apr().cmp(&a.apr()));
            ordered
        }
        Strategy::Custom => match custom_order {
            Some(order) if !order.is_empty() => {
                let mut placed = vec![false; debts.len()];
                let mut ordered = Vec::with_capacity(debts.len());
                for id in order {
                    let found = (0..debts.len()).find(|&i| !placed[i] && debts[i].id() == id);
                    if let Some(idx) = found {
                        placed[idx] = true;
                        ordered.push(debts[idx].clone());
                    }
                }
                let rest = debts
                    .iter()
                    .zip(&placed)
                    .filter(|(_, placed)| !**placed)
                    .map(|(d, _)| d.clone())
                    .collect();
                ordered.extend(snowball(rest));
                ordered
            }
            _ => snowball(debts.to_vec()),
        },
    }
}

fn snowball(mut debts: Vec<Debt>) -> Vec<Debt> {
    debts.sort_by(|a, b| a.balance().cmp(&b.balance()));
    debts
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_debts() -> Vec<Debt> {
        vec![
            Debt::new("mid", "Mid", dec!(3000), dec!(18), dec!(90)),
            Debt::new("small", "Small", dec!(500), dec!(10), dec!(20)),
            Debt::new("big", "Big", dec!(9000), dec!(24), dec!(200)),
            Debt::new("tie", "Tie", dec!(500), dec!(24), dec!(25)),
        ]
    }

    fn ids(debts: &[Debt]) -> Vec<&str> {
        debts.iter().map(|d| d.id().as_str()).collect()
    }

    #[test]
    fn test_snowball_order_is_stable() {
        let ordered = order_debts(&sample_debts(), Strategy::Snowball, None);
        assert_eq!(ids(&ordered), vec!["small", "tie", "mid", "big"]);
    }

    #[test]
    fn test_avalanche_order_is_stable() {
        let ordered = order_debts(&sample_debts(), Strategy::Avalanche, None);
        assert_eq!(ids(&ordered), vec!["big", "tie", "mid", "small"]);
    }

    #[test]
    fn test_custom_order_appends_rest_in_snowball_order() {
        let order = vec![DebtId::new("big"), DebtId::new("ghost")];
        let ordered = order_debts(&sample_debts(), Strategy::Custom, Some(&order));
        assert_eq!(ids(&ordered), vec!["big", "small", "tie", "mid"]);
    }

    #[test]
    fn test_custom_without_order_falls_back_to_snowball() {
        let debts = sample_debts();
        assert_eq!(
            order_debts(&debts, Strategy::Custom, None),
            order_debts(&debts, Strategy::Snowball, None)
        );
        assert_eq!(
            order_debts(&debts, Strategy::Custom, Some(&[])),
            order_debts(&debts, Strategy::Snowball, None)
        );
    }

    #[test]
    fn test_custom_duplicate_ids_place_once() {
        let order = vec![DebtId::new("mid"), DebtId::new("mid")];
        let ordered = order_debts(&sample_debts(), Strategy::Custom, Some(&order));
        assert_eq!(ordered.len(), 4);
        assert_eq!(ids(&ordered), vec!["mid", "small", "tie", "big"]);
    }

    #[test]
    fn test_strategy_parse() {
        assert_eq!("Avalanche".parse::<Strategy>(), Ok(Strategy::Avalanche));
        assert!("fastest".parse::<Strategy>().is_err());
        assert_eq!(Strategy::Snowball.to_string(), "snowball");
    }
}
