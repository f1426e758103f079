use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::PolicyError;

/// One slab of a progressive schedule.
///
/// Income above the previous slab's bound, up to and including
/// `upper_bound`, is taxed at `rate`. The last slab of a table has no
/// upper bound.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBracket {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub upper_bound: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBracket {
    pub fn new(
        upper_bound: Option<Decimal>,
        rate: Decimal,
    ) -> Self {
        Self { upper_bound, rate }
    }
}

/// An ordered slab schedule that partitions `[0, ∞)` without gaps.
///
/// Construction goes through [`BracketTable::new`], so a value of this type
/// always has strictly increasing bounds, non-decreasing rates in `[0, 1]`
/// and a single open-ended final slab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<TaxBracket>", into = "Vec<TaxBracket>")]
pub struct BracketTable {
    brackets: Vec<TaxBracket>,
}

impl BracketTable {
    /// Validates `brackets` and wraps them in a table.
    ///
    /// # Errors
    ///
    /// Returns [`PolicyError`] if:
    /// - the list is empty
    /// - a rate is outside `[0, 1]` or lower than the previous slab's rate
    /// - a bound is not positive or not above the previous bound
    /// - any slab other than the last is open-ended, or the last one is not
    pub fn new(brackets: Vec<TaxBracket>) -> Result<Self, PolicyError> {
        if brackets.is_empty() {
            return Err(PolicyError::EmptyBracketTable);
        }

        let last = brackets.len() - 1;
        let mut previous_bound = Decimal::ZERO;
        let mut previous_rate = Decimal::ZERO;

        for (index, bracket) in brackets.iter().enumerate() {
            if bracket.rate < Decimal::ZERO || bracket.rate > Decimal::ONE {
                return Err(PolicyError::RateOutOfRange(bracket.rate));
            }
            if bracket.rate < previous_rate {
                return Err(PolicyError::DecreasingRate {
                    index,
                    rate: bracket.rate,
                    previous: previous_rate,
                });
            }
            previous_rate = bracket.rate;

            match (bracket.upper_bound, index == last) {
                (Some(bound), false) => {
                    if bound <= previous_bound {
                        return Err(PolicyError::NonIncreasingBound {
                            index,
                            bound,
                            previous: previous_bound,
                        });
                    }
                    previous_bound = bound;
                }
                (None, true) => {}
                (Some(_), true) => return Err(PolicyError::MissingOpenBracket),
                (None, false) => return Err(PolicyError::OpenBracketNotLast(index)),
            }
        }

        Ok(Self { brackets })
    }

    /// Wraps brackets that are known to be well formed (the built-in schedules).
    pub(super) fn from_static(brackets: &[(Option<Decimal>, Decimal)]) -> Self {
        Self {
            brackets: brackets
                .iter()
                .map(|&(upper_bound, rate)| TaxBracket::new(upper_bound, rate))
                .collect(),
        }
    }

    /// Builds a table from `(upper_bound, rate)` pairs, `None` meaning no bound.
    pub fn from_pairs(pairs: &[(Option<Decimal>, Decimal)]) -> Result<Self, PolicyError> {
        Self::new(
            pairs
                .iter()
                .map(|&(upper_bound, rate)| TaxBracket::new(upper_bound, rate))
                .collect(),
        )
    }

    pub fn brackets(&self) -> &[TaxBracket] {
        &self.brackets
    }

    /// The marginal rate that applies to the next rupee above `income`.
    pub fn marginal_rate(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.brackets
            .iter()
            .find(|b| b.upper_bound.is_none_or(|bound| income < bound))
            .map(|b| b.rate)
            .unwrap_or(Decimal::ZERO)
    }
}

impl TryFrom<Vec<TaxBracket>> for BracketTable {
    type Error = PolicyError;

    fn try_from(brackets: Vec<TaxBracket>) -> Result<Self, Self::Error> {
        Self::new(brackets)
    }
}

impl From<BracketTable> for Vec<TaxBracket> {
    fn from(table: BracketTable) -> Self {
        table.brackets
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn pairs() -> Vec<(Option<Decimal>, Decimal)> {
        vec![
            (Some(dec!(250000)), dec!(0)),
            (Some(dec!(500000)), dec!(0.05)),
            (None, dec!(0.20)),
        ]
    }

    #[test]
    fn new_accepts_well_formed_table() {
        let table = BracketTable::from_pairs(&pairs()).unwrap();

        assert_eq!(table.brackets().len(), 3);
        assert_eq!(table.brackets()[2].upper_bound, None);
    }

    #[test]
    fn new_rejects_empty_table() {
        assert_eq!(BracketTable::new(vec![]), Err(PolicyError::EmptyBracketTable));
    }

    #[test]
    fn new_rejects_bounded_last_bracket() {
        let result = BracketTable::from_pairs(&[(Some(dec!(100)), dec!(0.1))]);

        assert_eq!(result, Err(PolicyError::MissingOpenBracket));
    }

    #[test]
    fn new_rejects_open_bracket_in_the_middle() {
        let result = BracketTable::from_pairs(&[(None, dec!(0.1)), (None, dec!(0.2))]);

        assert_eq!(result, Err(PolicyError::OpenBracketNotLast(0)));
    }

    #[test]
    fn new_rejects_non_increasing_bounds() {
        let result = BracketTable::from_pairs(&[
            (Some(dec!(500)), dec!(0)),
            (Some(dec!(500)), dec!(0.1)),
            (None, dec!(0.2)),
        ]);

        assert_eq!(
            result,
            Err(PolicyError::NonIncreasingBound {
                index: 1,
                bound: dec!(500),
                previous: dec!(500),
            })
        );
    }

    #[test]
    fn new_rejects_decreasing_rate() {
        let result =
            BracketTable::from_pairs(&[(Some(dec!(500)), dec!(0.2)), (None, dec!(0.1))]);

        assert_eq!(
            result,
            Err(PolicyError::DecreasingRate {
                index: 1,
                rate: dec!(0.1),
                previous: dec!(0.2),
            })
        );
    }

    #[test]
    fn new_rejects_rate_above_one() {
        let result = BracketTable::from_pairs(&[(None, dec!(1.5))]);

        assert_eq!(result, Err(PolicyError::RateOutOfRange(dec!(1.5))));
    }

    #[test]
    fn marginal_rate_treats_bound_as_end_of_lower_slab() {
        let table = BracketTable::from_pairs(&pairs()).unwrap();

        assert_eq!(table.marginal_rate(dec!(249999)), dec!(0));
        assert_eq!(table.marginal_rate(dec!(250000)), dec!(0.05));
        assert_eq!(table.marginal_rate(dec!(9000000)), dec!(0.20));
    }
}
