//! Progressive slab tax.

use rust_decimal::Decimal;

use crate::BracketTable;

/// Applies a progressive slab schedule to `income`.
///
/// Walks the slabs in ascending order; each slab taxes only the part of the
/// income between the previous bound and its own bound. Income that sits
/// exactly on a bound pays nothing at the next slab's rate. Returns zero for
/// zero or negative income.
///
/// # Examples
///
/// ```
/// use rust_decimal_macros::dec;
/// use itax_core::TaxPolicy;
/// use itax_core::calculations::slab_tax;
///
/// let policy = TaxPolicy::default();
///
/// // 5% of 300k + 10% of 150k
/// assert_eq!(slab_tax(dec!(750000), &policy.new_brackets), dec!(30000));
/// ```
pub fn slab_tax(
    income: Decimal,
    table: &BracketTable,
) -> Decimal {
    let mut tax = Decimal::ZERO;
    let mut previous_bound = Decimal::ZERO;

    for bracket in table.brackets() {
        if income <= previous_bound {
            break;
        }
        let slice_top = match bracket.upper_bound {
            Some(bound) => income.min(bound),
            None => income,
        };
        tax += (slice_top - previous_bound) * bracket.rate;

        match bracket.upper_bound {
            Some(bound) => previous_bound = bound,
            None => break,
        }
    }

    tax
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::TaxPolicy;

    fn old() -> BracketTable {
        TaxPolicy::default().old_brackets
    }

    fn new() -> BracketTable {
        TaxPolicy::default().new_brackets
    }

    #[test]
    fn zero_income_pays_nothing() {
        assert_eq!(slab_tax(dec!(0), &old()), Decimal::ZERO);
        assert_eq!(slab_tax(dec!(0), &new()), Decimal::ZERO);
    }

    #[test]
    fn negative_income_pays_nothing() {
        assert_eq!(slab_tax(dec!(-100000), &old()), Decimal::ZERO);
    }

    #[test]
    fn income_inside_nil_slab_pays_nothing() {
        assert_eq!(slab_tax(dec!(250000), &old()), Decimal::ZERO);
        assert_eq!(slab_tax(dec!(300000), &new()), Decimal::ZERO);
    }

    #[test]
    fn boundary_income_excludes_higher_rate() {
        // 5% of 250k only, nothing at 20%
        assert_eq!(slab_tax(dec!(500000), &old()), dec!(12500));
        // 12,500 + 20% of 500k
        assert_eq!(slab_tax(dec!(1000000), &old()), dec!(112500));
    }

    #[test]
    fn one_rupee_past_boundary_uses_next_rate() {
        assert_eq!(slab_tax(dec!(500001), &old()), dec!(12500.20));
    }

    #[test]
    fn old_regime_top_slab() {
        // 112,500 + 30% of 1,000,000
        assert_eq!(slab_tax(dec!(2000000), &old()), dec!(412500));
    }

    #[test]
    fn new_regime_middle_slab() {
        // 15,000 + 15,000
        assert_eq!(slab_tax(dec!(750000), &new()), dec!(30000));
    }

    #[test]
    fn new_regime_top_slab() {
        // 15,000 + 30,000 + 45,000 + 60,000 + 30% of 500,000
        assert_eq!(slab_tax(dec!(2000000), &new()), dec!(300000));
    }

    #[test]
    fn very_large_income_has_no_ceiling() {
        let income = dec!(1000000000);

        // Old: 112,500 + 30% of (1e9 - 1e6)
        assert_eq!(slab_tax(income, &old()), dec!(299812500));
    }

    #[test]
    fn tax_is_non_decreasing_and_follows_marginal_rate() {
        let table = new();
        let mut previous = Decimal::ZERO;
        let mut income = Decimal::ZERO;

        while income <= dec!(2000000) {
            let tax = slab_tax(income, &table);
            assert!(tax >= previous, "tax fell at income {income}");

            let next = slab_tax(income + dec!(1), &table);
            assert_eq!(next - tax, table.marginal_rate(income));

            previous = tax;
            income += dec!(12500);
        }
    }
}
