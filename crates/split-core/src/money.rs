//! Minor-unit rounding and deterministic remainder allocation.
//!
//! A `scale` is the number of fraction digits of the ledger currency's
//! minor unit: 2 for cents, 0 for yen.

use rust_decimal::{prelude::FromPrimitive, Decimal, RoundingStrategy};

use crate::CoreError;

const MAX_SCALE: u32 = 28;

/// Value of one minor unit at `scale` (0.01 for scale 2).
pub fn minor_unit(scale: u32) -> Decimal {
    Decimal::new(1, scale.min(MAX_SCALE))
}

/// Rounds to the minor unit, halves away from zero.
pub fn round_to_minor(amount: Decimal, scale: u32) -> Decimal {
    amount.round_dp_with_strategy(scale.min(MAX_SCALE), RoundingStrategy::MidpointAwayFromZero)
}

/// `true` when `a` and `b` differ by at most one minor unit.
pub fn within_minor_unit(a: Decimal, b: Decimal, scale: u32) -> bool {
    (a - b).abs() <= minor_unit(scale)
}

/// `true` when `amount` rounds to zero at the minor unit.
pub fn is_negligible(amount: Decimal, scale: u32) -> bool {
    round_to_minor(amount, scale).is_zero()
}

/// Converts a float coming from an untyped source into a decimal.
pub fn decimal_from_f64(value: f64) -> Result<Decimal, CoreError> {
    if !value.is_finite() {
        return Err(CoreError::InvalidAmount(format!(
            "{value} is not a finite number"
        )));
    }
    Decimal::from_f64(value)
        .ok_or_else(|| CoreError::InvalidAmount(format!("{value} is out of range")))
}

/// Splits `total` into `n` shares of `round(total / n)`.
///
/// The final share absorbs the rounding residual so the shares always sum
/// to `total` exactly. Callers wanting the remainder elsewhere reorder
/// their participants before splitting.
///
/// When the rounded share is larger than the exact quotient, the final
/// share is the smaller one (`10.00 / 3` gives `3.33, 3.33, 3.34`, while
/// `0.20 / 3` gives `0.07, 0.07, 0.06`). A total so small that rounding
/// up would leave the final share negative is rejected.
pub fn split_equally(total: Decimal, n: usize, scale: u32) -> Result<Vec<Decimal>, CoreError> {
    if n == 0 {
        return Err(CoreError::InvalidParticipantCount(n));
    }
    if total <= Decimal::ZERO {
        return Err(CoreError::InvalidAmount(format!(
            "split total must be positive, got {total}"
        )));
    }
    let share = round_to_minor(total / Decimal::from(n), scale);
    let mut shares = vec![share; n];
    let allocated = share * Decimal::from(n - 1);
    if allocated > total {
        return Err(CoreError::InvalidAmount(format!(
            "{total} is too small to split {n} ways at scale {scale}"
        )));
    }
    shares[n - 1] = total - allocated;
    Ok(shares)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn remainder_lands_on_the_last_share() {
        let shares = split_equally(dec!(1000), 3, 0).expect("split");
        assert_eq!(shares, vec![dec!(333), dec!(333), dec!(334)]);
        assert_eq!(shares.iter().copied().sum::<Decimal>(), dec!(1000));
    }

    #[test]
    fn splits_cents() {
        let shares = split_equally(dec!(10.00), 3, 2).expect("split");
        assert_eq!(shares, vec![dec!(3.33), dec!(3.33), dec!(3.34)]);

        let shares = split_equally(dec!(0.20), 3, 2).expect("split");
        assert_eq!(shares, vec![dec!(0.07), dec!(0.07), dec!(0.06)]);
    }

    #[test]
    fn tiny_totals_never_yield_a_negative_share() {
        assert!(matches!(
            split_equally(dec!(0.05), 10, 2),
            Err(CoreError::InvalidAmount(_))
        ));
        assert_eq!(
            split_equally(dec!(0.10), 10, 2).expect("split"),
            vec![dec!(0.01); 10]
        );
    }

    #[test]
    fn single_participant_takes_everything() {
        assert_eq!(split_equally(dec!(12.34), 1, 2).unwrap(), vec![dec!(12.34)]);
    }

    #[test]
    fn rejects_zero_participants_and_non_positive_totals() {
        assert_eq!(
            split_equally(dec!(10), 0, 2),
            Err(CoreError::InvalidParticipantCount(0))
        );
        assert!(matches!(
            split_equally(dec!(0), 2, 2),
            Err(CoreError::InvalidAmount(_))
        ));
        assert!(matches!(
            split_equally(dec!(-5), 2, 2),
            Err(CoreError::InvalidAmount(_))
        ));
    }

    #[test]
    fn non_finite_floats_are_invalid_amounts() {
        assert!(matches!(decimal_from_f64(f64::NAN), Err(CoreError::InvalidAmount(_))));
        assert!(matches!(
            decimal_from_f64(f64::INFINITY),
            Err(CoreError::InvalidAmount(_))
        ));
        assert_eq!(decimal_from_f64(12.5).unwrap(), dec!(12.5));
    }

    #[test]
    fn rounding_helpers_work_at_the_minor_unit() {
        assert_eq!(minor_unit(2), dec!(0.01));
        assert_eq!(minor_unit(0), dec!(1));
        assert_eq!(round_to_minor(dec!(2.005), 2), dec!(2.01));
        assert_eq!(round_to_minor(dec!(-2.005), 2), dec!(-2.01));
        assert!(within_minor_unit(dec!(100), dec!(101), 0));
        assert!(!within_minor_unit(dec!(100), dec!(100.02), 2));
        assert!(is_negligible(dec!(0.004), 2));
        assert!(!is_negligible(dec!(0.005), 2));
    }
}
