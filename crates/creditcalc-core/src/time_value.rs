use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::error::LoanCalcError;
use crate::types::{Percent, Rate};
use crate::LoanCalcResult;

const LN_2: Decimal = dec!(0.6931471805599453094172321215);
const LN_SERIES_TERMS: u32 = 40;

/// Decimal places kept before rounding a result to whole units. A monthly
/// rate such as 2/1200 is cut at 28 places, and `decimal_ln` is a series;
/// either error must never push an exact whole number across a boundary.
const GUARD_DP: u32 = 9;

/// Monthly rate from an annual percentage: `annual / 12 / 100`.
pub fn monthly_rate(annual: Percent) -> LoanCalcResult<Rate> {
    if annual <= Decimal::ZERO {
        return Err(LoanCalcError::invalid(
            "interest",
            "Annual interest rate must be positive",
        ));
    }
    Ok(annual / dec!(12) / dec!(100))
}

/// `(1 + rate)^n`.
pub fn compound_factor(rate: Rate, n: u32) -> LoanCalcResult<Decimal> {
    (Decimal::ONE + rate)
        .checked_powu(u64::from(n))
        .ok_or_else(|| overflow(&format!("compound factor over {n} periods")))
}

/// Error for an intermediate result beyond the range of `Decimal`.
pub fn overflow(context: &str) -> LoanCalcError {
    LoanCalcError::FinancialImpossibility(format!("Arithmetic overflow in {context}"))
}

/// Unwrap a `checked_*` result, reporting overflow against `context`.
pub fn checked(value: Option<Decimal>, context: &str) -> LoanCalcResult<Decimal> {
    value.ok_or_else(|| overflow(context))
}

/// Annuity coefficient `i(1+i)^n / ((1+i)^n - 1)`: the level payment per
/// unit of principal.
pub fn annuity_coefficient(rate: Rate, n: u32) -> LoanCalcResult<Decimal> {
    if n == 0 {
        return Err(LoanCalcError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }

    let factor = compound_factor(rate, n)?;
    let denom = factor - Decimal::ONE;
    if denom.is_zero() {
        return Err(LoanCalcError::FinancialImpossibility(
            "Annuity coefficient is undefined at a zero rate".into(),
        ));
    }

    let numer = checked(rate.checked_mul(factor), "annuity coefficient")?;
    checked(numer.checked_div(denom), "annuity coefficient")
}

/// Natural logarithm via the atanh series, after halving/doubling `x` into
/// [0.5, 2].
pub fn decimal_ln(x: Decimal) -> LoanCalcResult<Decimal> {
    if x <= Decimal::ZERO {
        return Err(LoanCalcError::FinancialImpossibility(format!(
            "Logarithm of non-positive value {x}"
        )));
    }
    if x == Decimal::ONE {
        return Ok(Decimal::ZERO);
    }

    let mut val = x;
    let mut adjust = Decimal::ZERO;
    while val > dec!(2) {
        val /= dec!(2);
        adjust += LN_2;
    }
    while val < dec!(0.5) {
        val *= dec!(2);
        adjust -= LN_2;
    }

    let z = (val - Decimal::ONE) / (val + Decimal::ONE);
    let z2 = z * z;
    let mut term = z;
    let mut sum = z;
    for k in 1..LN_SERIES_TERMS {
        term *= z2;
        if term.is_zero() {
            break;
        }
        sum += term / Decimal::from(2 * k + 1);
    }

    Ok(dec!(2) * sum + adjust)
}

/// `log_base(x)`.
pub fn log_base(x: Decimal, base: Decimal) -> LoanCalcResult<Decimal> {
    let ln_base = decimal_ln(base)?;
    if ln_base.is_zero() {
        return Err(LoanCalcError::FinancialImpossibility(
            "Logarithm base must differ from 1".into(),
        ));
    }
    Ok(decimal_ln(x)? / ln_base)
}

/// Round a fractional period count up to whole months.
pub fn ceil_periods(raw: Decimal) -> LoanCalcResult<u32> {
    raw.round_dp(GUARD_DP)
        .ceil()
        .to_u32()
        .ok_or_else(|| {
            LoanCalcError::FinancialImpossibility(format!(
                "Repayment term of {raw} months is out of range"
            ))
        })
}

/// Round an amount up to whole units.
pub fn ceil_money(raw: Decimal) -> Decimal {
    raw.round_dp(GUARD_DP).ceil()
}

/// Round an amount down to whole units.
pub fn floor_money(raw: Decimal) -> Decimal {
    raw.round_dp(GUARD_DP).floor()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TOL: Decimal = dec!(0.0000000001);

    fn assert_close(actual: Decimal, expected: Decimal, tol: Decimal, msg: &str) {
        let diff = (actual - expected).abs();
        assert!(
            diff <= tol,
            "{}: expected ~{}, got {} (diff = {})",
            msg,
            expected,
            actual,
            diff
        );
    }

    #[test]
    fn test_monthly_rate_from_percent() {
        assert_eq!(monthly_rate(dec!(12)).unwrap(), dec!(0.01));
        assert_close(
            monthly_rate(dec!(10)).unwrap(),
            dec!(0.0083333333333),
            TOL,
            "10% p.a.",
        );
    }

    #[test]
    fn test_monthly_rate_rejects_zero() {
        assert!(matches!(
            monthly_rate(Decimal::ZERO),
            Err(LoanCalcError::InvalidParameters { .. })
        ));
    }

    #[test]
    fn test_compound_factor_matches_repeated_multiplication() {
        let rate = dec!(0.01);
        let mut expected = Decimal::ONE;
        for _ in 0..13 {
            expected *= Decimal::ONE + rate;
        }
        assert_close(compound_factor(rate, 13).unwrap(), expected, TOL, "1.01^13");
        assert_eq!(compound_factor(rate, 0).unwrap(), Decimal::ONE);
    }

    #[test]
    fn test_compound_factor_overflow() {
        assert!(matches!(
            compound_factor(dec!(1000), 100),
            Err(LoanCalcError::FinancialImpossibility(_))
        ));
    }

    #[test]
    fn test_money_rounding_absorbs_rate_truncation() {
        // 2% p.a. is 0.0016666...67 a month, so 12000 months of interest
        // comes out a hair above 20.
        let interest = monthly_rate(dec!(2)).unwrap() * dec!(12000);
        assert!(interest > dec!(20));
        assert_eq!(ceil_money(interest), dec!(20));
        assert_eq!(ceil_money(dec!(20.4)), dec!(21));

        assert_eq!(floor_money(dec!(11999.99999999999999999)), dec!(12000));
        assert_eq!(floor_money(dec!(800018.69)), dec!(800018));
    }

    #[test]
    fn test_annuity_coefficient_single_period() {
        // One period: repay principal plus one month of interest.
        let coef = annuity_coefficient(dec!(0.01), 1).unwrap();
        assert_close(coef, dec!(1.01), TOL, "single period");
    }

    #[test]
    fn test_annuity_coefficient_zero_periods() {
        assert!(annuity_coefficient(dec!(0.01), 0).is_err());
    }

    #[test]
    fn test_decimal_ln_known_values() {
        assert_close(decimal_ln(dec!(2)).unwrap(), LN_2, TOL, "ln 2");
        assert_close(
            decimal_ln(dec!(10)).unwrap(),
            dec!(2.302585092994045684),
            TOL,
            "ln 10",
        );
        assert_close(
            decimal_ln(dec!(0.25)).unwrap(),
            dec!(-1.386294361119890618),
            TOL,
            "ln 0.25",
        );
        assert_eq!(decimal_ln(Decimal::ONE).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_decimal_ln_rejects_non_positive() {
        assert!(decimal_ln(Decimal::ZERO).is_err());
        assert!(decimal_ln(dec!(-3)).is_err());
    }

    #[test]
    fn test_log_base() {
        assert_close(log_base(dec!(1024), dec!(2)).unwrap(), dec!(10), TOL, "log2 1024");
        assert!(log_base(dec!(5), Decimal::ONE).is_err());
    }

    #[test]
    fn test_ceil_periods_ignores_approximation_noise() {
        assert_eq!(ceil_periods(dec!(24.0000000000001)).unwrap(), 24);
        assert_eq!(ceil_periods(dec!(23.51)).unwrap(), 24);
        assert_eq!(ceil_periods(dec!(9.998)).unwrap(), 10);
    }
}
