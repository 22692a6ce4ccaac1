//! Annuity (level-payment) loans.
//!
//! Given any two of principal, monthly payment and number of months (plus the
//! annual interest rate), solve for the third. Payments are rounded up to the
//! next whole unit, principals down, and months up.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::time_value::{
    annuity_coefficient, ceil_money, ceil_periods, checked, floor_money, log_base, monthly_rate,
};
use crate::types::{Money, Percent};
use crate::LoanCalcResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Repayment term for a given payment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TermResult {
    /// Total number of monthly payments.
    pub periods: u32,
    /// Whole years in the term.
    pub years: u32,
    /// Months beyond the whole years.
    pub months: u32,
    pub overpayment: Money,
}

/// Level monthly payment for a given principal and term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentResult {
    pub payment: Money,
    pub overpayment: Money,
}

/// Principal affordable with a given payment and term.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrincipalResult {
    pub principal: Money,
    pub overpayment: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Number of months needed to repay `principal` at `payment` per month.
pub fn solve_periods(principal: Money, payment: Money, interest: Percent) -> LoanCalcResult<TermResult> {
    let rate = monthly_rate(interest)?;
    let monthly_interest = checked(rate.checked_mul(principal), "monthly interest")?;
    if payment <= monthly_interest {
        return Err(LoanCalcError::FinancialImpossibility(format!(
            "Payment {payment} does not cover the first month's interest {}",
            monthly_interest.round_dp(2)
        )));
    }

    let ratio = checked(payment.checked_div(payment - monthly_interest), "payment ratio")?;
    let raw = log_base(ratio, Decimal::ONE + rate)?;
    let periods = ceil_periods(raw)?;
    debug!("annuity term: {raw} months, rounded to {periods}");

    Ok(TermResult {
        periods,
        years: periods / MONTHS_PER_YEAR,
        months: periods % MONTHS_PER_YEAR,
        overpayment: overpayment(principal, payment, periods)?,
    })
}

/// Level monthly payment, rounded up.
pub fn solve_payment(principal: Money, periods: u32, interest: Percent) -> LoanCalcResult<PaymentResult> {
    let rate = monthly_rate(interest)?;
    let coefficient = annuity_coefficient(rate, periods)?;
    let raw = checked(principal.checked_mul(coefficient), "annuity payment")?;
    let payment = ceil_money(raw);
    debug!("annuity payment: {raw}, rounded to {payment}");

    Ok(PaymentResult {
        payment,
        overpayment: overpayment(principal, payment, periods)?,
    })
}

/// Loan principal, rounded down.
pub fn solve_principal(payment: Money, periods: u32, interest: Percent) -> LoanCalcResult<PrincipalResult> {
    let rate = monthly_rate(interest)?;
    let coefficient = annuity_coefficient(rate, periods)?;
    let raw = checked(payment.checked_div(coefficient), "loan principal")?;
    let principal = floor_money(raw);
    debug!("annuity principal: {raw}, rounded to {principal}");

    Ok(PrincipalResult {
        principal,
        overpayment: overpayment(principal, payment, periods)?,
    })
}

/// Total paid over the term minus the principal, rounded up.
pub fn overpayment(principal: Money, payment: Money, periods: u32) -> LoanCalcResult<Money> {
    let total = checked(payment.checked_mul(Decimal::from(periods)), "total paid")?;
    Ok(ceil_money(total - principal))
}
