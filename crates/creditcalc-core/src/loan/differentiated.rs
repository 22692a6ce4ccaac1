//! Differentiated loans: the principal is repaid in equal monthly slices and
//! interest accrues on the outstanding balance, so payments shrink every month.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::time_value::{ceil_money, checked, monthly_rate};
use crate::types::{Money, Percent};
use crate::LoanCalcResult;

/// One month of a differentiated schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPayment {
    /// 1-based month number.
    pub month: u32,
    pub payment: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleResult {
    pub payments: Vec<MonthlyPayment>,
    /// Sum of all monthly payments.
    pub total_paid: Money,
    pub overpayment: Money,
}

/// Build the month-by-month schedule. Each payment is rounded up.
pub fn schedule(principal: Money, periods: u32, interest: Percent) -> LoanCalcResult<ScheduleResult> {
    if periods == 0 {
        return Err(LoanCalcError::invalid(
            "periods",
            "Number of periods must be > 0",
        ));
    }

    let rate = monthly_rate(interest)?;
    let n = Decimal::from(periods);
    let slice = principal / n;

    let payments = (1..=periods)
        .map(|month| {
            let repaid_months = Decimal::from(month - 1);
            let repaid = checked(principal.checked_mul(repaid_months), "repaid principal")? / n;
            let accrued = checked(rate.checked_mul(principal - repaid), "monthly interest")?;
            let raw = checked(slice.checked_add(accrued), "monthly payment")?;
            Ok(MonthlyPayment {
                month,
                payment: ceil_money(raw),
            })
        })
        .collect::<LoanCalcResult<Vec<MonthlyPayment>>>()?;

    let total_paid = payments.iter().try_fold(Decimal::ZERO, |acc, p| {
        checked(acc.checked_add(p.payment), "total paid")
    })?;
    debug!("differentiated schedule: {periods} months, total paid {total_paid}");

    Ok(ScheduleResult {
        payments,
        total_paid,
        overpayment: ceil_money(total_paid - principal),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_single_month_is_principal_plus_interest() {
        let r = schedule(dec!(1000), 1, dec!(12)).unwrap();
        assert_eq!(r.payments.len(), 1);
        assert_eq!(r.payments[0].month, 1);
        assert_eq!(r.payments[0].payment, dec!(1010));
        assert_eq!(r.overpayment, dec!(10));
    }

    #[test]
    fn test_months_are_numbered_from_one() {
        let r = schedule(dec!(1200), 12, dec!(6)).unwrap();
        let months: Vec<u32> = r.payments.iter().map(|p| p.month).collect();
        assert_eq!(months, (1..=12).collect::<Vec<u32>>());
    }

    #[test]
    fn test_whole_number_payments_not_bumped() {
        // 12000 over 2 months at 2%: 6000 + 20, then 6000 + 10.
        let r = schedule(dec!(12000), 2, dec!(2)).unwrap();
        let p: Vec<Decimal> = r.payments.iter().map(|p| p.payment).collect();
        assert_eq!(p, vec![dec!(6020), dec!(6010)]);
        assert_eq!(r.overpayment, dec!(30));
    }

    #[test]
    fn test_huge_principal_overflows_cleanly() {
        let err = schedule(Decimal::MAX, 12, dec!(10)).unwrap_err();
        assert!(matches!(err, LoanCalcError::FinancialImpossibility(_)));
    }

    #[test]
    fn test_zero_periods_rejected() {
        assert!(schedule(dec!(1000), 0, dec!(12)).is_err());
    }
}
