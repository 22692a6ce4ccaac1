use creditcalc_core::loan::differentiated;
use creditcalc_core::loan::report::render_lines;
use creditcalc_core::loan::{analyze_loan, LoanOutput, LoanRequest};
use creditcalc_core::LoanCalcError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn payments(r: &differentiated::ScheduleResult) -> Vec<Decimal> {
    r.payments.iter().map(|p| p.payment).collect()
}

#[test]
fn test_eight_month_schedule() {
    let r = differentiated::schedule(dec!(500_000), 8, dec!(7.8)).unwrap();
    assert_eq!(
        payments(&r),
        vec![
            dec!(65_750),
            dec!(65_344),
            dec!(64_938),
            dec!(64_532),
            dec!(64_125),
            dec!(63_719),
            dec!(63_313),
            dec!(62_907),
        ]
    );
    assert_eq!(r.overpayment, dec!(14_628));
}

#[test]
fn test_payments_strictly_decrease() {
    let r = differentiated::schedule(dec!(500_000), 8, dec!(7.8)).unwrap();
    let p = payments(&r);
    assert!(p.windows(2).all(|w| w[0] > w[1]), "not decreasing: {p:?}");
}

#[test]
fn test_overpayment_is_total_minus_principal() {
    for (principal, periods, interest) in [
        (dec!(500_000), 8, dec!(7.8)),
        (dec!(1_000_000), 10, dec!(10)),
        (dec!(345_678), 37, dec!(4.25)),
    ] {
        let r = differentiated::schedule(principal, periods, interest).unwrap();
        let total: Decimal = payments(&r).iter().sum();
        assert_eq!(r.total_paid, total);
        assert_eq!(r.overpayment, (total - principal).ceil());
    }
}

#[test]
fn test_ten_month_schedule_rendering() {
    let req = LoanRequest {
        loan_type: Some("diff".into()),
        principal: Some(dec!(1_000_000)),
        periods: Some(10),
        interest: Some(dec!(10)),
        ..Default::default()
    };
    let out = analyze_loan(&req).unwrap();
    assert!(matches!(out.result, LoanOutput::Schedule(_)));
    assert_eq!(
        render_lines(&out.result),
        vec![
            "Month 1: payment is 108334",
            "Month 2: payment is 107500",
            "Month 3: payment is 106667",
            "Month 4: payment is 105834",
            "Month 5: payment is 105000",
            "Month 6: payment is 104167",
            "Month 7: payment is 103334",
            "Month 8: payment is 102500",
            "Month 9: payment is 101667",
            "Month 10: payment is 100834",
            "Overpayment = 45837",
        ]
    );
}

// ===========================================================================
// Whole-number payments
// ===========================================================================

#[test]
fn test_whole_number_months_stay_whole() {
    let r = differentiated::schedule(dec!(120_000), 12, dec!(8)).unwrap();
    assert_eq!(
        payments(&r),
        vec![
            dec!(10_800),
            dec!(10_734),
            dec!(10_667),
            dec!(10_600),
            dec!(10_534),
            dec!(10_467),
            dec!(10_400),
            dec!(10_334),
            dec!(10_267),
            dec!(10_200),
            dec!(10_134),
            dec!(10_067),
        ]
    );
    assert_eq!(r.overpayment, dec!(5_204));

    let r = differentiated::schedule(dec!(12_000), 2, dec!(2)).unwrap();
    assert_eq!(payments(&r), vec![dec!(6_020), dec!(6_010)]);
    assert_eq!(r.overpayment, dec!(30));
}

#[test]
fn test_schedule_matches_exact_rational_ceiling() {
    // payment_m = P * (1200 + I * (n - m + 1)) / (1200 * n), rounded up
    for principal in [1_000u64, 12_000, 120_000, 500_000, 1_000_000] {
        for periods in [1u32, 2, 3, 6, 12, 24, 60] {
            for interest in 1u64..=12 {
                let r = differentiated::schedule(
                    Decimal::from(principal),
                    periods,
                    Decimal::from(interest),
                )
                .unwrap();
                for p in &r.payments {
                    let remaining = u64::from(periods - p.month + 1);
                    let num = principal * (1200 + interest * remaining);
                    let den = 1200 * u64::from(periods);
                    let expected = Decimal::from(num.div_ceil(den));
                    assert_eq!(
                        p.payment, expected,
                        "P={principal} n={periods} I={interest}% month {}",
                        p.month
                    );
                }
            }
        }
    }
}

#[test]
fn test_huge_principal_is_an_error_not_a_panic() {
    let req = LoanRequest {
        loan_type: Some("diff".into()),
        principal: Some(dec!(10_000_000_000_000_000_000_000_000_000)),
        periods: Some(12),
        interest: Some(dec!(10)),
        ..Default::default()
    };
    assert!(matches!(
        analyze_loan(&req),
        Err(LoanCalcError::FinancialImpossibility(_))
    ));
}
