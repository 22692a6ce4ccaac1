//! Entry point tying validation, the two solvers and the output envelope
//! together.

use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use super::annuity::{self, PaymentResult, PrincipalResult, TermResult};
use super::differentiated::{self, ScheduleResult};
use super::params::{self, LoanQuery, LoanRequest};
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::LoanCalcResult;

/// Terms beyond this many months get a warning.
const LONG_TERM_MONTHS: u32 = 600;

/// Annual interest above this percentage gets a warning.
const HIGH_INTEREST_PCT: Decimal = dec!(60);

/// Result of a loan calculation, tagged by the value that was solved for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solved_for", rename_all = "snake_case")]
pub enum LoanOutput {
    Periods(TermResult),
    Payment(PaymentResult),
    Principal(PrincipalResult),
    Schedule(ScheduleResult),
}

impl LoanOutput {
    pub fn overpayment(&self) -> Money {
        match self {
            LoanOutput::Periods(r) => r.overpayment,
            LoanOutput::Payment(r) => r.overpayment,
            LoanOutput::Principal(r) => r.overpayment,
            LoanOutput::Schedule(r) => r.overpayment,
        }
    }
}

/// Validate a raw request and compute the missing value.
pub fn analyze_loan(request: &LoanRequest) -> LoanCalcResult<ComputationOutput<LoanOutput>> {
    let query = params::validate(request)?;
    calculate(&query)
}

/// Compute the missing value of an already validated query.
pub fn calculate(query: &LoanQuery) -> LoanCalcResult<ComputationOutput<LoanOutput>> {
    let start = Instant::now();

    let (output, methodology, principal, interest) = match *query {
        LoanQuery::AnnuityPeriods {
            principal,
            payment,
            interest,
        } => (
            LoanOutput::Periods(annuity::solve_periods(principal, payment, interest)?),
            "Annuity repayment term",
            principal,
            interest,
        ),
        LoanQuery::AnnuityPayment {
            principal,
            periods,
            interest,
        } => (
            LoanOutput::Payment(annuity::solve_payment(principal, periods, interest)?),
            "Annuity monthly payment",
            principal,
            interest,
        ),
        LoanQuery::AnnuityPrincipal {
            payment,
            periods,
            interest,
        } => {
            let result = annuity::solve_principal(payment, periods, interest)?;
            let principal = result.principal;
            (
                LoanOutput::Principal(result),
                "Annuity loan principal",
                principal,
                interest,
            )
        }
        LoanQuery::Differentiated {
            principal,
            periods,
            interest,
        } => (
            LoanOutput::Schedule(differentiated::schedule(principal, periods, interest)?),
            "Differentiated repayment schedule",
            principal,
            interest,
        ),
    };

    let warnings = collect_warnings(query, &output, principal, interest);
    for w in &warnings {
        warn!("{w}");
    }

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(methodology, query, warnings, elapsed, output))
}

fn collect_warnings(
    query: &LoanQuery,
    output: &LoanOutput,
    principal: Money,
    interest: Percent,
) -> Vec<String> {
    let mut warnings = Vec::new();

    let term = match (query, output) {
        (_, LoanOutput::Periods(r)) => r.periods,
        (
            LoanQuery::AnnuityPayment { periods, .. }
            | LoanQuery::AnnuityPrincipal { periods, .. }
            | LoanQuery::Differentiated { periods, .. },
            _,
        ) => *periods,
        _ => 0,
    };
    if term > LONG_TERM_MONTHS {
        warnings.push(format!(
            "Repayment term of {term} months exceeds {} years",
            LONG_TERM_MONTHS / 12
        ));
    }

    if interest > HIGH_INTEREST_PCT {
        warnings.push(format!(
            "Annual interest of {interest}% is unusually high"
        ));
    }

    let overpayment = output.overpayment();
    if principal > Decimal::ZERO && overpayment > principal {
        warnings.push(format!(
            "Overpayment {overpayment} exceeds the principal {principal}"
        ));
    }

    warnings
}
