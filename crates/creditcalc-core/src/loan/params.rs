//! Loan request validation.
//!
//! A [`LoanRequest`] carries whatever the borrower supplied. [`validate`]
//! turns it into a [`LoanQuery`] naming exactly one unknown, or rejects it
//! with [`LoanCalcError::InvalidParameters`]. A zero value is treated the same
//! as an absent one.

use std::fmt;
use std::str::FromStr;

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::LoanCalcError;
use crate::types::{Money, Percent};
use crate::LoanCalcResult;

/// Minimum number of non-empty parameters, the scheme included.
const MIN_SUPPLIED_PARAMS: usize = 4;

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Repayment scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LoanType {
    /// Fixed monthly payment across the loan term.
    Annuity,
    /// Equal principal slices with a shrinking interest portion.
    Differentiated,
}

impl FromStr for LoanType {
    type Err = LoanCalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "annuity" => Ok(LoanType::Annuity),
            "diff" | "differentiated" => Ok(LoanType::Differentiated),
            other => Err(LoanCalcError::invalid(
                "type",
                format!("Unknown loan type '{other}' (expected 'annuity' or 'diff')"),
            )),
        }
    }
}

impl fmt::Display for LoanType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoanType::Annuity => write!(f, "annuity"),
            LoanType::Differentiated => write!(f, "diff"),
        }
    }
}

/// Raw loan parameters as supplied on the command line or in a JSON file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Scheme name: "annuity" or "diff".
    #[serde(rename = "type", default)]
    pub loan_type: Option<String>,
    /// Monthly payment.
    #[serde(default)]
    pub payment: Option<Money>,
    /// Loan principal.
    #[serde(default)]
    pub principal: Option<Money>,
    /// Number of monthly periods.
    #[serde(default)]
    pub periods: Option<i64>,
    /// Annual interest rate in percent (10 = 10%).
    #[serde(default)]
    pub interest: Option<Percent>,
}

impl LoanRequest {
    /// Fill every field left empty here from `other`.
    pub fn or(self, other: LoanRequest) -> LoanRequest {
        LoanRequest {
            loan_type: self.loan_type.or(other.loan_type),
            payment: self.payment.or(other.payment),
            principal: self.principal.or(other.principal),
            periods: self.periods.or(other.periods),
            interest: self.interest.or(other.interest),
        }
    }
}

/// A validated request: the scheme plus the single unknown to solve for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "solve", rename_all = "snake_case")]
pub enum LoanQuery {
    AnnuityPeriods {
        principal: Money,
        payment: Money,
        interest: Percent,
    },
    AnnuityPayment {
        principal: Money,
        periods: u32,
        interest: Percent,
    },
    AnnuityPrincipal {
        payment: Money,
        periods: u32,
        interest: Percent,
    },
    Differentiated {
        principal: Money,
        periods: u32,
        interest: Percent,
    },
}

impl LoanQuery {
    pub fn loan_type(&self) -> LoanType {
        match self {
            LoanQuery::Differentiated { .. } => LoanType::Differentiated,
            _ => LoanType::Annuity,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check a raw request and decide which value to solve for.
pub fn validate(request: &LoanRequest) -> LoanCalcResult<LoanQuery> {
    let loan_type: LoanType = request
        .loan_type
        .as_deref()
        .ok_or_else(|| LoanCalcError::invalid("type", "Loan type is required"))?
        .parse()?;

    let payment = non_empty_money("payment", request.payment)?;
    let principal = non_empty_money("principal", request.principal)?;
    let periods = non_empty_periods(request.periods)?;
    let interest = non_empty_money("interest", request.interest)?;

    if loan_type == LoanType::Differentiated && payment.is_some() {
        return Err(LoanCalcError::invalid(
            "payment",
            "Payment cannot be supplied for a differentiated loan",
        ));
    }

    let interest =
        interest.ok_or_else(|| LoanCalcError::invalid("interest", "Interest rate is required"))?;

    // The scheme and the interest rate are both present at this point.
    let supplied = 2 + [payment.is_some(), principal.is_some(), periods.is_some()]
        .iter()
        .filter(|present| **present)
        .count();
    if supplied < MIN_SUPPLIED_PARAMS {
        return Err(LoanCalcError::invalid(
            "parameters",
            format!("Expected at least {MIN_SUPPLIED_PARAMS} parameters, got {supplied}"),
        ));
    }

    let query = match (loan_type, payment, principal, periods) {
        (LoanType::Annuity, Some(payment), Some(principal), None) => LoanQuery::AnnuityPeriods {
            principal,
            payment,
            interest,
        },
        (LoanType::Annuity, None, Some(principal), Some(periods)) => LoanQuery::AnnuityPayment {
            principal,
            periods,
            interest,
        },
        (LoanType::Annuity, Some(payment), None, Some(periods)) => LoanQuery::AnnuityPrincipal {
            payment,
            periods,
            interest,
        },
        (LoanType::Annuity, Some(_), Some(_), Some(_)) => {
            return Err(LoanCalcError::invalid(
                "parameters",
                "Exactly one of payment, principal and periods must be omitted",
            ));
        }
        (LoanType::Differentiated, None, Some(principal), Some(periods)) => {
            LoanQuery::Differentiated {
                principal,
                periods,
                interest,
            }
        }
        _ => {
            return Err(LoanCalcError::invalid(
                "parameters",
                format!("Unsupported parameter combination for a {loan_type} loan"),
            ));
        }
    };

    debug!("validated loan request: {query:?}");
    Ok(query)
}

fn non_empty_money(field: &str, value: Option<Decimal>) -> LoanCalcResult<Option<Decimal>> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(LoanCalcError::invalid(
            field,
            format!("Value must not be negative, got {v}"),
        )),
        Some(v) if v.is_zero() => Ok(None),
        other => Ok(other),
    }
}

fn non_empty_periods(value: Option<i64>) -> LoanCalcResult<Option<u32>> {
    match value {
        None | Some(0) => Ok(None),
        Some(n) if n < 0 => Err(LoanCalcError::invalid(
            "periods",
            format!("Number of periods must not be negative, got {n}"),
        )),
        Some(n) => u32::try_from(n).map(Some).map_err(|_| {
            LoanCalcError::invalid("periods", format!("Number of periods {n} is too large"))
        }),
    }
}
