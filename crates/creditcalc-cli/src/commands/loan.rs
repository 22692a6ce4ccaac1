use clap::Args;
use log::debug;
use rust_decimal::Decimal;

use creditcalc_core::loan::{self, LoanOutput, LoanRequest};
use creditcalc_core::ComputationOutput;

use crate::input;

/// Loan parameters. Supply any three of payment, principal and periods
/// together with the interest rate.
#[derive(Args, Debug, Default)]
pub struct LoanArgs {
    /// Path to JSON input file (individual flags override its values)
    #[arg(long)]
    pub input: Option<String>,

    /// Repayment scheme: "annuity" or "diff"
    #[arg(long = "type", value_name = "TYPE")]
    pub loan_type: Option<String>,

    /// Monthly payment
    #[arg(long, allow_negative_numbers = true)]
    pub payment: Option<Decimal>,

    /// Loan principal
    #[arg(long, allow_negative_numbers = true)]
    pub principal: Option<Decimal>,

    /// Number of monthly payments
    #[arg(long, allow_negative_numbers = true)]
    pub periods: Option<i64>,

    /// Annual interest rate in percent, without the % sign
    #[arg(long, allow_negative_numbers = true)]
    pub interest: Option<Decimal>,
}

impl LoanArgs {
    fn to_request(&self) -> LoanRequest {
        LoanRequest {
            loan_type: self.loan_type.clone(),
            payment: self.payment,
            principal: self.principal,
            periods: self.periods,
            interest: self.interest,
        }
    }
}

pub fn run_loan(
    args: &LoanArgs,
) -> Result<ComputationOutput<LoanOutput>, Box<dyn std::error::Error>> {
    let request = if let Some(ref path) = args.input {
        let from_file: LoanRequest = input::file::read_json(path)?;
        debug!("loaded loan request from {path}");
        args.to_request().or(from_file)
    } else {
        args.to_request()
    };

    Ok(loan::analyze_loan(&request)?)
}
