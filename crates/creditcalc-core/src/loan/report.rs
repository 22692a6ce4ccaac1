//! Plain-text rendering of a [`LoanOutput`].

use super::annuity::TermResult;
use super::calculator::LoanOutput;

/// "1 month", "2 months".
pub fn pluralize(count: u32, noun: &str) -> String {
    if count == 1 {
        format!("{count} {noun}")
    } else {
        format!("{count} {noun}s")
    }
}

/// Human-readable repayment term, omitting a zero years or months part.
pub fn describe_term(term: &TermResult) -> String {
    if term.years == 0 {
        pluralize(term.months, "month")
    } else if term.months == 0 {
        pluralize(term.years, "year")
    } else {
        format!(
            "{} and {}",
            pluralize(term.years, "year"),
            pluralize(term.months, "month")
        )
    }
}

/// Output lines, the overpayment always last.
pub fn render_lines(output: &LoanOutput) -> Vec<String> {
    let mut lines = match output {
        LoanOutput::Periods(term) => vec![format!(
            "It will take {} to repay this loan!",
            describe_term(term)
        )],
        LoanOutput::Payment(r) => vec![format!("Your monthly payment = {}!", r.payment)],
        LoanOutput::Principal(r) => vec![format!("Your loan principal = {}!", r.principal)],
        LoanOutput::Schedule(r) => r
            .payments
            .iter()
            .map(|p| format!("Month {}: payment is {}", p.month, p.payment))
            .collect(),
    };
    lines.push(format!("Overpayment = {}", output.overpayment()));
    lines
}
