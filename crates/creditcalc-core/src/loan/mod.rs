pub mod annuity;
pub mod calculator;
pub mod differentiated;
pub mod params;
pub mod report;

pub use calculator::{analyze_loan, calculate, LoanOutput};
pub use params::{validate, LoanQuery, LoanRequest, LoanType};
