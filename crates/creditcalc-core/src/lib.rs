pub mod error;
pub mod loan;
pub mod time_value;
pub mod types;

pub use error::LoanCalcError;
pub use types::*;

/// Standard result type for all creditcalc operations
pub type LoanCalcResult<T> = Result<T, LoanCalcError>;
