pub mod error;
pub mod input;
pub mod loan;
pub mod summary;

pub use error::PayoffError;
pub use input::LoanInput;
pub use loan::{compute_schedule, PaymentRecord, Schedule};
pub use summary::{LoanComparison, LoanSummary};
