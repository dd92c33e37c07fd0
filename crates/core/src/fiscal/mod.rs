//! Accounting periods, adjusting entries, and period closing.

pub mod adjusting;
pub mod closing;
pub mod period;

pub use adjusting::AdjustingEntryInput;
pub use closing::{ClosingService, PeriodCloseSummary};
pub use period::{AccountingPeriod, PeriodStatus};
