//! Accounting period types.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use folio_shared::types::{AccountingPeriodId, BusinessId, UserId};
use serde::{Deserialize, Serialize};

/// Status of an accounting period.
///
/// There is no transition back from `Closed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodStatus {
    /// Period is open for posting.
    Open,
    /// Period is closed; no new entries dated inside it may be posted.
    Closed,
}

/// An accounting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountingPeriod {
    /// Unique identifier.
    pub id: AccountingPeriodId,
    /// Business this period belongs to.
    pub business_id: BusinessId,
    /// Period name (e.g., "January 2026").
    pub name: String,
    /// Start date of the period.
    pub start_date: NaiveDate,
    /// End date of the period.
    pub end_date: NaiveDate,
    /// Current status.
    pub status: PeriodStatus,
    /// When the period was closed.
    pub closed_at: Option<DateTime<Utc>>,
    /// Who closed the period.
    pub closed_by: Option<UserId>,
}

impl AccountingPeriod {
    /// Creates an open monthly period ending at `period_end`.
    ///
    /// The start date is the first day of the month containing
    /// `period_end`; the name derives from the same month.
    #[must_use]
    pub fn monthly(business_id: BusinessId, period_end: NaiveDate) -> Self {
        Self {
            id: AccountingPeriodId::new(),
            business_id,
            name: period_end.format("%B %Y").to_string(),
            start_date: period_end.with_day(1).unwrap_or(period_end),
            end_date: period_end,
            status: PeriodStatus::Open,
            closed_at: None,
            closed_by: None,
        }
    }

    /// Returns true if entries can still be posted to this period.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.status == PeriodStatus::Open
    }

    /// Returns true if the period has been closed.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == PeriodStatus::Closed
    }

    /// Returns true if the given date falls within this period.
    #[must_use]
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date >= self.start_date && date <= self.end_date
    }

    /// Marks the period closed.
    pub fn close(&mut self, closed_at: DateTime<Utc>, closed_by: UserId) {
        self.status = PeriodStatus::Closed;
        self.closed_at = Some(closed_at);
        self.closed_by = Some(closed_by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(date(2026, 1, 31), "January 2026", date(2026, 1, 1))]
    #[case(date(2026, 2, 28), "February 2026", date(2026, 2, 1))]
    #[case(date(2025, 12, 15), "December 2025", date(2025, 12, 1))]
    fn test_monthly_period_bounds(
        #[case] period_end: NaiveDate,
        #[case] expected_name: &str,
        #[case] expected_start: NaiveDate,
    ) {
        let period = AccountingPeriod::monthly(BusinessId::new(), period_end);
        assert_eq!(period.name, expected_name);
        assert_eq!(period.start_date, expected_start);
        assert_eq!(period.end_date, period_end);
        assert!(period.is_open());
    }

    #[test]
    fn test_contains_date() {
        let period = AccountingPeriod::monthly(BusinessId::new(), date(2026, 1, 31));
        assert!(period.contains_date(date(2026, 1, 1)));
        assert!(period.contains_date(date(2026, 1, 31)));
        assert!(!period.contains_date(date(2026, 2, 1)));
        assert!(!period.contains_date(date(2025, 12, 31)));
    }

    #[test]
    fn test_close_sets_audit_fields() {
        let mut period = AccountingPeriod::monthly(BusinessId::new(), date(2026, 1, 31));
        let user = UserId::new();
        period.close(Utc::now(), user);

        assert!(period.is_closed());
        assert!(period.closed_at.is_some());
        assert_eq!(period.closed_by, Some(user));
    }
}
