//! Pure reminder-schedule computation.
//!
//! The durable workflow collaborator owns sleeping and email dispatch;
//! this module supplies the date math it calls into: which dates ahead of
//! a renewal deserve a reminder, and the forward-looking window used to
//! select subscriptions that renew soon.

use crate::domain::foundation::Timestamp;

/// Days before the renewal date on which a reminder is sent.
pub const REMINDER_LEAD_DAYS: [i64; 4] = [7, 5, 2, 1];

/// Length of the due-soon window used by the upcoming-renewals query.
pub const DUE_SOON_WINDOW_DAYS: i64 = 7;

/// Reminder dates for a renewal, ordered furthest-out first.
pub fn reminder_dates(renewal_date: Timestamp) -> Vec<Timestamp> {
    REMINDER_LEAD_DAYS
        .iter()
        .map(|days| renewal_date.minus_days(*days))
        .collect()
}

/// The `[now, now + 7 days]` window, inclusive on both ends.
pub fn due_soon_window(now: Timestamp) -> (Timestamp, Timestamp) {
    (now, now.add_days(DUE_SOON_WINDOW_DAYS))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(s: &str) -> Timestamp {
        Timestamp::parse_rfc3339(s).unwrap()
    }

    #[test]
    fn reminder_dates_are_lead_days_before_renewal() {
        let renewal = ts("2024-02-01T00:00:00Z");
        let dates = reminder_dates(renewal);

        assert_eq!(
            dates,
            vec![
                ts("2024-01-25T00:00:00Z"),
                ts("2024-01-27T00:00:00Z"),
                ts("2024-01-30T00:00:00Z"),
                ts("2024-01-31T00:00:00Z"),
            ]
        );
    }

    #[test]
    fn reminder_dates_all_precede_the_renewal() {
        let renewal = ts("2024-02-01T00:00:00Z");
        for date in reminder_dates(renewal) {
            assert!(date.is_before(&renewal));
        }
    }

    #[test]
    fn due_soon_window_spans_seven_days_from_now() {
        let now = ts("2024-01-01T00:00:00Z");
        let (from, to) = due_soon_window(now);
        assert_eq!(from, now);
        assert_eq!(to, ts("2024-01-08T00:00:00Z"));
    }
}
