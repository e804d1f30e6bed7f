//! Billing frequency and the renewal-date offset it implies.

use serde::{Deserialize, Serialize};

/// How often a subscription bills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingFrequency {
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl BillingFrequency {
    /// Fixed day-count added to the start date to derive a missing
    /// renewal date.
    ///
    /// Known limitation: monthly and yearly use flat 30/365-day offsets
    /// rather than calendar arithmetic. This matches the upstream billing
    /// data and must not be changed without a data migration.
    pub fn renewal_offset_days(&self) -> i64 {
        match self {
            BillingFrequency::Daily => 1,
            BillingFrequency::Weekly => 7,
            BillingFrequency::Monthly => 30,
            BillingFrequency::Yearly => 365,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BillingFrequency::Daily => "daily",
            BillingFrequency::Weekly => "weekly",
            BillingFrequency::Monthly => "monthly",
            BillingFrequency::Yearly => "yearly",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_match_billing_periods() {
        assert_eq!(BillingFrequency::Daily.renewal_offset_days(), 1);
        assert_eq!(BillingFrequency::Weekly.renewal_offset_days(), 7);
        assert_eq!(BillingFrequency::Monthly.renewal_offset_days(), 30);
        assert_eq!(BillingFrequency::Yearly.renewal_offset_days(), 365);
    }

    #[test]
    fn serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&BillingFrequency::Monthly).unwrap(),
            "\"monthly\""
        );
        let parsed: BillingFrequency = serde_json::from_str("\"yearly\"").unwrap();
        assert_eq!(parsed, BillingFrequency::Yearly);
    }

    #[test]
    fn unknown_frequency_is_rejected() {
        assert!(serde_json::from_str::<BillingFrequency>("\"fortnightly\"").is_err());
    }
}
