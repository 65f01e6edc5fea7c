use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    #[display(fmt = "open")]
    Open,
    #[display(fmt = "past_due")]
    PastDue,
    #[display(fmt = "paid")]
    Paid,
    #[display(fmt = "canceled")]
    Canceled,
}

impl BillingStatus {
    pub const ALL: [BillingStatus; 4] = [
        BillingStatus::Open,
        BillingStatus::PastDue,
        BillingStatus::Paid,
        BillingStatus::Canceled,
    ];

    /// Case-insensitive lookup by wire value.
    pub fn entry_of(value: &str) -> Option<BillingStatus> {
        let value = value.to_lowercase();
        Self::ALL.into_iter().find(|status| status.to_string() == value)
    }

    pub fn exists(value: &str) -> bool {
        Self::ALL.iter().any(|status| status.to_string() == value)
    }
}
