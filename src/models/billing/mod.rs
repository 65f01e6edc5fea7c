//! Billing aggregate: the root record validated on every write.

pub mod status;
pub mod validators;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{payer::Payer, receiver::Receiver};

pub use status::BillingStatus;

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub id: Option<Uuid>,
    pub receiver: Option<Receiver>,
    pub payer: Option<Payer>,
    pub balance: Option<Decimal>,
    pub due_date: Option<NaiveDate>,
    pub accept_past_payment: Option<bool>,
    pub expiration_date: Option<NaiveDate>,
    pub apply_fine_for_past_payment: Option<bool>,
    pub fine_amount: Option<Decimal>,
    pub additional_info: Option<Vec<Option<String>>>,
    pub billing_status: Option<BillingStatus>,
}

impl Billing {
    pub fn with_id(self, id: Uuid) -> Self {
        Self {
            id: Some(id),
            ..self
        }
    }
}
