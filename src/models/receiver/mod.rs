pub mod validators;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::models::address::Address;

/// The party a billing is paid to.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Receiver {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub birthday: Option<NaiveDate>,
    pub email: Option<String>,
    pub address: Option<Address>,
}
