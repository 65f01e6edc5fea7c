//! Known-good records for unit tests.

use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

use crate::functional::predicates::today;
use crate::models::{
    address::Address,
    billing::{Billing, BillingStatus},
    payer::Payer,
    receiver::Receiver,
};

pub fn valid_address() -> Address {
    Address {
        zipcode: Some("10001".into()),
        address_line1: Some("350 Fifth Avenue".into()),
        address_line2: None,
        city: Some("New York".into()),
        state: Some("NY".into()),
        country: Some("us".into()),
    }
}

pub fn valid_payer() -> Payer {
    Payer {
        first_name: Some("John".into()),
        last_name: Some("Doe".into()),
        birthday: NaiveDate::from_ymd_opt(1990, 5, 17),
        email: Some("john.doe@mail.com".into()),
        billing_address: Some(valid_address()),
    }
}

pub fn valid_receiver() -> Receiver {
    Receiver {
        first_name: Some("Jane".into()),
        last_name: Some("Roe".into()),
        birthday: NaiveDate::from_ymd_opt(1985, 11, 2),
        email: Some("jane.roe@shop.co.uk".into()),
        address: Some(valid_address()),
    }
}

pub fn valid_billing() -> Billing {
    let due_date = today() + Duration::days(10);
    Billing {
        id: None,
        receiver: Some(valid_receiver()),
        payer: Some(valid_payer()),
        balance: Some(Decimal::new(15_000, 2)),
        due_date: Some(due_date),
        accept_past_payment: Some(true),
        expiration_date: Some(due_date + Duration::days(30)),
        apply_fine_for_past_payment: Some(true),
        fine_amount: Some(Decimal::new(500, 2)),
        additional_info: Some(vec![Some("first installment".into())]),
        billing_status: Some(BillingStatus::Open),
    }
}
