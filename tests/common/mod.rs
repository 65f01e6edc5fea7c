#![allow(dead_code)]

use billing_validator::functional::predicates::{plus_years, today};
use billing_validator::models::{
    address::Address,
    billing::{Billing, BillingStatus},
    payer::Payer,
    receiver::Receiver,
};
use chrono::{Duration, NaiveDate};
use rust_decimal::Decimal;

pub fn address(country: &str) -> Address {
    Address {
        zipcode: Some("90210".into()),
        address_line1: Some("9 Sunset Boulevard".into()),
        address_line2: Some("Suite 4".into()),
        city: Some("Beverly Hills".into()),
        state: Some("CA".into()),
        country: Some(country.into()),
    }
}

pub fn payer_born(birthday: Option<NaiveDate>) -> Payer {
    Payer {
        first_name: Some("Ana".into()),
        last_name: Some("Lima".into()),
        birthday,
        email: Some("ana.lima@provider.com".into()),
        billing_address: Some(address("us")),
    }
}

pub fn receiver() -> Receiver {
    Receiver {
        first_name: Some("Carlos".into()),
        last_name: Some("Souza".into()),
        birthday: plus_years(today(), -40),
        email: Some("carlos@store.com.br".into()),
        address: Some(address("ca")),
    }
}

pub fn billing() -> Billing {
    let due_date = today() + Duration::days(5);
    Billing {
        id: None,
        receiver: Some(receiver()),
        payer: Some(payer_born(plus_years(today(), -30))),
        balance: Some(Decimal::new(2_500_00, 2)),
        due_date: Some(due_date),
        accept_past_payment: Some(true),
        expiration_date: Some(due_date + Duration::days(60)),
        apply_fine_for_past_payment: Some(true),
        fine_amount: Some(Decimal::new(25_00, 2)),
        additional_info: Some(vec![Some("invoice 42".into()), Some("net 30".into())]),
        billing_status: Some(BillingStatus::Open),
    }
}
