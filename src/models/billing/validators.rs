//! Billing rule catalog.
//!
//! Codes are partitioned by area: 1xx billing core, 2xx fine, 6xx
//! additional-info items. Payer (3xx), address (4xx) and receiver (5xx) rules
//! are reached through nested dispatches.

use std::sync::Arc;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use rust_decimal::Decimal;

use crate::{
    functional::{
        predicates::{
            compare_fields, empty, greater_than_or_equal, is_false, is_true, less_than_or_equal,
            local_date_after_or_equal_today, local_date_before_or_equal, not, not_null, null_value,
            plus_months, string_empty_or_null, DateBound,
        },
        validation_engine::RuleChain,
    },
    models::{
        address::validators::{address_validator, address_validator_with_verifier},
        billing::Billing,
        payer::{validators::payer_rules, Payer},
        receiver::{validators::receiver_rules, Receiver},
    },
    services::zipcode_service::ZipcodeVerifier,
};

/// Months a past payment may still be accepted after the due date.
pub const PAST_PAYMENT_WINDOW_MONTHS: i32 = 6;

static BILLING_VALIDATOR: Lazy<Arc<RuleChain<Billing>>> = Lazy::new(|| {
    Arc::new(billing_rules(
        Arc::new(payer_rules(address_validator())),
        Arc::new(receiver_rules(address_validator())),
    ))
});

static FINE_VALIDATOR: Lazy<Arc<RuleChain<Billing>>> = Lazy::new(|| Arc::new(fine_rules()));

static ADDITIONAL_INFO_VALIDATOR: Lazy<Arc<RuleChain<Option<String>>>> =
    Lazy::new(|| Arc::new(additional_info_rules()));

/// Shared chain covering the whole billing graph.
pub fn billing_validator() -> Arc<RuleChain<Billing>> {
    Arc::clone(&BILLING_VALIDATOR)
}

/// Billing chain whose payer and receiver addresses are also checked
/// against `verifier`.
pub fn billing_validator_with_verifier(verifier: Arc<dyn ZipcodeVerifier>) -> Arc<RuleChain<Billing>> {
    let address = address_validator_with_verifier(verifier);
    Arc::new(billing_rules(
        Arc::new(payer_rules(Arc::clone(&address))),
        Arc::new(receiver_rules(address)),
    ))
}

pub fn fine_validator() -> Arc<RuleChain<Billing>> {
    Arc::clone(&FINE_VALIDATOR)
}

pub fn additional_info_validator() -> Arc<RuleChain<Option<String>>> {
    Arc::clone(&ADDITIONAL_INFO_VALIDATOR)
}

fn due_date(billing: &Billing) -> Option<&NaiveDate> {
    billing.due_date.as_ref()
}

fn expiration_date(billing: &Billing) -> Option<&NaiveDate> {
    billing.expiration_date.as_ref()
}

fn accept_past_payment(billing: &Billing) -> Option<&bool> {
    billing.accept_past_payment.as_ref()
}

fn apply_fine_for_past_payment(billing: &Billing) -> Option<&bool> {
    billing.apply_fine_for_past_payment.as_ref()
}

fn balance(billing: &Billing) -> Option<&Decimal> {
    billing.balance.as_ref()
}

fn fine_amount(billing: &Billing) -> Option<&Decimal> {
    billing.fine_amount.as_ref()
}

fn billing_rules(payer: Arc<RuleChain<Payer>>, receiver: Arc<RuleChain<Receiver>>) -> RuleChain<Billing> {
    RuleChain::builder()
        .rule_for("balance", balance, |rules| {
            rules
                .must(not(null_value()))
                .with_code("101")
                .with_message("balance must not be null")
                .must(greater_than_or_equal(Decimal::new(100, 2)))
                .when(not(null_value()))
                .with_code("102")
                .with_message("the minimum value for a billing is $1")
                .must(less_than_or_equal(Decimal::new(99_999_999, 2)))
                .when(not(null_value()))
                .with_code("103")
                .with_message("the maximum value for a billing is $999,999.99")
        })
        .rule_for("dueDate", due_date, |rules| {
            rules
                .must(not(null_value()))
                .with_code("104")
                .with_message("due date not provided")
                .critical()
                .must(local_date_after_or_equal_today())
                .with_code("105")
                .with_message("due date must be equal of after today")
                .must(local_date_before_or_equal(DateBound::years_from_today(1)))
                .with_code("106")
                .with_message("due date must not the set to more than one year further the current date")
        })
        .rule_for("acceptPastPayment", accept_past_payment, |rules| {
            rules
                .must(not(null_value()))
                .with_code("107")
                .with_message("accept past payment not provided")
                .critical()
        })
        .rule_for_entity("expirationDate", |rules| {
            let past_payment_window = is_true()
                .on(accept_past_payment)
                .and(not_null().on(due_date));

            rules
                .must(not_null().on(expiration_date))
                .when(is_true().on(accept_past_payment))
                .with_code("108")
                .with_message("expiration date must be provided whenever past payment is accepted")
                .with_attempted_value(|b: &Billing| b.expiration_date)
                .critical()
                .must(null_value().on(expiration_date))
                .when(is_false().on(accept_past_payment))
                .with_code("109")
                .with_message("expiration date must not be provided whenever past payment is not accepted")
                .with_attempted_value(|b: &Billing| b.expiration_date)
                .critical()
                .must(compare_fields(
                    |b: &Billing| b.expiration_date,
                    |b: &Billing| b.due_date,
                    |expiration, due| expiration > due,
                ))
                .when(past_payment_window.clone())
                .with_code("110")
                .with_message("expiration date must be further due date")
                .with_attempted_value(|b: &Billing| b.expiration_date)
                .must(compare_fields(
                    |b: &Billing| b.expiration_date,
                    |b: &Billing| {
                        b.due_date
                            .and_then(|due| plus_months(due, PAST_PAYMENT_WINDOW_MONTHS))
                    },
                    |expiration, limit| expiration <= limit,
                ))
                .when(past_payment_window)
                .with_code("111")
                .with_message("expiration date must be set to more than 6 months past due date")
                .with_attempted_value(|b: &Billing| b.expiration_date)
        })
        .rule_for_entity("applyFineForPastPayment", |rules| {
            rules
                .must(not_null().on(apply_fine_for_past_payment))
                .with_code("112")
                .with_message("flag 'apply fine for past payment' not provided")
                .with_attempted_value(|b: &Billing| b.apply_fine_for_past_payment)
                .critical()
                .whenever(is_true().on(accept_past_payment))
                .with_validator(fine_validator())
        })
        .rule_for("payer", |b: &Billing| b.payer.as_ref(), |rules| {
            rules
                .must(not(null_value()))
                .with_code("113")
                .with_message("payer not provided")
                .critical()
                .whenever(not(null_value()))
                .with_validator(payer)
        })
        .rule_for("receiver", |b: &Billing| b.receiver.as_ref(), |rules| {
            rules
                .must(not(null_value()))
                .with_code("114")
                .with_message("receiver not provided")
                .critical()
                .whenever(not(null_value()))
                .with_validator(receiver)
        })
        .rule_for_each("additionalInfo", |b: &Billing| b.additional_info.as_deref(), |rules| {
            rules
                .must(not(empty()))
                .when(not(null_value()))
                .with_code("115")
                .with_message("additional info list must not be empty")
                .whenever(not(null_value()))
                .with_element_validator(additional_info_validator())
        })
        .build()
}

fn fine_rules() -> RuleChain<Billing> {
    RuleChain::builder()
        .rule_for_entity("fineAmount", |rules| {
            rules
                .must(greater_than_or_equal(Decimal::new(1, 2)).on(fine_amount))
                .when(is_true().on(apply_fine_for_past_payment))
                .with_code("201")
                .with_message("the minimum value for fine amount is $0.01")
                .with_attempted_value(|b: &Billing| b.fine_amount)
                .must(compare_fields(
                    |b: &Billing| b.fine_amount,
                    |b: &Billing| b.balance,
                    |fine, balance| fine < balance,
                ))
                .when(is_true().on(apply_fine_for_past_payment).and(not_null().on(balance)))
                .with_code("202")
                .with_message("the maximum value for fine can not be greater or equal the billing balance")
                .with_attempted_value(|b: &Billing| b.fine_amount)
        })
        .build()
}

fn additional_info_rules() -> RuleChain<Option<String>> {
    RuleChain::builder()
        .rule_for("additionalInfo", |item: &Option<String>| item.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("601")
                .with_indexed_field_name("additionalInfo")
                .with_message("additional info cannot be empty or null")
        })
        .build()
}
