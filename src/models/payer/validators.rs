//! Payer rule catalog (codes 3xx).

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{
    functional::{
        predicates::{not, null_value, string_empty_or_null},
        validation_engine::RuleChain,
    },
    models::{
        address::{validators::address_validator, Address},
        custom_predicates::{has_minimum_age_of, has_valid_email},
        payer::Payer,
    },
};

pub const MINIMUM_PAYER_AGE: i32 = 18;

static PAYER_VALIDATOR: Lazy<Arc<RuleChain<Payer>>> =
    Lazy::new(|| Arc::new(payer_rules(address_validator())));

pub fn payer_validator() -> Arc<RuleChain<Payer>> {
    Arc::clone(&PAYER_VALIDATOR)
}

/// Builds the payer chain around a given address chain, e.g. one created
/// with zipcode verification.
pub fn payer_rules(address: Arc<RuleChain<Address>>) -> RuleChain<Payer> {
    RuleChain::builder()
        .rule_for("payer.firstName", |p: &Payer| p.first_name.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("301")
                .with_message("payer's first name not provided")
        })
        .rule_for("payer.lastName", |p: &Payer| p.last_name.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("302")
                .with_message("payer's last name not provided")
        })
        .rule_for("payer.birthday", |p: &Payer| p.birthday.as_ref(), |rules| {
            rules
                .must(not(null_value()))
                .with_code("303")
                .with_message("payer's birthday not provided")
                .critical()
                .must(has_minimum_age_of(MINIMUM_PAYER_AGE))
                .with_code("304")
                .with_message("payer's age must be at least 18")
        })
        .rule_for("payer.email", |p: &Payer| p.email.as_deref(), |rules| {
            rules
                .must(has_valid_email())
                .with_code("305")
                .with_message(
                    "payer's e-mail must be provided and follow the pattern: 'e-mail@provider.extension'",
                )
        })
        .rule_for("payer.billingAddress", |p: &Payer| p.billing_address.as_ref(), |rules| {
            rules
                .must(not(null_value()))
                .with_code("306")
                .with_message("payer's billing address not provided")
                .critical()
                .whenever(not(null_value()))
                .with_prefix("payer.")
                .with_validator(address)
        })
        .build()
}
