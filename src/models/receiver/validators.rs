//! Receiver rule catalog (codes 5xx).

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
        receiver::Receiver,
    },
};

pub const MINIMUM_RECEIVER_AGE: i32 = 21;

static RECEIVER_VALIDATOR: Lazy<Arc<RuleChain<Receiver>>> =
    Lazy::new(|| Arc::new(receiver_rules(address_validator())));

pub fn receiver_validator() -> Arc<RuleChain<Receiver>> {
    Arc::clone(&RECEIVER_VALIDATOR)
}

/// Builds the receiver chain around a given address chain, e.g. one created
/// with zipcode verification.
pub fn receiver_rules(address: Arc<RuleChain<Address>>) -> RuleChain<Receiver> {
    RuleChain::builder()
        .rule_for("receiver.firstName", |r: &Receiver| r.first_name.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("501")
                .with_message("receiver's first name not provided")
        })
        .rule_for("receiver.lastName", |r: &Receiver| r.last_name.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("502")
                .with_message("receiver's last name not provided")
        })
        .rule_for("receiver.birthday", |r: &Receiver| r.birthday.as_ref(), |rules| {
            rules
                .must(not(null_value()))
                .with_code("503")
                .with_message("receiver's birthday not provided")
                .critical()
                .must(has_minimum_age_of(MINIMUM_RECEIVER_AGE))
                .with_code("504")
                .with_message("receiver's age must be at least 21")
        })
        .rule_for("receiver.email", |r: &Receiver| r.email.as_deref(), |rules| {
            rules
                .must(has_valid_email())
                .with_code("505")
                .with_message(
                    "receiver's e-mail must be provided and follow the pattern: 'e-mail@provider.extension'",
                )
        })
        .rule_for("receiver.billingAddress", |r: &Receiver| r.address.as_ref(), |rules| {
            rules
                .must(not(null_value()))
                .with_code("506")
                .with_message("receiver's billing address not provided")
                .critical()
                .whenever(not(null_value()))
                .with_prefix("receiver.")
                .with_validator(address)
        })
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::predicates::{plus_years, today};
    use crate::models::fixtures::{valid_address, valid_receiver};
    use chrono::Duration;
    use serde_json::json;

    #[test]
    fn test_valid_receiver_passes() {
        assert!(receiver_validator().validate(&valid_receiver()).is_valid());
    }

    #[test]
    fn test_empty_receiver_reports_every_group() {
        let result = receiver_validator().validate(&Receiver::default());
        assert_eq!(result.codes(), vec!["501", "502", "503", "505", "506"]);
    }

    #[test]
    fn test_birthday_exactly_twenty_one_years_ago_is_accepted() {
        let receiver = Receiver {
            birthday: plus_years(today(), -MINIMUM_RECEIVER_AGE),
            ..valid_receiver()
        };
        assert!(receiver_validator().validate(&receiver).is_valid());
    }

    #[test]
    fn test_one_day_short_of_twenty_one_is_rejected() {
        let birthday = plus_years(today(), -MINIMUM_RECEIVER_AGE).unwrap() + Duration::days(1);
        let receiver = Receiver {
            birthday: Some(birthday),
            ..valid_receiver()
        };
        let result = receiver_validator().validate(&receiver);
        assert_eq!(result.codes(), vec!["504"]);
        assert_eq!(result.errors()[0].field, "receiver.birthday");
        assert_eq!(result.errors()[0].attempted_value, json!(birthday));
    }

    #[test]
    fn test_invalid_email() {
        let receiver = Receiver {
            email: Some("john.doe".into()),
            ..valid_receiver()
        };
        let result = receiver_validator().validate(&receiver);
        assert_eq!(result.codes(), vec!["505"]);
        assert_eq!(result.errors()[0].attempted_value, json!("john.doe"));
    }

    #[test]
    fn test_address_errors_are_prefixed() {
        let receiver = Receiver {
            address: Some(Address {
                city: None,
                country: Some("br".into()),
                ..valid_address()
            }),
            ..valid_receiver()
        };
        let result = receiver_validator().validate(&receiver);
        let fields: Vec<_> = result.errors().iter().map(|e| e.field.as_str()).collect();
        assert_eq!(result.codes(), vec!["403", "407"]);
        assert_eq!(fields, vec!["receiver.city", "receiver.country"]);
    }
}
