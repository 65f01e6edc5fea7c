mod common;

use std::sync::Arc;
use std::thread;

use billing_validator::functional::prelude::*;
use billing_validator::models::{
    address::Address,
    billing::{
        validators::{billing_validator, billing_validator_with_verifier},
        Billing,
    },
    payer::Payer,
    receiver::Receiver,
};
use billing_validator::services::zipcode_service::{StubZipcodeService, ZipcodeVerifier};
use chrono::Duration;
use rust_decimal::Decimal;
use serde_json::{json, Value};

fn fields(result: &ValidationResult) -> Vec<&str> {
    result.errors().iter().map(|e| e.field.as_str()).collect()
}

#[test]
fn test_complete_billing_is_valid() {
    let result = billing_validator().validate(&common::billing());
    assert!(result.is_valid(), "unexpected errors: {:?}", result.errors());
    assert_eq!(result, ValidationResult::ok());
}

#[test]
fn test_null_balance_reports_only_101() {
    let billing = Billing {
        balance: None,
        ..common::billing()
    };
    let result = billing_validator().validate(&billing);
    assert_eq!(
        result.errors(),
        &[ValidationError::new("101", "balance", "balance must not be null", Value::Null)]
    );
}

#[test]
fn test_null_due_date_short_circuits_its_group() {
    let billing = Billing {
        due_date: None,
        ..common::billing()
    };
    let result = billing_validator().validate(&billing);
    assert!(result.has_code("104"));
    assert!(!result.has_code("105"));
    assert!(!result.has_code("106"));
    assert_eq!(
        result.errors()[0],
        ValidationError::new("104", "dueDate", "due date not provided", Value::Null)
    );
}

#[test]
fn test_expiration_equal_to_due_date_reports_110() {
    let template = common::billing();
    let billing = Billing {
        expiration_date: template.due_date,
        ..template
    };
    let result = billing_validator().validate(&billing);
    let error = result
        .errors()
        .iter()
        .find(|e| e.code == "110")
        .expect("110 expected");
    assert_eq!(error.field, "expirationDate");
    assert_eq!(error.attempted_value, json!(billing.expiration_date));
}

#[test]
fn test_unknown_country_reports_406_without_407() {
    let billing = Billing {
        payer: Some(Payer {
            billing_address: Some(common::address("am")),
            ..common::payer_born(plus_years(today(), -30))
        }),
        ..common::billing()
    };
    let result = billing_validator().validate(&billing);
    assert_eq!(result.codes(), vec!["406"]);
    assert_eq!(fields(&result), vec!["payer.country"]);
    assert_eq!(result.errors()[0].attempted_value, json!("am"));
}

#[test]
fn test_unsupported_country_reports_407_without_406() {
    let billing = Billing {
        receiver: Some(Receiver {
            address: Some(common::address("br")),
            ..common::receiver()
        }),
        ..common::billing()
    };
    let result = billing_validator().validate(&billing);
    assert_eq!(result.codes(), vec!["407"]);
    assert_eq!(fields(&result), vec!["receiver.country"]);
}

#[test]
fn test_additional_info_empty_and_absent() {
    let empty = Billing {
        additional_info: Some(vec![]),
        ..common::billing()
    };
    let result = billing_validator().validate(&empty);
    assert_eq!(result.codes(), vec!["115"]);
    assert_eq!(fields(&result), vec!["additionalInfo"]);

    let absent = Billing {
        additional_info: None,
        ..common::billing()
    };
    let result = billing_validator().validate(&absent);
    assert!(result.is_valid());
}

#[test]
fn test_payer_minimum_age_boundary() {
    let eighteen = plus_years(today(), -18);
    let on_boundary = Billing {
        payer: Some(common::payer_born(eighteen)),
        ..common::billing()
    };
    assert!(billing_validator().validate(&on_boundary).is_valid());

    let one_day_late = Billing {
        payer: Some(common::payer_born(eighteen.map(|d| d + Duration::days(1)))),
        ..common::billing()
    };
    let result = billing_validator().validate(&one_day_late);
    assert_eq!(result.codes(), vec!["304"]);
    assert_eq!(fields(&result), vec!["payer.birthday"]);
}

#[test]
fn test_empty_billing_reports_every_top_level_group() {
    let result = billing_validator().validate(&Billing::default());
    assert_eq!(
        result.codes(),
        vec!["101", "104", "107", "112", "113", "114"]
    );
}

#[test]
fn test_errors_follow_group_then_dispatch_order() {
    let billing = Billing {
        balance: Some(Decimal::new(50, 2)),
        fine_amount: Some(Decimal::ZERO),
        payer: Some(Payer {
            first_name: None,
            billing_address: Some(Address {
                zipcode: Some("ABC".into()),
                ..common::address("us")
            }),
            ..common::payer_born(plus_years(today(), -30))
        }),
        additional_info: Some(vec![None, Some("ok".into()), Some("".into())]),
        ..common::billing()
    };
    let result = billing_validator().validate(&billing);
    assert_eq!(
        result.codes(),
        vec!["102", "201", "301", "409", "601", "601"]
    );
    assert_eq!(
        fields(&result),
        vec![
            "balance",
            "fineAmount",
            "payer.firstName",
            "payer.zipcode",
            "additionalInfo[0]",
            "additionalInfo[2]"
        ]
    );
}

#[test]
fn test_reused_chain_yields_identical_results() {
    let chain = billing_validator();
    let billing = Billing {
        additional_info: Some(vec![None, None, Some(" ".into())]),
        balance: None,
        ..common::billing()
    };
    let first = chain.validate(&billing);
    let second = chain.validate(&billing);
    assert_eq!(first, second);
    assert_eq!(
        fields(&second),
        vec!["balance", "additionalInfo[0]", "additionalInfo[1]", "additionalInfo[2]"]
    );
}

#[test]
fn test_concurrent_validation_with_shared_chain() {
    let chain = billing_validator();
    let billings: Vec<Billing> = (0..4)
        .map(|n| Billing {
            additional_info: Some(vec![None; n + 1]),
            ..common::billing()
        })
        .collect();

    thread::scope(|scope| {
        for billing in &billings {
            let chain = Arc::clone(&chain);
            scope.spawn(move || {
                for _ in 0..50 {
                    let result = chain.validate(billing);
                    let expected: Vec<String> = (0..billing.additional_info.as_ref().unwrap().len())
                        .map(|i| format!("additionalInfo[{}]", i))
                        .collect();
                    assert_eq!(fields(&result), expected);
                }
            });
        }
    });
}

struct KnownZipcodes(Vec<&'static str>);

impl ZipcodeVerifier for KnownZipcodes {
    fn is_zipcode_valid(&self, zipcode: &str) -> bool {
        self.0.iter().any(|known| *known == zipcode)
    }
}

#[test]
fn test_zipcode_verification_is_opt_in() {
    let verified = billing_validator_with_verifier(Arc::new(KnownZipcodes(vec!["12345"])));
    let result = verified.validate(&common::billing());
    assert_eq!(result.codes(), vec!["410", "410"]);
    assert_eq!(fields(&result), vec!["payer.zipcode", "receiver.zipcode"]);

    assert!(billing_validator().validate(&common::billing()).is_valid());

    let stubbed = billing_validator_with_verifier(Arc::new(StubZipcodeService));
    assert!(stubbed.validate(&common::billing()).is_valid());
}

#[test]
fn test_result_serializes_for_clients() {
    let billing = Billing {
        balance: None,
        ..common::billing()
    };
    let result = billing_validator().validate(&billing);
    assert_eq!(
        serde_json::to_value(&result).unwrap(),
        json!({
            "valid": false,
            "errors": [{
                "code": "101",
                "field": "balance",
                "message": "balance must not be null",
                "attemptedValue": null
            }]
        })
    );
}
