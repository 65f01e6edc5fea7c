//! Address rule catalog (codes 4xx).
//!
//! Field names are bare (`addressLine1`, `zipcode`, ...); the payer and
//! receiver dispatches add the `payer.` / `receiver.` prefix.

use std::sync::Arc;

use once_cell::sync::Lazy;

use crate::{
    functional::{
        predicates::{is_number, not, null_value, string_empty_or_null, string_in, Predicate},
        validation_engine::{RuleChain, RuleChainBuilder},
    },
    models::address::{Address, Country},
    services::zipcode_service::ZipcodeVerifier,
};

const ACCEPTED_COUNTRIES: [Country; 3] = [Country::UnitedStates, Country::Canada, Country::Mexico];

static ADDRESS_VALIDATOR: Lazy<Arc<RuleChain<Address>>> =
    Lazy::new(|| Arc::new(address_rules(None).build()));

/// Shared address chain without remote zipcode verification.
pub fn address_validator() -> Arc<RuleChain<Address>> {
    Arc::clone(&ADDRESS_VALIDATOR)
}

/// Address chain that also asks `verifier` about zipcodes that passed the
/// format checks (rule 410).
pub fn address_validator_with_verifier(verifier: Arc<dyn ZipcodeVerifier>) -> Arc<RuleChain<Address>> {
    Arc::new(address_rules(Some(verifier)).build())
}

fn address_rules(verifier: Option<Arc<dyn ZipcodeVerifier>>) -> RuleChainBuilder<Address> {
    RuleChain::builder()
        .rule_for("addressLine1", |a: &Address| a.address_line1.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("401")
                .with_message("address line 1 not provided")
        })
        .rule_for("addressLine2", |a: &Address| a.address_line2.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .when(not(null_value()))
                .with_code("402")
                .with_message("address line 2 not provided")
        })
        .rule_for("city", |a: &Address| a.city.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("403")
                .with_message("city not provided")
        })
        .rule_for("state", |a: &Address| a.state.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("404")
                .with_message("state not provided")
        })
        .rule_for("country", |a: &Address| a.country.as_deref(), |rules| {
            rules
                .must(not(string_empty_or_null()))
                .with_code("405")
                .with_message("country not provided")
                .critical()
                .must(Predicate::present(Country::exists))
                .with_code("406")
                .with_message(format!(
                    "invalid country. Please, use one of the following: {}",
                    Country::all_countries()
                ))
                .critical()
                .must(string_in(ACCEPTED_COUNTRIES.iter().map(Country::code)))
                .with_code("407")
                .with_message("only US, Canada and Mexico countries are allowed for this transaction")
        })
        .rule_for("zipcode", |a: &Address| a.zipcode.as_deref(), |rules| {
            let rules = rules
                .must(not(string_empty_or_null()))
                .with_code("408")
                .with_message("zip code not provided")
                .critical()
                .must(is_number())
                .with_code("409")
                .with_message("incorrect zip code format. Only numbers are accepted")
                .critical();

            match verifier {
                Some(verifier) => rules
                    .must(Predicate::present(move |zipcode: &str| {
                        verifier.is_zipcode_valid(zipcode)
                    }))
                    .with_code("410")
                    .with_message("zip code could not be verified"),
                None => rules,
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::functional::validation_rules::ValidationError;
    use crate::models::fixtures::valid_address;
    use rstest::rstest;
    use serde_json::{json, Value};

    struct RejectAll;

    impl ZipcodeVerifier for RejectAll {
        fn is_zipcode_valid(&self, _zipcode: &str) -> bool {
            false
        }
    }

    #[test]
    fn test_valid_address_passes() {
        assert!(address_validator().validate(&valid_address()).is_valid());
    }

    #[test]
    fn test_missing_mandatory_fields() {
        let result = address_validator().validate(&Address::default());
        assert_eq!(result.codes(), vec!["401", "403", "404", "405", "408"]);
    }

    #[rstest]
    #[case(None, true)]
    #[case(Some("apt 12"), true)]
    #[case(Some(""), false)]
    #[case(Some("   "), false)]
    fn test_address_line2_only_checked_when_present(
        #[case] line2: Option<&str>,
        #[case] valid: bool,
    ) {
        let address = Address {
            address_line2: line2.map(str::to_string),
            ..valid_address()
        };
        let result = address_validator().validate(&address);
        assert_eq!(result.is_valid(), valid);
        assert_eq!(result.has_code("402"), !valid);
    }

    #[test]
    fn test_unknown_country_short_circuits_allow_list() {
        let address = Address {
            country: Some("am".into()),
            ..valid_address()
        };
        let result = address_validator().validate(&address);
        assert_eq!(
            result.errors(),
            &[ValidationError::new(
                "406",
                "country",
                "invalid country. Please, use one of the following: us,mx,ca,br,ir,en",
                json!("am")
            )]
        );
    }

    #[test]
    fn test_known_but_unsupported_country() {
        let address = Address {
            country: Some("br".into()),
            ..valid_address()
        };
        let result = address_validator().validate(&address);
        assert_eq!(result.codes(), vec!["407"]);
    }

    #[test]
    fn test_country_codes_are_case_sensitive() {
        let address = Address {
            country: Some("US".into()),
            ..valid_address()
        };
        assert_eq!(address_validator().validate(&address).codes(), vec!["406"]);
    }

    #[rstest]
    #[case(None, "408")]
    #[case(Some(""), "408")]
    #[case(Some("12a45"), "409")]
    #[case(Some("12-345"), "409")]
    fn test_zipcode_rules(#[case] zipcode: Option<&str>, #[case] code: &str) {
        let address = Address {
            zipcode: zipcode.map(str::to_string),
            ..valid_address()
        };
        let result = address_validator().validate(&address);
        assert_eq!(result.codes(), vec![code]);
        let expected = zipcode.map_or(Value::Null, |z| json!(z));
        assert_eq!(result.errors()[0].attempted_value, expected);
    }

    #[test]
    fn test_verifier_rule_runs_after_format_checks() {
        let chain = address_validator_with_verifier(Arc::new(RejectAll));

        let result = chain.validate(&valid_address());
        assert_eq!(result.codes(), vec!["410"]);

        let malformed = Address {
            zipcode: Some("abc".into()),
            ..valid_address()
        };
        assert_eq!(chain.validate(&malformed).codes(), vec!["409"]);
    }
}
