//! Domain predicates shared by the payer and receiver catalogs.

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::functional::predicates::{
    local_date_before_or_equal, not, not_null, string_empty_or_null, string_matches, DateBound,
    Predicate,
};

static EMAIL_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^.+@.*\.\w+$").expect("invalid e-mail pattern"));

/// Birthday at least `years` years ago, the anniversary day included.
pub fn has_minimum_age_of(years: i32) -> Predicate<NaiveDate> {
    not_null().and(local_date_before_or_equal(DateBound::years_from_today(-years)))
}

/// Non-blank and shaped like `e-mail@provider.extension`.
pub fn has_valid_email() -> Predicate<str> {
    not(string_empty_or_null()).and(string_matches(EMAIL_PATTERN.clone()))
}
