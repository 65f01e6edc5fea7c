//! Composable Predicates
//!
//! Pure boolean tests used by rule chains. Every predicate receives an
//! `Option<&T>` so that an absent attribute can be inspected without
//! dereferencing it first. Apart from [`null_value`] and [`not_null`], every
//! predicate in this module treats an absent value as a failed test.
//!
//! Predicates are cheap to clone (the test closure is shared behind an `Arc`)
//! and can be combined with [`Predicate::and`], [`Predicate::or`] and [`not`].
//! [`Predicate::on`] lifts a predicate over a field value into a predicate over
//! the whole record, which is how cross-field and entity-level rules are built.

use std::collections::HashSet;
use std::fmt;
use std::ops::Not;
use std::sync::Arc;

use chrono::{Local, Months, NaiveDate};
use regex::Regex;

type TestFn<T> = dyn Fn(Option<&T>) -> bool + Send + Sync;

/// A reusable, side-effect free test over an optional value.
pub struct Predicate<T: ?Sized> {
    test: Arc<TestFn<T>>,
}

impl<T: ?Sized> Clone for Predicate<T> {
    fn clone(&self) -> Self {
        Self {
            test: Arc::clone(&self.test),
        }
    }
}

impl<T: ?Sized> fmt::Debug for Predicate<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Predicate")
    }
}

impl<T: ?Sized + 'static> Predicate<T> {
    /// Wraps a raw test that decides by itself how to treat an absent value.
    pub fn new<F>(test: F) -> Self
    where
        F: Fn(Option<&T>) -> bool + Send + Sync + 'static,
    {
        Self {
            test: Arc::new(test),
        }
    }

    /// Wraps a test over present values. Absent values always fail.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_validator::functional::predicates::Predicate;
    ///
    /// let positive = Predicate::present(|value: &i32| *value > 0);
    /// assert!(positive.test(Some(&1)));
    /// assert!(!positive.test(None));
    /// ```
    pub fn present<F>(test: F) -> Self
    where
        F: Fn(&T) -> bool + Send + Sync + 'static,
    {
        Self::new(move |value| value.is_some_and(|value| test(value)))
    }

    pub fn test(&self, value: Option<&T>) -> bool {
        (self.test)(value)
    }

    /// Short-circuiting conjunction.
    pub fn and(self, other: Predicate<T>) -> Self {
        Self::new(move |value| self.test(value) && other.test(value))
    }

    /// Short-circuiting disjunction.
    pub fn or(self, other: Predicate<T>) -> Self {
        Self::new(move |value| self.test(value) || other.test(value))
    }

    pub fn negate(self) -> Self {
        Self::new(move |value| !self.test(value))
    }

    /// Evaluates this predicate against a projection of a record.
    ///
    /// The projection receives the record and returns the attribute to test.
    /// When the record itself is absent the attribute is treated as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_validator::functional::predicates::is_true;
    /// use billing_validator::models::billing::Billing;
    ///
    /// let flag_set = is_true().on(|billing: &Billing| billing.accept_past_payment.as_ref());
    /// assert!(!flag_set.test(Some(&Billing::default())));
    /// ```
    pub fn on<E, F>(self, accessor: F) -> Predicate<E>
    where
        E: ?Sized + 'static,
        F: for<'a> Fn(&'a E) -> Option<&'a T> + Send + Sync + 'static,
    {
        Predicate::new(move |entity: Option<&E>| self.test(entity.and_then(|entity| accessor(entity))))
    }
}

impl<T: ?Sized + 'static> Not for Predicate<T> {
    type Output = Predicate<T>;

    fn not(self) -> Self::Output {
        self.negate()
    }
}

/// Logical negation, reads naturally in rule declarations: `not(null_value())`.
pub fn not<T: ?Sized + 'static>(predicate: Predicate<T>) -> Predicate<T> {
    predicate.negate()
}

// ---------------------------------------------------------------------------
// Presence
// ---------------------------------------------------------------------------

pub fn null_value<T: ?Sized + 'static>() -> Predicate<T> {
    Predicate::new(|value: Option<&T>| value.is_none())
}

pub fn not_null<T: ?Sized + 'static>() -> Predicate<T> {
    Predicate::new(|value: Option<&T>| value.is_some())
}

// ---------------------------------------------------------------------------
// Strings
// ---------------------------------------------------------------------------

/// True for an absent string or one that only contains whitespace.
pub fn string_empty_or_null() -> Predicate<str> {
    Predicate::new(|value: Option<&str>| value.map_or(true, |value| value.trim().is_empty()))
}

/// True for a non-empty string made only of ASCII digits.
pub fn is_number() -> Predicate<str> {
    Predicate::present(|value: &str| !value.is_empty() && value.chars().all(|c| c.is_ascii_digit()))
}

pub fn string_matches(pattern: Regex) -> Predicate<str> {
    Predicate::present(move |value: &str| pattern.is_match(value))
}

/// Membership test against a fixed set of accepted strings (case-sensitive).
pub fn string_in<I, S>(accepted: I) -> Predicate<str>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let accepted: HashSet<String> = accepted.into_iter().map(Into::into).collect();
    Predicate::present(move |value: &str| accepted.contains(value))
}

// ---------------------------------------------------------------------------
// Booleans
// ---------------------------------------------------------------------------

pub fn is_true() -> Predicate<bool> {
    Predicate::present(|value: &bool| *value)
}

pub fn is_false() -> Predicate<bool> {
    Predicate::present(|value: &bool| !*value)
}

// ---------------------------------------------------------------------------
// Comparables
// ---------------------------------------------------------------------------

pub fn greater_than<T>(bound: T) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Predicate::present(move |value: &T| *value > bound)
}

pub fn greater_than_or_equal<T>(bound: T) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Predicate::present(move |value: &T| *value >= bound)
}

pub fn less_than<T>(bound: T) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Predicate::present(move |value: &T| *value < bound)
}

pub fn less_than_or_equal<T>(bound: T) -> Predicate<T>
where
    T: PartialOrd + Send + Sync + 'static,
{
    Predicate::present(move |value: &T| *value <= bound)
}

/// Compares two attributes of the same record.
///
/// Fails when either side is absent, so a comparison never passes by default.
///
/// # Examples
///
/// ```
/// use billing_validator::functional::predicates::compare_fields;
/// use billing_validator::models::billing::Billing;
///
/// // expiration date strictly after due date
/// let after_due = compare_fields(
///     |billing: &Billing| billing.expiration_date,
///     |billing: &Billing| billing.due_date,
///     |expiration, due| expiration > due,
/// );
/// ```
pub fn compare_fields<E, T, L, R, C>(left: L, right: R, comparator: C) -> Predicate<E>
where
    E: 'static,
    L: Fn(&E) -> Option<T> + Send + Sync + 'static,
    R: Fn(&E) -> Option<T> + Send + Sync + 'static,
    C: Fn(&T, &T) -> bool + Send + Sync + 'static,
{
    Predicate::present(move |entity: &E| match (left(entity), right(entity)) {
        (Some(left), Some(right)) => comparator(&left, &right),
        _ => false,
    })
}

// ---------------------------------------------------------------------------
// Collections
// ---------------------------------------------------------------------------

/// True for a present, empty slice. Negate it to require at least one element.
pub fn empty<T: 'static>() -> Predicate<[T]> {
    Predicate::present(|items: &[T]| items.is_empty())
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Current local date. Read at evaluation time so long-lived rule chains
/// never compare against a stale day.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Adds (or subtracts, for negative values) whole months, clamping to the
/// last day of the target month.
pub fn plus_months(date: NaiveDate, months: i32) -> Option<NaiveDate> {
    let delta = Months::new(months.unsigned_abs());
    if months >= 0 {
        date.checked_add_months(delta)
    } else {
        date.checked_sub_months(delta)
    }
}

pub fn plus_years(date: NaiveDate, years: i32) -> Option<NaiveDate> {
    plus_months(date, years.checked_mul(12)?)
}

pub fn today_plus_years(years: i32) -> Option<NaiveDate> {
    plus_years(today(), years)
}

pub fn today_minus_years(years: i32) -> Option<NaiveDate> {
    plus_years(today(), years.checked_neg()?)
}

/// The date a date predicate compares against, resolved on every evaluation.
#[derive(Clone)]
pub struct DateBound(Arc<dyn Fn() -> Option<NaiveDate> + Send + Sync>);

impl DateBound {
    pub fn fixed(date: NaiveDate) -> Self {
        Self(Arc::new(move || Some(date)))
    }

    pub fn today() -> Self {
        Self(Arc::new(|| Some(today())))
    }

    /// Today shifted by whole years; negative values look into the past.
    pub fn years_from_today(years: i32) -> Self {
        Self(Arc::new(move || today_plus_years(years)))
    }

    pub fn months_from_today(months: i32) -> Self {
        Self(Arc::new(move || plus_months(today(), months)))
    }

    pub fn resolve(&self) -> Option<NaiveDate> {
        (self.0)()
    }
}

impl fmt::Debug for DateBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("DateBound").field(&self.resolve()).finish()
    }
}

impl From<NaiveDate> for DateBound {
    fn from(date: NaiveDate) -> Self {
        DateBound::fixed(date)
    }
}

fn compare_date<F>(bound: DateBound, comparator: F) -> Predicate<NaiveDate>
where
    F: Fn(&NaiveDate, &NaiveDate) -> bool + Send + Sync + 'static,
{
    Predicate::present(move |value: &NaiveDate| {
        bound
            .resolve()
            .is_some_and(|bound| comparator(value, &bound))
    })
}

pub fn local_date_before(bound: impl Into<DateBound>) -> Predicate<NaiveDate> {
    compare_date(bound.into(), |value, bound| value < bound)
}

pub fn local_date_before_or_equal(bound: impl Into<DateBound>) -> Predicate<NaiveDate> {
    compare_date(bound.into(), |value, bound| value <= bound)
}

pub fn local_date_after(bound: impl Into<DateBound>) -> Predicate<NaiveDate> {
    compare_date(bound.into(), |value, bound| value > bound)
}

pub fn local_date_after_or_equal(bound: impl Into<DateBound>) -> Predicate<NaiveDate> {
    compare_date(bound.into(), |value, bound| value >= bound)
}

pub fn local_date_equal(bound: impl Into<DateBound>) -> Predicate<NaiveDate> {
    compare_date(bound.into(), |value, bound| value == bound)
}

pub fn local_date_before_today() -> Predicate<NaiveDate> {
    local_date_before(DateBound::today())
}

pub fn local_date_before_or_equal_today() -> Predicate<NaiveDate> {
    local_date_before_or_equal(DateBound::today())
}

pub fn local_date_after_today() -> Predicate<NaiveDate> {
    local_date_after(DateBound::today())
}

pub fn local_date_after_or_equal_today() -> Predicate<NaiveDate> {
    local_date_after_or_equal(DateBound::today())
}

pub fn local_date_equal_today() -> Predicate<NaiveDate> {
    local_date_equal(DateBound::today())
}
