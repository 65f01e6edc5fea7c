//! Validation Rules and Results
//!
//! The data side of the rule engine: a single [`Rule`] with its error
//! template, the [`ValidationError`] it produces when violated, and the
//! order-preserving [`ValidationResult`] returned by every validation call.
//! Errors are collected, never raised.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::functional::predicates::Predicate;

/// One violated constraint.
///
/// Two errors are equal when code, field, message and attempted value are all
/// equal. Absent attempted values are represented as `Value::Null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationError {
    pub code: String,
    pub field: String,
    pub message: String,
    pub attempted_value: Value,
}

impl ValidationError {
    /// Creates a ValidationError from its four contract attributes.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_validator::functional::validation_rules::ValidationError;
    /// use serde_json::Value;
    ///
    /// let err = ValidationError::new("101", "balance", "balance must not be null", Value::Null);
    /// assert_eq!(err.code, "101");
    /// assert_eq!(err.field, "balance");
    /// ```
    pub fn new(
        code: impl Into<String>,
        field: impl Into<String>,
        message: impl Into<String>,
        attempted_value: Value,
    ) -> Self {
        Self {
            code: code.into(),
            field: field.into(),
            message: message.into(),
            attempted_value,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code, self.field, self.message)
    }
}

/// Aggregate output of one validation call.
///
/// `valid` is always equal to `errors.is_empty()`: the only constructors are
/// [`ValidationResult::ok`] and [`ValidationResult::fail`], and `fail` with an
/// empty list yields a valid result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    valid: bool,
    errors: Vec<ValidationError>,
}

impl ValidationResult {
    pub fn ok() -> Self {
        Self {
            valid: true,
            errors: Vec::new(),
        }
    }

    /// Builds a result from collected failures.
    ///
    /// # Examples
    ///
    /// ```
    /// use billing_validator::functional::validation_rules::ValidationResult;
    ///
    /// assert!(ValidationResult::fail(vec![]).is_valid());
    /// assert_eq!(ValidationResult::fail(vec![]), ValidationResult::ok());
    /// ```
    pub fn fail(errors: Vec<ValidationError>) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.valid
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.errors
    }

    /// Error codes in recording order.
    pub fn codes(&self) -> Vec<&str> {
        self.errors.iter().map(|error| error.code.as_str()).collect()
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.errors.iter().any(|error| error.code == code)
    }

    /// Appends the errors of `other` after the errors of `self`.
    pub fn combine(self, other: ValidationResult) -> Self {
        let mut errors = self.errors;
        errors.extend(other.errors);
        Self::fail(errors)
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

impl From<Vec<ValidationError>> for ValidationResult {
    fn from(errors: Vec<ValidationError>) -> Self {
        Self::fail(errors)
    }
}

/// Anything able to validate a `T` and report every violated constraint.
pub trait Validator<T>: Send + Sync {
    fn validate(&self, value: &T) -> ValidationResult;
}

/// How a rule names the field it reports on.
pub enum FieldName<E> {
    Literal(String),
    /// Renders `base[i]` where `i` is the element index of the running
    /// per-element dispatch, or `0` outside of one.
    Indexed(String),
    Dynamic(Arc<dyn Fn(&E, Option<usize>) -> String + Send + Sync>),
}

impl<E> FieldName<E> {
    pub fn render(&self, entity: &E, element_index: Option<usize>) -> String {
        match self {
            FieldName::Literal(name) => name.clone(),
            FieldName::Indexed(base) => format!("{}[{}]", base, element_index.unwrap_or(0)),
            FieldName::Dynamic(render) => render(entity, element_index),
        }
    }
}

impl<E> Clone for FieldName<E> {
    fn clone(&self) -> Self {
        match self {
            FieldName::Literal(name) => FieldName::Literal(name.clone()),
            FieldName::Indexed(base) => FieldName::Indexed(base.clone()),
            FieldName::Dynamic(render) => FieldName::Dynamic(Arc::clone(render)),
        }
    }
}

impl<E> fmt::Debug for FieldName<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldName::Literal(name) => f.debug_tuple("Literal").field(name).finish(),
            FieldName::Indexed(base) => f.debug_tuple("Indexed").field(base).finish(),
            FieldName::Dynamic(_) => f.write_str("Dynamic"),
        }
    }
}

pub(crate) type AttemptedValueFn<E> = Arc<dyn Fn(&E) -> Value + Send + Sync>;

/// A single constraint over a record of type `E`.
///
/// Rules are assembled by the rule-chain builder and never change afterwards.
pub struct Rule<E> {
    pub(crate) check: Predicate<E>,
    pub(crate) guard: Option<Predicate<E>>,
    pub(crate) code: String,
    pub(crate) field: FieldName<E>,
    pub(crate) message: String,
    pub(crate) attempted_value: AttemptedValueFn<E>,
    pub(crate) critical: bool,
}

impl<E: 'static> Rule<E> {
    pub(crate) fn new(
        check: Predicate<E>,
        field: FieldName<E>,
        attempted_value: AttemptedValueFn<E>,
    ) -> Self {
        Self {
            check,
            guard: None,
            code: String::new(),
            field,
            message: String::new(),
            attempted_value,
            critical: false,
        }
    }

    /// False when a guard is present and rejects the record; the rule is then skipped.
    pub fn applies_to(&self, entity: &E) -> bool {
        self.guard
            .as_ref()
            .map_or(true, |guard| guard.test(Some(entity)))
    }

    pub fn is_satisfied_by(&self, entity: &E) -> bool {
        self.check.test(Some(entity))
    }

    pub fn is_critical(&self) -> bool {
        self.critical
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn error_for(&self, entity: &E, element_index: Option<usize>) -> ValidationError {
        ValidationError::new(
            self.code.clone(),
            self.field.render(entity, element_index),
            self.message.clone(),
            (self.attempted_value)(entity),
        )
    }
}

impl<E> fmt::Debug for Rule<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("code", &self.code)
            .field("field", &self.field)
            .field("message", &self.message)
            .field("guarded", &self.guard.is_some())
            .field("critical", &self.critical)
            .finish()
    }
}

/// Serializes any attempted value, falling back to `null` for values that
/// cannot be represented as JSON.
pub(crate) fn attempted<T: Serialize + ?Sized>(value: Option<&T>) -> Value {
    value
        .and_then(|value| serde_json::to_value(value).ok())
        .unwrap_or(Value::Null)
}
