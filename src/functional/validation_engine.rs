//! Rule Chain Validation Engine
//!
//! A [`RuleChain`] is an ordered list of field groups followed by an ordered
//! list of nested dispatches. Validation is never fail-fast: every applicable
//! rule in every group runs, and a critical failure only stops the remaining
//! rules of its own group. Nested dispatches run after all groups and delegate
//! to child chains, either once for a whole attribute or once per element of a
//! collection attribute.
//!
//! All per-call state lives in a [`ValidationContext`] created by
//! [`RuleChain::validate`], so one chain can be shared between threads and
//! reused indefinitely.
//!
//! ```
//! use billing_validator::functional::prelude::*;
//! use billing_validator::models::billing::Billing;
//!
//! let chain = RuleChain::<Billing>::builder()
//!     .rule_for("balance", |b: &Billing| b.balance.as_ref(), |rules| {
//!         rules
//!             .must(not(null_value()))
//!             .with_code("101")
//!             .with_message("balance must not be null")
//!     })
//!     .build();
//! let result = chain.validate(&Billing::default());
//! assert!(result.has_code("101"));
//! ```

use std::fmt;
use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use tracing::{debug, trace};

use crate::functional::predicates::Predicate;
use crate::functional::validation_rules::{
    attempted, FieldName, Rule, ValidationError, ValidationResult, Validator,
};

type Accessor<E, V> = Arc<dyn for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync>;
type DispatchFn<E> = Box<dyn Fn(&E, &mut ValidationContext) + Send + Sync>;

fn whole<E>(entity: &E) -> Option<&E> {
    Some(entity)
}

/// Field path segment of one element in a prefixed per-element dispatch: `items.` becomes `items[2].`.
fn element_segment(prefix: &str, index: Option<usize>) -> String {
    format!("{}[{}].", prefix.trim_end_matches('.'), index.unwrap_or(0))
}

/// Per-call validation state.
///
/// Owns the growing error list, the field prefix of the dispatch currently
/// running, the element index of a per-element dispatch in progress and the
/// critical-halt flag of the field group being evaluated.
#[derive(Debug, Default)]
pub struct ValidationContext {
    errors: Vec<ValidationError>,
    field_path: String,
    element_index: Option<usize>,
    group_halted: bool,
}

impl ValidationContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an error, prefixing its field with the active dispatch prefix.
    pub fn record(&mut self, mut error: ValidationError) {
        if !self.field_path.is_empty() {
            error.field = format!("{}{}", self.field_path, error.field);
        }
        trace!(code = %error.code, field = %error.field, "rule violated");
        self.errors.push(error);
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    pub fn field_path(&self) -> &str {
        &self.field_path
    }

    pub fn element_index(&self) -> Option<usize> {
        self.element_index
    }

    pub(crate) fn begin_group(&mut self) {
        self.group_halted = false;
    }

    pub(crate) fn halt_group(&mut self) {
        self.group_halted = true;
    }

    pub(crate) fn is_group_halted(&self) -> bool {
        self.group_halted
    }

    /// Runs `f` with `prefix` appended to the field path, restoring it afterwards.
    pub fn scoped<F>(&mut self, prefix: Option<&str>, f: F)
    where
        F: FnOnce(&mut Self),
    {
        let previous_len = self.field_path.len();
        if let Some(prefix) = prefix {
            self.field_path.push_str(prefix);
        }
        f(self);
        self.field_path.truncate(previous_len);
    }

    /// Visits every element in order with a zero-based element index that
    /// advances once per element, whatever the element's outcome. The index of
    /// an enclosing dispatch is restored afterwards.
    pub fn for_each_element<T, F>(&mut self, items: &[T], mut f: F)
    where
        F: FnMut(&T, &mut Self),
    {
        let outer = self.element_index.replace(0);
        for item in items {
            f(item, self);
            self.element_index = self.element_index.map(|index| index + 1);
        }
        self.element_index = outer;
    }

    pub fn into_result(self) -> ValidationResult {
        ValidationResult::fail(self.errors)
    }
}

/// The rules registered against one field, evaluated as a unit.
pub struct FieldGroup<E> {
    field: String,
    rules: Vec<Rule<E>>,
}

impl<E: 'static> FieldGroup<E> {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn rules(&self) -> &[Rule<E>] {
        &self.rules
    }

    fn evaluate(&self, entity: &E, context: &mut ValidationContext) {
        context.begin_group();
        for rule in &self.rules {
            if context.is_group_halted() {
                break;
            }
            if !rule.applies_to(entity) || rule.is_satisfied_by(entity) {
                continue;
            }
            context.record(rule.error_for(entity, context.element_index()));
            if rule.is_critical() {
                context.halt_group();
            }
        }
    }
}

impl<E> fmt::Debug for FieldGroup<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldGroup")
            .field("field", &self.field)
            .field("rules", &self.rules)
            .finish()
    }
}

/// Delegation of part of a record to a child chain.
pub struct NestedDispatch<E> {
    field: String,
    prefix: Option<String>,
    per_element: bool,
    run: DispatchFn<E>,
}

impl<E> NestedDispatch<E> {
    pub fn field(&self) -> &str {
        &self.field
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn is_per_element(&self) -> bool {
        self.per_element
    }
}

impl<E> fmt::Debug for NestedDispatch<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NestedDispatch")
            .field("field", &self.field)
            .field("prefix", &self.prefix)
            .field("per_element", &self.per_element)
            .finish()
    }
}

/// An immutable, reusable set of field groups and nested dispatches for `E`.
pub struct RuleChain<E> {
    groups: Vec<FieldGroup<E>>,
    dispatches: Vec<NestedDispatch<E>>,
}

impl<E: 'static> RuleChain<E> {
    pub fn builder() -> RuleChainBuilder<E> {
        RuleChainBuilder::new()
    }

    /// Validates `entity` against every group and dispatch of this chain.
    pub fn validate(&self, entity: &E) -> ValidationResult {
        let mut context = ValidationContext::new();
        self.evaluate(entity, &mut context);
        let result = context.into_result();
        debug!(
            valid = result.is_valid(),
            errors = result.errors().len(),
            "rule chain evaluated"
        );
        result
    }

    /// Evaluates inside an existing context; used by nested dispatches so
    /// that child errors land in the caller's list in declaration order.
    pub fn evaluate(&self, entity: &E, context: &mut ValidationContext) {
        for group in &self.groups {
            group.evaluate(entity, context);
        }
        for dispatch in &self.dispatches {
            (dispatch.run)(entity, context);
        }
    }

    pub fn groups(&self) -> &[FieldGroup<E>] {
        &self.groups
    }

    pub fn dispatches(&self) -> &[NestedDispatch<E>] {
        &self.dispatches
    }
}

impl<E: 'static> Validator<E> for RuleChain<E> {
    fn validate(&self, value: &E) -> ValidationResult {
        RuleChain::validate(self, value)
    }
}

impl<E> fmt::Debug for RuleChain<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleChain")
            .field("groups", &self.groups)
            .field("dispatches", &self.dispatches)
            .finish()
    }
}

/// Appends field groups and dispatches in declaration order.
pub struct RuleChainBuilder<E> {
    groups: Vec<FieldGroup<E>>,
    dispatches: Vec<NestedDispatch<E>>,
}

impl<E: 'static> Default for RuleChainBuilder<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: 'static> RuleChainBuilder<E> {
    pub fn new() -> Self {
        Self {
            groups: Vec::new(),
            dispatches: Vec::new(),
        }
    }

    /// Registers a field group over the attribute returned by `accessor`.
    pub fn rule_for<V, A, F>(mut self, field: &str, accessor: A, rules: F) -> Self
    where
        V: ?Sized + Serialize + 'static,
        A: for<'a> Fn(&'a E) -> Option<&'a V> + Send + Sync + 'static,
        F: FnOnce(FieldRules<E, V>) -> FieldRules<E, V>,
    {
        let group = rules(FieldRules::new(field, Arc::new(accessor)));
        self.groups.push(FieldGroup {
            field: group.field,
            rules: group.rules,
        });
        self.dispatches.extend(group.dispatches);
        self
    }

    /// Registers a field group whose rules inspect the whole record, for
    /// cross-field constraints reported under `field`.
    pub fn rule_for_entity<F>(self, field: &str, rules: F) -> Self
    where
        E: Serialize,
        F: FnOnce(FieldRules<E, E>) -> FieldRules<E, E>,
    {
        self.rule_for(field, whole::<E>, rules)
    }

    /// Registers a field group over a collection attribute. Rules see the
    /// collection as a whole; `with_element_validator` dispatches each element.
    pub fn rule_for_each<T, A, F>(self, field: &str, accessor: A, rules: F) -> Self
    where
        T: Serialize + 'static,
        A: for<'a> Fn(&'a E) -> Option<&'a [T]> + Send + Sync + 'static,
        F: FnOnce(FieldRules<E, [T]>) -> FieldRules<E, [T]>,
    {
        self.rule_for(field, accessor, rules)
    }

    pub fn build(self) -> RuleChain<E> {
        RuleChain {
            groups: self.groups,
            dispatches: self.dispatches,
        }
    }
}

/// Builder for one field group. Modifiers such as `with_code` or `when`
/// apply to the rule most recently added with `must`.
pub struct FieldRules<E, V: ?Sized> {
    field: String,
    accessor: Accessor<E, V>,
    rules: Vec<Rule<E>>,
    dispatches: Vec<NestedDispatch<E>>,
}

impl<E: 'static, V: ?Sized + Serialize + 'static> FieldRules<E, V> {
    fn new(field: &str, accessor: Accessor<E, V>) -> Self {
        Self {
            field: field.to_string(),
            accessor,
            rules: Vec::new(),
            dispatches: Vec::new(),
        }
    }

    fn lift(&self, predicate: Predicate<V>) -> Predicate<E> {
        let accessor = Arc::clone(&self.accessor);
        predicate.on(move |entity: &E| accessor(entity))
    }

    fn modify_last<F>(mut self, f: F) -> Self
    where
        F: FnOnce(&mut Rule<E>),
    {
        if let Some(rule) = self.rules.last_mut() {
            f(rule);
        }
        self
    }

    /// Adds a rule that fails whenever `predicate` rejects the attribute.
    pub fn must(mut self, predicate: Predicate<V>) -> Self {
        let check = self.lift(predicate);
        let accessor = Arc::clone(&self.accessor);
        let attempted_value = Arc::new(move |entity: &E| attempted(accessor(entity)));
        self.rules.push(Rule::new(
            check,
            FieldName::Literal(self.field.clone()),
            attempted_value,
        ));
        self
    }

    /// Only evaluates the last rule when `guard` accepts the attribute.
    /// Repeated guards are combined with a logical and.
    pub fn when(self, guard: Predicate<V>) -> Self {
        let guard = self.lift(guard);
        self.modify_last(move |rule| {
            rule.guard = Some(match rule.guard.take() {
                Some(existing) => existing.and(guard),
                None => guard,
            });
        })
    }

    pub fn with_code(self, code: impl Into<String>) -> Self {
        let code = code.into();
        self.modify_last(move |rule| rule.code = code)
    }

    pub fn with_message(self, message: impl Into<String>) -> Self {
        let message = message.into();
        self.modify_last(move |rule| rule.message = message)
    }

    /// Reports the last rule under `base[i]`, `i` being the element index of
    /// the per-element dispatch currently running.
    pub fn with_indexed_field_name(self, base: impl Into<String>) -> Self {
        let base = base.into();
        self.modify_last(move |rule| rule.field = FieldName::Indexed(base))
    }

    /// Renders the field of the last rule from the entity and the running element index.
    pub fn with_field_name_fn<F>(self, render: F) -> Self
    where
        F: Fn(&E, Option<usize>) -> String + Send + Sync + 'static,
    {
        self.modify_last(move |rule| rule.field = FieldName::Dynamic(Arc::new(render)))
    }

    /// Overrides the attempted value reported by the last rule.
    pub fn with_attempted_value<T, F>(self, value: F) -> Self
    where
        T: Serialize,
        F: Fn(&E) -> T + Send + Sync + 'static,
    {
        self.modify_last(move |rule| {
            rule.attempted_value = Arc::new(move |entity: &E| {
                serde_json::to_value(value(entity)).unwrap_or(Value::Null)
            })
        })
    }

    /// A failure of the last rule stops the remaining rules of this group.
    pub fn critical(self) -> Self {
        self.modify_last(|rule| rule.critical = true)
    }

    /// Starts a nested dispatch that runs only when `guard` accepts the attribute.
    pub fn whenever(self, guard: Predicate<V>) -> PendingDispatch<E, V> {
        PendingDispatch {
            rules: self,
            guard,
            prefix: None,
        }
    }
}

/// A nested dispatch waiting for its child chain.
pub struct PendingDispatch<E, V: ?Sized> {
    rules: FieldRules<E, V>,
    guard: Predicate<V>,
    prefix: Option<String>,
}

impl<E: 'static, V: ?Sized + 'static> PendingDispatch<E, V> {
    /// Prepends `prefix` to every field reported by the child chain. A
    /// missing trailing `.` separator is added.
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        let mut prefix = prefix.into();
        if !prefix.is_empty() && !prefix.ends_with('.') {
            prefix.push('.');
        }
        self.prefix = Some(prefix);
        self
    }
}

impl<E: 'static, V: 'static> PendingDispatch<E, V> {
    /// Validates the attribute as a whole with `child`.
    pub fn with_validator(self, child: Arc<RuleChain<V>>) -> FieldRules<E, V> {
        let PendingDispatch {
            mut rules,
            guard,
            prefix,
        } = self;
        let accessor = Arc::clone(&rules.accessor);
        let scope = prefix.clone();

        let run: DispatchFn<E> = Box::new(move |entity: &E, context: &mut ValidationContext| {
            let value = accessor(entity);
            if !guard.test(value) {
                return;
            }
            if let Some(value) = value {
                context.scoped(scope.as_deref(), |context| child.evaluate(value, context));
            }
        });

        rules.dispatches.push(NestedDispatch {
            field: rules.field.clone(),
            prefix,
            per_element: false,
            run,
        });
        rules
    }
}

impl<E: 'static, T: 'static> PendingDispatch<E, [T]> {
    /// Validates every element of the collection attribute with `child`, in
    /// collection order, exposing each element's position to field names.
    ///
    /// With a prefix, child fields are reported as `prefix[i].field`. Without
    /// one the child renders the index itself, e.g. with
    /// `with_indexed_field_name`.
    pub fn with_element_validator(self, child: Arc<RuleChain<T>>) -> FieldRules<E, [T]> {
        let PendingDispatch {
            mut rules,
            guard,
            prefix,
        } = self;
        let accessor = Arc::clone(&rules.accessor);
        let scope = prefix.clone();

        let run: DispatchFn<E> = Box::new(move |entity: &E, context: &mut ValidationContext| {
            let items = accessor(entity);
            if !guard.test(items) {
                return;
            }
            if let Some(items) = items {
                context.for_each_element(items, |item, context| {
                    let segment = scope
                        .as_deref()
                        .map(|prefix| element_segment(prefix, context.element_index()));
                    context.scoped(segment.as_deref(), |context| child.evaluate(item, context));
                });
            }
        });

        rules.dispatches.push(NestedDispatch {
            field: rules.field.clone(),
            prefix,
            per_element: true,
            run,
        });
        rules
    }
}
