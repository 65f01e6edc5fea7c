//! Functional Patterns for the Service Layer
//!
//! A [`Pipeline`] composes fallible steps applied in order to a value on its
//! way to the store. The first failing step stops the pipeline.

use std::sync::Arc;

use crate::{
    error::{ServiceError, ServiceResult},
    functional::validation_rules::Validator,
};

type Step<T> = Box<dyn Fn(T) -> ServiceResult<T> + Send + Sync>;

pub struct Pipeline<T> {
    steps: Vec<Step<T>>,
}

impl<T> Pipeline<T> {
    pub fn new() -> Self {
        Self { steps: Vec::new() }
    }

    /// Add a step to the pipeline
    pub fn then<F>(mut self, step: F) -> Self
    where
        F: Fn(T) -> ServiceResult<T> + Send + Sync + 'static,
    {
        self.steps.push(Box::new(step));
        self
    }

    /// Conditionally add a step to the pipeline
    pub fn then_if<F>(self, condition: bool, step: F) -> Self
    where
        F: Fn(T) -> ServiceResult<T> + Send + Sync + 'static,
    {
        if condition {
            self.then(step)
        } else {
            self
        }
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn execute(&self, mut input: T) -> ServiceResult<T> {
        for step in &self.steps {
            input = step(input)?;
        }
        Ok(input)
    }
}

impl<T> Default for Pipeline<T> {
    fn default() -> Self {
        Self::new()
    }
}

/// Step that runs `validator` and turns a non-valid result into
/// [`ServiceError::ValidationFailed`].
pub fn validated<T: 'static>(
    validator: Arc<dyn Validator<T>>,
) -> impl Fn(T) -> ServiceResult<T> + Send + Sync + 'static {
    move |input: T| {
        let result = validator.validate(&input);
        if result.is_valid() {
            Ok(input)
        } else {
            Err(ServiceError::validation_failed(result))
        }
    }
}
