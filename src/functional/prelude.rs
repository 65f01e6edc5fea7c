//! Prelude for the rule-chain engine
//!
//! Re-exports everything needed to declare a rule catalog:
//!
//! ```
//! use billing_validator::functional::prelude::*;
//! ```

pub use crate::functional::predicates::*;
pub use crate::functional::validation_engine::{
    FieldRules, PendingDispatch, RuleChain, RuleChainBuilder, ValidationContext,
};
pub use crate::functional::validation_rules::{
    ValidationError, ValidationResult, Validator,
};
