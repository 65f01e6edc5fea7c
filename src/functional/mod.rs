pub mod predicates;
pub mod prelude;
pub mod validation_engine;
pub mod validation_rules;
