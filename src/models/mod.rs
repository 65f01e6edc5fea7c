pub mod address;
pub mod billing;
pub mod custom_predicates;
pub mod payer;
pub mod receiver;

#[cfg(test)]
pub(crate) mod fixtures;
