//! Billing validation service.
//!
//! The [`functional`] module holds a reusable rule-chain engine; [`models`]
//! instantiates it as the billing rule catalog; [`services`], [`repository`]
//! and [`api`] put the catalog in front of an in-memory billing store served
//! over HTTP.

pub mod api;
pub mod config;
pub mod constants;
pub mod error;
pub mod functional;
pub mod models;
pub mod repository;
pub mod services;
pub mod utils;
