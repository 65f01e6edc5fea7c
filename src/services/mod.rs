pub mod billing_service;
pub mod functional_patterns;
pub mod zipcode_service;
