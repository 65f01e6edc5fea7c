use log::debug;

/// Remote zipcode lookup consulted by the opt-in address rule 410.
pub trait ZipcodeVerifier: Send + Sync {
    fn is_zipcode_valid(&self, zipcode: &str) -> bool;
}

/// Accepts every zipcode. Stands in until a real postal lookup is wired.
#[derive(Debug, Default, Clone, Copy)]
pub struct StubZipcodeService;

impl ZipcodeVerifier for StubZipcodeService {
    fn is_zipcode_valid(&self, zipcode: &str) -> bool {
        debug!("zipcode {} accepted without lookup", zipcode);
        true
    }
}
