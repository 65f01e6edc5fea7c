use derive_more::Display;
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// Countries known to the billing domain, identified by a two-letter code.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Country {
    #[display(fmt = "us")]
    #[serde(rename = "us")]
    UnitedStates,
    #[display(fmt = "mx")]
    #[serde(rename = "mx")]
    Mexico,
    #[display(fmt = "ca")]
    #[serde(rename = "ca")]
    Canada,
    #[display(fmt = "br")]
    #[serde(rename = "br")]
    Brazil,
    #[display(fmt = "ir")]
    #[serde(rename = "ir")]
    Ireland,
    #[display(fmt = "en")]
    #[serde(rename = "en")]
    England,
}

impl Country {
    pub const ALL: [Country; 6] = [
        Country::UnitedStates,
        Country::Mexico,
        Country::Canada,
        Country::Brazil,
        Country::Ireland,
        Country::England,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Country::UnitedStates => "us",
            Country::Mexico => "mx",
            Country::Canada => "ca",
            Country::Brazil => "br",
            Country::Ireland => "ir",
            Country::England => "en",
        }
    }

    /// Case-insensitive lookup by code.
    pub fn entry_of(code: &str) -> Option<Country> {
        let code = code.to_lowercase();
        Self::ALL.into_iter().find(|country| country.code() == code)
    }

    /// Case-sensitive existence check: `"US"` is not a known code.
    pub fn exists(code: &str) -> bool {
        Self::ALL.iter().any(|country| country.code() == code)
    }

    /// Every known code, comma separated, in declaration order.
    pub fn all_countries() -> String {
        Self::ALL.iter().map(Country::code).join(",")
    }
}
