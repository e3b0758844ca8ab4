use serde::{Deserialize, Serialize};

/// The Amazon account currently signed in on the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonUserData {
    pub user_id: String,
    /// ISO 3166-1 alpha-2 country code of the Amazon marketplace.
    pub marketplace: String,
}

impl AmazonUserData {
    /// Marketplace country as ISO 3166-1 alpha-3, if the code is recognized.
    pub fn region_iso3166_alpha_3(&self) -> Option<String> {
        rust_iso3166::from_alpha2(&self.marketplace.to_uppercase())
            .map(|country| country.alpha3.to_string())
    }
}
