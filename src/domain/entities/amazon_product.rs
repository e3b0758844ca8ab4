use serde::{Deserialize, Serialize};

/// Product data as returned by the Amazon Appstore SDK.
///
/// https://developer.amazon.com/docs/in-app-purchasing/iap-rvs-for-android-apps.html
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonProduct {
    pub sku: String,
    pub product_type: AmazonProductType,
    /// Localized price string, e.g. "$0.99" or "1.234,56 €".
    pub price: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub small_icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AmazonProductType {
    /// Non-consumable, granted once per account.
    Entitled,
    Consumable,
    Subscription,

    #[serde(untagged)]
    Unknown(String),
}
