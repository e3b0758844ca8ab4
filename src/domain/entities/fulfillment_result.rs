use serde::{Deserialize, Serialize};

/// Outcome reported back to Amazon for a purchase receipt.
///
/// https://developer.amazon.com/docs/in-app-purchasing/iap-implement-iap.html#notify-fulfillment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FulfillmentResult {
    /// The item was granted to the user.
    Fulfilled,
    /// The item can no longer be granted, e.g. the SKU was retired.
    Unavailable,
}

impl FulfillmentResult {
    pub fn as_str(&self) -> &'static str {
        match self {
            FulfillmentResult::Fulfilled => "FULFILLED",
            FulfillmentResult::Unavailable => "UNAVAILABLE",
        }
    }
}
