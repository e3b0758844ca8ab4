use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use serde_with::{formats::Flexible, serde_as, TimestampMilliSeconds};

use crate::{domain::entities::product::lenient_string, errors::IapError};

/// A completed or historical transaction, for a product or a subscription.
///
/// Stores disagree on which identifier they hand out: App Store and Amazon set
/// `transaction_id`, Google Play sets `purchase_token` (and an order id, kept
/// in `extra`).
#[serde_as]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Purchase {
    pub product_id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub transaction_id: Option<String>,
    /// Native layers report this in milliseconds, as a number or a string.
    #[serde_as(as = "Option<TimestampMilliSeconds<i64, Flexible>>")]
    pub transaction_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub transaction_receipt: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub purchase_token: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Purchase {
    pub(crate) fn from_native(item: Value) -> Result<Self, IapError> {
        serde_json::from_value(item)
            .map_err(|e| IapError::invalid_payload(format!("purchase: {e}")))
    }

    pub(crate) fn from_native_list(items: Vec<Value>) -> Result<Vec<Self>, IapError> {
        items.into_iter().map(Self::from_native).collect()
    }
}
