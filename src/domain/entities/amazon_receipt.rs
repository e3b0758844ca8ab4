use chrono::serde::{ts_milliseconds, ts_milliseconds_option};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::amazon_product::AmazonProductType;

/// A purchase receipt as returned by the Amazon Appstore SDK.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmazonReceipt {
    pub receipt_id: String,
    pub sku: String,
    pub product_type: AmazonProductType,
    #[serde(with = "ts_milliseconds")]
    pub purchase_date: DateTime<Utc>,
    /// Set when the purchase was cancelled or refunded.
    #[serde(default, with = "ts_milliseconds_option")]
    pub cancel_date: Option<DateTime<Utc>>,
}
