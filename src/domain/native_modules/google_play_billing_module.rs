use async_trait::async_trait;
use serde_json::Value;

use crate::{
    domain::entities::{android_item_type::AndroidItemType, proration_mode::ProrationMode},
    errors::IapError,
};

/// Google Play Billing bridge (`RNIapAndroidModule`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GooglePlayBillingModule: Send + Sync {
    /// Open the billing session. Required before any other call.
    async fn init_connection(&self) -> Result<bool, IapError>;

    async fn end_connection(&self) -> Result<(), IapError>;

    /// Consume every owned, unconsumed item.
    async fn refresh_items(&self) -> Result<(), IapError>;

    async fn get_items_by_type(
        &self,
        item_type: AndroidItemType,
        skus: Vec<String>,
    ) -> Result<Vec<Value>, IapError>;

    async fn get_purchase_history_by_type(
        &self,
        item_type: AndroidItemType,
    ) -> Result<Vec<Value>, IapError>;

    async fn get_available_items_by_type(
        &self,
        item_type: AndroidItemType,
    ) -> Result<Vec<Value>, IapError>;

    /// `old_sku` is the subscription being replaced when upgrading or
    /// downgrading.
    async fn buy_item_by_type(
        &self,
        item_type: AndroidItemType,
        sku: &str,
        old_sku: Option<String>,
        proration_mode: ProrationMode,
    ) -> Result<Value, IapError>;

    async fn consume_product(&self, purchase_token: &str) -> Result<(), IapError>;
}
