use async_trait::async_trait;
use serde_json::Value;

use crate::errors::IapError;

/// Callback invoked by the native event emitter with the raw event payload.
pub type NativeEventHandler = Box<dyn Fn(Value) + Send + Sync>;

/// Handle for a listener registered on the native event emitter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(pub u64);

/// StoreKit bridge (`RNIapIos`).
///
/// Item and purchase payloads are returned raw; the caller normalizes them.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IosPurchaseModule: Send + Sync {
    async fn can_make_payments(&self) -> Result<bool, IapError>;

    async fn get_items(&self, skus: Vec<String>) -> Result<Vec<Value>, IapError>;

    async fn get_available_items(&self) -> Result<Vec<Value>, IapError>;

    async fn buy_product(&self, sku: &str) -> Result<Value, IapError>;

    async fn buy_product_with_quantity(&self, sku: &str, quantity: u32)
        -> Result<Value, IapError>;

    /// Purchase without finishing the transaction; `finish_transaction` must
    /// be called once the receipt has been validated.
    async fn buy_product_without_auto_confirm(&self, sku: &str) -> Result<Value, IapError>;

    async fn finish_transaction(&self) -> Result<(), IapError>;

    /// Finish every transaction still pending in the payment queue.
    async fn clear_transaction(&self) -> Result<(), IapError>;

    /// Drop the products cached after App Store validation.
    async fn clear_products(&self) -> Result<(), IapError>;

    /// Product id of the pending promoted purchase, if any.
    async fn promoted_product(&self) -> Result<Option<String>, IapError>;

    async fn buy_promoted_product(&self) -> Result<(), IapError>;

    fn add_listener(&self, event: &str, handler: NativeEventHandler) -> ListenerId;

    fn remove_listener(&self, id: ListenerId);
}
