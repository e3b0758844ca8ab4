use async_trait::async_trait;

use crate::{
    domain::entities::{product::Product, proration_mode::ProrationMode, purchase::Purchase},
    errors::IapError,
};

/// One store's implementation of the purchase flow.
///
/// Every operation defaults to a resolved no-op, so a backend only overrides
/// what its store actually supports. Operations that make no sense on a store
/// (e.g. consuming on the App Store) succeed without doing anything.
#[async_trait]
pub trait PurchaseBackend: Send + Sync {
    /// Name used in logs.
    fn name(&self) -> &'static str;

    /// Returns whether the store is ready to take payments.
    async fn init_connection(&self) -> Result<bool, IapError> {
        Ok(true)
    }

    async fn end_connection(&self) -> Result<(), IapError> {
        Ok(())
    }

    async fn consume_all_items(&self) -> Result<(), IapError> {
        Ok(())
    }

    async fn get_products(&self, _skus: &[String]) -> Result<Vec<Product>, IapError> {
        Ok(Vec::new())
    }

    async fn get_subscriptions(&self, _skus: &[String]) -> Result<Vec<Product>, IapError> {
        Ok(Vec::new())
    }

    async fn get_purchase_history(&self) -> Result<Vec<Purchase>, IapError> {
        Ok(Vec::new())
    }

    async fn get_available_purchases(&self) -> Result<Vec<Purchase>, IapError> {
        Ok(Vec::new())
    }

    async fn buy_product(&self, _sku: &str) -> Result<Option<Purchase>, IapError> {
        Ok(None)
    }

    async fn buy_subscription(
        &self,
        _sku: &str,
        _old_sku: Option<&str>,
        _proration_mode: ProrationMode,
    ) -> Result<Option<Purchase>, IapError> {
        Ok(None)
    }

    async fn buy_product_with_quantity(
        &self,
        _sku: &str,
        _quantity: u32,
    ) -> Result<Option<Purchase>, IapError> {
        Ok(None)
    }

    async fn buy_product_without_finish_transaction(
        &self,
        _sku: &str,
    ) -> Result<Option<Purchase>, IapError> {
        Ok(None)
    }

    async fn finish_transaction(&self) -> Result<(), IapError> {
        Ok(())
    }

    async fn clear_transaction(&self) -> Result<(), IapError> {
        Ok(())
    }

    async fn clear_products(&self) -> Result<(), IapError> {
        Ok(())
    }

    async fn consume_purchase(&self, _purchase_token: &str) -> Result<(), IapError> {
        Ok(())
    }

    async fn get_promoted_product(&self) -> Result<Option<String>, IapError> {
        Ok(None)
    }

    async fn buy_promoted_product(&self) -> Result<(), IapError> {
        Ok(())
    }
}
