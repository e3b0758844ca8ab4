use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    domain::{
        entities::{
            product::{has_product_id, Product},
            proration_mode::ProrationMode,
            purchase::Purchase,
        },
        native_modules::ios_purchase_module::IosPurchaseModule,
        repositories::purchase_backend::PurchaseBackend,
    },
    errors::IapError,
};

pub(crate) struct IosPurchaseBackend {
    module: Arc<dyn IosPurchaseModule>,
}

impl IosPurchaseBackend {
    pub(crate) fn new(module: Arc<dyn IosPurchaseModule>) -> Self {
        Self { module }
    }

    async fn get_items(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        let items = self.module.get_items(skus.to_vec()).await?;
        Product::from_native_list(keep_identified(items))
    }
}

/// StoreKit occasionally hands back entries without an identifier (e.g. for
/// SKUs that are not configured in App Store Connect). They are dropped.
fn keep_identified(items: Vec<Value>) -> Vec<Value> {
    let total = items.len();
    let kept: Vec<Value> = items.into_iter().filter(has_product_id).collect();
    if kept.len() < total {
        tracing::warn!(
            dropped = total - kept.len(),
            "Dropped App Store items without a product identifier"
        );
    }
    kept
}

#[async_trait]
impl PurchaseBackend for IosPurchaseBackend {
    fn name(&self) -> &'static str {
        "app_store"
    }

    async fn init_connection(&self) -> Result<bool, IapError> {
        self.module.can_make_payments().await
    }

    async fn get_products(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.get_items(skus).await
    }

    async fn get_subscriptions(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.get_items(skus).await
    }

    async fn get_purchase_history(&self) -> Result<Vec<Purchase>, IapError> {
        Purchase::from_native_list(self.module.get_available_items().await?)
    }

    async fn get_available_purchases(&self) -> Result<Vec<Purchase>, IapError> {
        Purchase::from_native_list(self.module.get_available_items().await?)
    }

    async fn buy_product(&self, sku: &str) -> Result<Option<Purchase>, IapError> {
        Purchase::from_native(self.module.buy_product(sku).await?).map(Some)
    }

    // Upgrades and downgrades are handled by StoreKit through subscription
    // groups, so the replaced SKU and proration are not forwarded.
    async fn buy_subscription(
        &self,
        sku: &str,
        _old_sku: Option<&str>,
        _proration_mode: ProrationMode,
    ) -> Result<Option<Purchase>, IapError> {
        Purchase::from_native(self.module.buy_product(sku).await?).map(Some)
    }

    async fn buy_product_with_quantity(
        &self,
        sku: &str,
        quantity: u32,
    ) -> Result<Option<Purchase>, IapError> {
        Purchase::from_native(self.module.buy_product_with_quantity(sku, quantity).await?)
            .map(Some)
    }

    async fn buy_product_without_finish_transaction(
        &self,
        sku: &str,
    ) -> Result<Option<Purchase>, IapError> {
        Purchase::from_native(self.module.buy_product_without_auto_confirm(sku).await?).map(Some)
    }

    async fn finish_transaction(&self) -> Result<(), IapError> {
        self.module.finish_transaction().await
    }

    async fn clear_transaction(&self) -> Result<(), IapError> {
        self.module.clear_transaction().await
    }

    async fn clear_products(&self) -> Result<(), IapError> {
        self.module.clear_products().await
    }

    async fn get_promoted_product(&self) -> Result<Option<String>, IapError> {
        self.module.promoted_product().await
    }

    async fn buy_promoted_product(&self) -> Result<(), IapError> {
        self.module.buy_promoted_product().await
    }
}
