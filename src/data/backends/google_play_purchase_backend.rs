use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    domain::{
        entities::{
            android_item_type::AndroidItemType, product::Product, proration_mode::ProrationMode,
            purchase::Purchase,
        },
        native_modules::google_play_billing_module::GooglePlayBillingModule,
        repositories::purchase_backend::PurchaseBackend,
    },
    errors::IapError,
};

pub(crate) struct GooglePlayPurchaseBackend {
    module: Arc<dyn GooglePlayBillingModule>,
}

impl GooglePlayPurchaseBackend {
    pub(crate) fn new(module: Arc<dyn GooglePlayBillingModule>) -> Self {
        Self { module }
    }

    async fn buy_one_time(&self, sku: &str) -> Result<Option<Purchase>, IapError> {
        let purchase = self
            .module
            .buy_item_by_type(
                AndroidItemType::InApp,
                sku,
                None,
                ProrationMode::UnknownSubscriptionUpgradeDowngradePolicy,
            )
            .await?;
        Purchase::from_native(purchase).map(Some)
    }
}

#[async_trait]
impl PurchaseBackend for GooglePlayPurchaseBackend {
    fn name(&self) -> &'static str {
        "google_play"
    }

    async fn init_connection(&self) -> Result<bool, IapError> {
        self.module.init_connection().await
    }

    async fn end_connection(&self) -> Result<(), IapError> {
        self.module.end_connection().await
    }

    async fn consume_all_items(&self) -> Result<(), IapError> {
        self.module.refresh_items().await
    }

    async fn get_products(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        let items = self
            .module
            .get_items_by_type(AndroidItemType::InApp, skus.to_vec())
            .await?;
        Product::from_native_list(items)
    }

    async fn get_subscriptions(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        let items = self
            .module
            .get_items_by_type(AndroidItemType::Subscription, skus.to_vec())
            .await?;
        Product::from_native_list(items)
    }

    // One-time items first, subscriptions appended. The two queries run one
    // after the other against the same billing session.
    async fn get_purchase_history(&self) -> Result<Vec<Purchase>, IapError> {
        let mut purchases = self
            .module
            .get_purchase_history_by_type(AndroidItemType::InApp)
            .await?;
        purchases.extend(
            self.module
                .get_purchase_history_by_type(AndroidItemType::Subscription)
                .await?,
        );
        Purchase::from_native_list(purchases)
    }

    async fn get_available_purchases(&self) -> Result<Vec<Purchase>, IapError> {
        let mut purchases = self
            .module
            .get_available_items_by_type(AndroidItemType::InApp)
            .await?;
        purchases.extend(
            self.module
                .get_available_items_by_type(AndroidItemType::Subscription)
                .await?,
        );
        Purchase::from_native_list(purchases)
    }

    async fn buy_product(&self, sku: &str) -> Result<Option<Purchase>, IapError> {
        self.buy_one_time(sku).await
    }

    async fn buy_subscription(
        &self,
        sku: &str,
        old_sku: Option<&str>,
        proration_mode: ProrationMode,
    ) -> Result<Option<Purchase>, IapError> {
        let purchase = self
            .module
            .buy_item_by_type(
                AndroidItemType::Subscription,
                sku,
                old_sku.map(str::to_owned),
                proration_mode,
            )
            .await?;
        Purchase::from_native(purchase).map(Some)
    }

    async fn buy_product_without_finish_transaction(
        &self,
        sku: &str,
    ) -> Result<Option<Purchase>, IapError> {
        self.buy_one_time(sku).await
    }

    async fn consume_purchase(&self, purchase_token: &str) -> Result<(), IapError> {
        self.module.consume_product(purchase_token).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::native_modules::google_play_billing_module::MockGooglePlayBillingModule;
    use mockall::{predicate::eq, Sequence};
    use serde_json::json;

    #[tokio::test]
    async fn history_concatenates_one_time_items_then_subscriptions() {
        let mut module = MockGooglePlayBillingModule::new();
        let mut seq = Sequence::new();
        module
            .expect_get_purchase_history_by_type()
            .with(eq(AndroidItemType::InApp))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| {
                Ok(vec![
                    json!({ "productId": "gems_100", "purchaseToken": "a" }),
                    json!({ "productId": "gems_500", "purchaseToken": "b" }),
                ])
            });
        module
            .expect_get_purchase_history_by_type()
            .with(eq(AndroidItemType::Subscription))
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![json!({ "productId": "monthly", "purchaseToken": "c" })]));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let history = backend.get_purchase_history().await.unwrap();

        let tokens: Vec<&str> = history
            .iter()
            .map(|p| p.purchase_token.as_deref().unwrap())
            .collect();
        assert_eq!(tokens, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn available_purchases_concatenate_in_the_same_order() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_get_available_items_by_type()
            .with(eq(AndroidItemType::InApp))
            .returning(|_| Ok(vec![json!({ "productId": "remove_ads" })]));
        module
            .expect_get_available_items_by_type()
            .with(eq(AndroidItemType::Subscription))
            .returning(|_| Ok(vec![json!({ "productId": "yearly" })]));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let available = backend.get_available_purchases().await.unwrap();

        let ids: Vec<&str> = available.iter().map(|p| p.product_id.as_str()).collect();
        assert_eq!(ids, vec!["remove_ads", "yearly"]);
    }

    #[tokio::test]
    async fn subscription_failure_rejects_whole_history() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_get_purchase_history_by_type()
            .with(eq(AndroidItemType::InApp))
            .returning(|_| Ok(vec![json!({ "productId": "gems_100" })]));
        module
            .expect_get_purchase_history_by_type()
            .with(eq(AndroidItemType::Subscription))
            .returning(|_| Err(IapError::native("RNIapAndroidModule", "E_SERVICE_ERROR")));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        assert!(backend.get_purchase_history().await.is_err());
    }

    #[tokio::test]
    async fn product_purchase_sends_in_app_type_without_replacement() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_buy_item_by_type()
            .withf(|item_type, sku, old_sku, proration_mode| {
                *item_type == AndroidItemType::InApp
                    && sku == "gems_100"
                    && old_sku.is_none()
                    && proration_mode.as_i32() == 0
            })
            .times(1)
            .returning(|_, sku, _, _| Ok(json!({ "productId": sku, "purchaseToken": "t" })));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let purchase = backend.buy_product("gems_100").await.unwrap().unwrap();

        assert_eq!(purchase.product_id, "gems_100");
    }

    #[tokio::test]
    async fn subscription_purchase_forwards_replacement() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_buy_item_by_type()
            .withf(|item_type, sku, old_sku, proration_mode| {
                *item_type == AndroidItemType::Subscription
                    && sku == "yearly"
                    && old_sku.as_deref() == Some("monthly")
                    && *proration_mode == ProrationMode::ImmediateWithTimeProration
            })
            .times(1)
            .returning(|_, sku, _, _| Ok(json!({ "productId": sku })));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        backend
            .buy_subscription(
                "yearly",
                Some("monthly"),
                ProrationMode::ImmediateWithTimeProration,
            )
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn products_query_uses_in_app_type() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_get_items_by_type()
            .withf(|item_type, skus| {
                *item_type == AndroidItemType::InApp && skus == &vec!["gems_100".to_string()]
            })
            .returning(|_, _| Ok(vec![json!({ "productId": "gems_100", "price": "0.99" })]));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let products = backend.get_products(&["gems_100".to_string()]).await.unwrap();

        assert_eq!(products[0].price.as_deref(), Some("0.99"));
    }

    #[tokio::test]
    async fn malformed_item_is_an_error_not_filtered() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_get_items_by_type()
            .returning(|_, _| Ok(vec![json!({ "price": "0.99" })]));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let err = backend.get_subscriptions(&[]).await.unwrap_err();

        assert!(matches!(err, IapError::InvalidNativePayload { .. }));
    }

    #[tokio::test]
    async fn consume_all_items_refreshes_items() {
        let mut module = MockGooglePlayBillingModule::new();
        module.expect_refresh_items().times(1).returning(|| Ok(()));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        backend.consume_all_items().await.unwrap();
    }

    #[tokio::test]
    async fn purchase_without_finish_sends_in_app_type() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_buy_item_by_type()
            .withf(|item_type, sku, old_sku, proration_mode| {
                *item_type == AndroidItemType::InApp
                    && sku == "remove_ads"
                    && old_sku.is_none()
                    && proration_mode.as_i32() == 0
            })
            .times(1)
            .returning(|_, sku, _, _| Ok(json!({ "productId": sku, "purchaseToken": "t" })));
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let purchase = backend
            .buy_product_without_finish_transaction("remove_ads")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(purchase.purchase_token.as_deref(), Some("t"));
    }

    #[tokio::test]
    async fn subscriptions_query_uses_subscription_type() {
        let mut module = MockGooglePlayBillingModule::new();
        module
            .expect_get_items_by_type()
            .withf(|item_type, skus| {
                *item_type == AndroidItemType::Subscription
                    && skus == &vec!["monthly".to_string(), "yearly".to_string()]
            })
            .times(1)
            .returning(|_, _| {
                Ok(vec![
                    json!({ "productId": "monthly", "subscriptionPeriodAndroid": "P1M" }),
                    json!({ "productId": "yearly", "subscriptionPeriodAndroid": "P1Y" }),
                ])
            });
        let backend = GooglePlayPurchaseBackend::new(Arc::new(module));

        let subscriptions = backend
            .get_subscriptions(&["monthly".to_string(), "yearly".to_string()])
            .await
            .unwrap();

        assert_eq!(subscriptions.len(), 2);
        assert_eq!(
            subscriptions[1].extra.get("subscriptionPeriodAndroid"),
            Some(&json!("P1Y"))
        );
    }
}
