use std::sync::Arc;

use serde_json::Value;

use crate::{
    config::ReceiptValidationConfig,
    constants::{AMAZON_MODULE, GOOGLE_PLAY_MODULE, IOS_MODULE, PURCHASE_EVENT},
    data::{
        backends::{
            amazon_purchase_backend::AmazonPurchaseBackend,
            google_play_purchase_backend::GooglePlayPurchaseBackend,
            ios_purchase_backend::IosPurchaseBackend,
            noop_purchase_backend::NoopPurchaseBackend,
        },
        datasources::receipt_validation_datasource::{
            ReceiptValidationDatasource, ReceiptValidationDatasourceImpl,
        },
    },
    domain::{
        entities::{
            amazon_user_data::AmazonUserData, android_receipt_request::AndroidReceiptRequest,
            fulfillment_result::FulfillmentResult, platform::Platform, product::Product,
            proration_mode::ProrationMode, purchase::Purchase,
            purchase_listener_subscription::PurchaseListenerSubscription,
        },
        native_modules::{
            amazon_iap_module::AmazonIapModule, device_capability_probe::DeviceCapabilityProbe,
            google_play_billing_module::GooglePlayBillingModule,
            ios_purchase_module::IosPurchaseModule,
        },
        repositories::purchase_backend::PurchaseBackend,
        services::device_classifier::DeviceClassifier,
    },
    errors::IapError,
};

/// Native modules linked into the host application.
///
/// A host only provides the modules of the platform it runs on; the rest stay
/// `None`. Dispatching to a missing module fails with
/// [`IapError::NativeModuleMissing`].
#[derive(Default, Clone)]
pub struct NativeModules {
    pub ios: Option<Arc<dyn IosPurchaseModule>>,
    pub google_play: Option<Arc<dyn GooglePlayBillingModule>>,
    pub amazon: Option<Arc<dyn AmazonIapModule>>,
    pub device_probe: Option<Arc<dyn DeviceCapabilityProbe>>,
}

/// Callback for purchases completed on iOS.
pub type PurchaseHandler = Arc<dyn Fn(Purchase) + Send + Sync>;

/// Single entry point for the purchase flow on every store.
///
/// Each call resolves the store to talk to (App Store on iOS; Amazon or
/// Google Play on Android, depending on the device) and forwards to exactly
/// one backend.
pub struct IapUtil {
    platform: Platform,
    modules: NativeModules,
    device_classifier: DeviceClassifier,
    receipt_validation_datasource: Arc<dyn ReceiptValidationDatasource>,
}

impl IapUtil {
    pub fn new(
        modules: NativeModules,
        platform: Platform,
        receipt_validation_config: ReceiptValidationConfig,
    ) -> Self {
        Self::with_datasource(
            modules,
            platform,
            Arc::new(ReceiptValidationDatasourceImpl::new(
                receipt_validation_config,
            )),
        )
    }

    /// Platform from the compilation target and receipt endpoints from the
    /// environment.
    pub fn for_current_platform(modules: NativeModules) -> Self {
        Self::new(
            modules,
            Platform::current(),
            ReceiptValidationConfig::from_env(),
        )
    }

    pub(crate) fn with_datasource(
        modules: NativeModules,
        platform: Platform,
        receipt_validation_datasource: Arc<dyn ReceiptValidationDatasource>,
    ) -> Self {
        Self {
            platform,
            device_classifier: DeviceClassifier::new(modules.device_probe.clone()),
            modules,
            receipt_validation_datasource,
        }
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    // Lifecycle.
    // ----------------------------

    /// Init module for purchase flow. Required on Android. On iOS this only
    /// checks whether the user can make payments.
    pub async fn init_connection(&self) -> Result<bool, IapError> {
        self.backend("init_connection").await?.init_connection().await
    }

    #[deprecated(note = "use `init_connection` instead")]
    pub async fn prepare(&self) -> Result<bool, IapError> {
        tracing::warn!("`prepare` is deprecated, use `init_connection` instead");
        self.init_connection().await
    }

    pub async fn end_connection(&self) -> Result<(), IapError> {
        self.backend("end_connection").await?.end_connection().await
    }

    /// Consume all remaining tokens. Google Play only.
    pub async fn consume_all_items(&self) -> Result<(), IapError> {
        self.backend("consume_all_items")
            .await?
            .consume_all_items()
            .await
    }

    // Catalog.
    // ----------------------------

    /// One-time products (consumable and non-consumable), not subscriptions.
    pub async fn get_products(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.backend("get_products").await?.get_products(skus).await
    }

    pub async fn get_subscriptions(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.backend("get_subscriptions")
            .await?
            .get_subscriptions(skus)
            .await
    }

    // Purchase history.
    // ----------------------------

    /// Every purchase made by the user, regardless of consumption status.
    pub async fn get_purchase_history(&self) -> Result<Vec<Purchase>, IapError> {
        self.backend("get_purchase_history")
            .await?
            .get_purchase_history()
            .await
    }

    /// Purchases that are non-consumable or not consumed yet.
    pub async fn get_available_purchases(&self) -> Result<Vec<Purchase>, IapError> {
        self.backend("get_available_purchases")
            .await?
            .get_available_purchases()
            .await
    }

    // Purchase flow.
    // ----------------------------

    pub async fn buy_product(&self, sku: &str) -> Result<Option<Purchase>, IapError> {
        self.backend("buy_product").await?.buy_product(sku).await
    }

    /// old_sku:
    ///   Subscription being replaced on upgrade/downgrade (Google Play only).
    /// proration_mode:
    ///   Google Play only. Sent as [`ProrationMode::Unset`] when omitted.
    pub async fn buy_subscription(
        &self,
        sku: &str,
        old_sku: Option<&str>,
        proration_mode: Option<ProrationMode>,
    ) -> Result<Option<Purchase>, IapError> {
        self.backend("buy_subscription")
            .await?
            .buy_subscription(sku, old_sku, proration_mode.unwrap_or_default())
            .await
    }

    /// App Store only; resolves to `None` elsewhere.
    pub async fn buy_product_with_quantity_ios(
        &self,
        sku: &str,
        quantity: u32,
    ) -> Result<Option<Purchase>, IapError> {
        self.app_store_backend("buy_product_with_quantity_ios")
            .await?
            .buy_product_with_quantity(sku, quantity)
            .await
    }

    /// On iOS the transaction stays open until [`finish_transaction`] is
    /// called, typically after receipt validation.
    ///
    /// [`finish_transaction`]: Self::finish_transaction
    pub async fn buy_product_without_finish_transaction(
        &self,
        sku: &str,
    ) -> Result<Option<Purchase>, IapError> {
        self.backend("buy_product_without_finish_transaction")
            .await?
            .buy_product_without_finish_transaction(sku)
            .await
    }

    pub async fn finish_transaction(&self) -> Result<(), IapError> {
        self.app_store_backend("finish_transaction")
            .await?
            .finish_transaction()
            .await
    }

    /// Finish every remaining transaction (iOS only).
    pub async fn clear_transaction(&self) -> Result<(), IapError> {
        self.app_store_backend("clear_transaction")
            .await?
            .clear_transaction()
            .await
    }

    /// Remove all products validated by the App Store (iOS only).
    pub async fn clear_products(&self) -> Result<(), IapError> {
        self.app_store_backend("clear_products").await?.clear_products().await
    }

    /// Consume a purchase by its token (Google Play). No-op on iOS, where a
    /// purchase is consumed as soon as it completes.
    pub async fn consume_purchase(&self, purchase_token: &str) -> Result<(), IapError> {
        self.backend("consume_purchase")
            .await?
            .consume_purchase(purchase_token)
            .await
    }

    // Promoted products (iOS).
    // ----------------------------

    pub async fn get_promoted_product(&self) -> Result<Option<String>, IapError> {
        self.app_store_backend("get_promoted_product")
            .await?
            .get_promoted_product()
            .await
    }

    /// Should only be called in response to a
    /// [`PROMOTED_PRODUCT`](crate::constants::PROMOTED_PRODUCT) event.
    pub async fn buy_promoted_product(&self) -> Result<(), IapError> {
        self.app_store_backend("buy_promoted_product")
            .await?
            .buy_promoted_product()
            .await
    }

    // Receipt validation.
    // ----------------------------

    /// Sends `receipt_body` to Apple's verifyReceipt endpoint, the sandbox one
    /// when `is_test` is set, and returns the response body untouched.
    pub async fn validate_receipt_ios(
        &self,
        receipt_body: &Value,
        is_test: bool,
    ) -> Result<Value, IapError> {
        self.receipt_validation_datasource
            .verify_receipt(receipt_body, is_test)
            .await
    }

    /// Looks the purchase up with the Google Play Developer API and returns
    /// the response body untouched.
    pub async fn validate_receipt_android(
        &self,
        request: &AndroidReceiptRequest,
    ) -> Result<Value, IapError> {
        self.receipt_validation_datasource
            .get_purchase(request)
            .await
    }

    // Amazon.
    // ----------------------------

    /// Forwarded to the Amazon module whatever the device is.
    pub async fn notify_fulfillment_amazon(
        &self,
        receipt_id: &str,
        fulfillment_result: FulfillmentResult,
    ) -> Result<(), IapError> {
        tracing::info!(
            receipt_id,
            result = fulfillment_result.as_str(),
            "Notifying Amazon fulfillment"
        );
        self.amazon_module()?
            .notify_fulfillment(receipt_id, fulfillment_result)
            .await
    }

    /// Forwarded to the Amazon module whatever the device is.
    pub async fn get_user_data(&self) -> Result<AmazonUserData, IapError> {
        let user_data = self.amazon_module()?.get_user_data().await?;
        tracing::info!(
            marketplace = %user_data.marketplace,
            "Retrieved Amazon user data"
        );
        Ok(user_data)
    }

    pub async fn check_is_amazon_device(&self) -> Result<bool, IapError> {
        self.device_classifier.is_amazon_device().await
    }

    // Listeners.
    // ----------------------------

    /// Calls `handler` for every purchase the App Store completes, including
    /// ones started outside the app. Returns `None` on other platforms.
    pub fn add_additional_success_purchase_listener_ios(
        &self,
        handler: PurchaseHandler,
    ) -> Result<Option<PurchaseListenerSubscription>, IapError> {
        if self.platform != Platform::Ios {
            tracing::info!("Adding a purchase listener is only supported on iOS");
            return Ok(None);
        }
        let module = self
            .modules
            .ios
            .clone()
            .ok_or(IapError::NativeModuleMissing(IOS_MODULE))?;
        let id = module.add_listener(
            PURCHASE_EVENT,
            Box::new(move |payload| match Purchase::from_native(payload) {
                Ok(purchase) => handler(purchase),
                Err(e) => tracing::warn!(error = %e, "Ignoring undecodable purchase event"),
            }),
        );
        Ok(Some(PurchaseListenerSubscription::new(module, id)))
    }

    // Dispatch.
    // ----------------------------

    async fn backend(&self, operation: &'static str) -> Result<Box<dyn PurchaseBackend>, IapError> {
        let backend: Box<dyn PurchaseBackend> = match self.platform {
            Platform::Ios => Box::new(IosPurchaseBackend::new(
                self.modules
                    .ios
                    .clone()
                    .ok_or(IapError::NativeModuleMissing(IOS_MODULE))?,
            )),
            Platform::Android => {
                if self.device_classifier.is_amazon_device().await? {
                    Box::new(AmazonPurchaseBackend::new(self.amazon_module()?))
                } else {
                    Box::new(GooglePlayPurchaseBackend::new(
                        self.modules
                            .google_play
                            .clone()
                            .ok_or(IapError::NativeModuleMissing(GOOGLE_PLAY_MODULE))?,
                    ))
                }
            }
            Platform::Unsupported => {
                tracing::warn!(operation, "No store on this platform, ignoring call");
                Box::new(NoopPurchaseBackend)
            }
        };
        tracing::debug!(operation, backend = backend.name(), "Dispatching");
        Ok(backend)
    }

    /// Operations only the App Store implements resolve as no-ops elsewhere,
    /// without classifying the device.
    async fn app_store_backend(
        &self,
        operation: &'static str,
    ) -> Result<Box<dyn PurchaseBackend>, IapError> {
        match self.platform {
            Platform::Ios => self.backend(operation).await,
            Platform::Android | Platform::Unsupported => Ok(Box::new(NoopPurchaseBackend)),
        }
    }

    fn amazon_module(&self) -> Result<Arc<dyn AmazonIapModule>, IapError> {
        self.modules
            .amazon
            .clone()
            .ok_or(IapError::NativeModuleMissing(AMAZON_MODULE))
    }
}
