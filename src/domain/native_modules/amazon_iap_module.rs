use async_trait::async_trait;

use crate::{
    domain::entities::{
        amazon_product::AmazonProduct, amazon_receipt::AmazonReceipt,
        amazon_user_data::AmazonUserData, fulfillment_result::FulfillmentResult,
    },
    errors::IapError,
};

/// Amazon Appstore IAP bridge (`RNIapAmazonModule`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AmazonIapModule: Send + Sync {
    async fn get_product_data(&self, skus: Vec<String>) -> Result<Vec<AmazonProduct>, IapError>;

    /// `reset` requests the full purchase history instead of the changes since
    /// the last call.
    async fn get_purchase_updates(&self, reset: bool) -> Result<Vec<AmazonReceipt>, IapError>;

    async fn purchase(&self, sku: &str) -> Result<AmazonReceipt, IapError>;

    async fn notify_fulfillment(
        &self,
        receipt_id: &str,
        fulfillment_result: FulfillmentResult,
    ) -> Result<(), IapError>;

    async fn get_user_data(&self) -> Result<AmazonUserData, IapError>;
}
