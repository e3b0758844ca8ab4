use async_trait::async_trait;
use reqwest::{
    header::{ACCEPT, CONTENT_TYPE},
    RequestBuilder,
};
use serde_json::Value;

use crate::{
    config::ReceiptValidationConfig,
    domain::entities::android_receipt_request::AndroidReceiptRequest, errors::IapError,
};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub(crate) trait ReceiptValidationDatasource: Send + Sync {
    /// verifyReceipt:
    /// https://developer.apple.com/documentation/appstorereceipts/verifyreceipt
    ///
    /// receipt_body:
    ///   Request body, sent as-is (receipt-data, password, ...).
    /// is_test:
    ///   Whether to call the sandbox environment.
    async fn verify_receipt(&self, receipt_body: &Value, is_test: bool)
        -> Result<Value, IapError>;

    /// purchases.products.get / purchases.subscriptions.get (v2):
    /// https://developers.google.com/android-publisher/api-ref/rest/v3/purchases.products/get
    async fn get_purchase(&self, request: &AndroidReceiptRequest) -> Result<Value, IapError>;
}

pub(crate) struct ReceiptValidationDatasourceImpl {
    client: reqwest::Client,
    config: ReceiptValidationConfig,
}

#[async_trait]
impl ReceiptValidationDatasource for ReceiptValidationDatasourceImpl {
    async fn verify_receipt(
        &self,
        receipt_body: &Value,
        is_test: bool,
    ) -> Result<Value, IapError> {
        let url = self.config.apple_verify_url(is_test);
        let request = self
            .client
            .post(url)
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(receipt_body);
        self.callout(request, url).await
    }

    async fn get_purchase(&self, request: &AndroidReceiptRequest) -> Result<Value, IapError> {
        let url = google_play_purchase_url(&self.config.google_play_base_url, request);
        let builder = self.client.get(&url).header(ACCEPT, "application/json");
        self.callout(builder, &redact_access_token(&url)).await
    }
}

impl ReceiptValidationDatasourceImpl {
    pub(crate) fn new(config: ReceiptValidationConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    async fn callout(&self, request: RequestBuilder, endpoint: &str) -> Result<Value, IapError> {
        let response = request.send().await.map_err(|e| {
            tracing::debug!(endpoint, error = ?e, "Receipt validation callout failed to send");
            IapError::Network(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(
                endpoint,
                status = status.as_u16(),
                "Receipt validation callout returned non-2xx status"
            );
            return Err(IapError::Http {
                status_code: status.as_u16(),
                message: status
                    .canonical_reason()
                    .unwrap_or(status.as_str())
                    .to_string(),
            });
        }

        response.json().await.map_err(IapError::InvalidResponse)
    }
}

pub(crate) fn google_play_purchase_url(base_url: &str, request: &AndroidReceiptRequest) -> String {
    format!(
        "{base_url}/{package_name}/purchases/{purchase_type}/{product_id}/tokens/{token}?access_token={access_token}",
        package_name = request.package_name,
        purchase_type = request.purchase_type(),
        product_id = request.product_id,
        token = request.purchase_token,
        access_token = request.access_token,
    )
}

fn redact_access_token(url: &str) -> String {
    match url.split_once("?access_token=") {
        Some((path, _)) => format!("{path}?access_token=<redacted>"),
        None => url.to_string(),
    }
}
