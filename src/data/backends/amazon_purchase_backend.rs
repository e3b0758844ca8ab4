use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::{
    constants::{ANDROID_ITEM_TYPE_IAP, ANDROID_ITEM_TYPE_SUBSCRIPTION},
    domain::{
        entities::{
            amazon_product::{AmazonProduct, AmazonProductType},
            amazon_receipt::AmazonReceipt,
            product::Product,
            proration_mode::ProrationMode,
            purchase::Purchase,
        },
        native_modules::amazon_iap_module::AmazonIapModule,
        repositories::purchase_backend::PurchaseBackend,
    },
    errors::IapError,
};

pub(crate) struct AmazonPurchaseBackend {
    module: Arc<dyn AmazonIapModule>,
}

impl AmazonPurchaseBackend {
    pub(crate) fn new(module: Arc<dyn AmazonIapModule>) -> Self {
        Self { module }
    }

    async fn get_product_data(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.module
            .get_product_data(skus.to_vec())
            .await?
            .into_iter()
            .map(Product::from_amazon_product)
            .collect()
    }

    async fn purchase(&self, sku: &str) -> Result<Option<Purchase>, IapError> {
        let receipt = self.module.purchase(sku).await?;
        Ok(Some(Purchase::from_amazon_receipt(receipt)))
    }

    // Amazon has no separate query for owned items; the full purchase update
    // history serves both.
    async fn purchase_updates(&self) -> Result<Vec<Purchase>, IapError> {
        Ok(self
            .module
            .get_purchase_updates(true)
            .await?
            .into_iter()
            .map(Purchase::from_amazon_receipt)
            .collect())
    }
}

#[async_trait]
impl PurchaseBackend for AmazonPurchaseBackend {
    fn name(&self) -> &'static str {
        "amazon"
    }

    // The Appstore SDK has no billing session to open; it is always ready.
    async fn init_connection(&self) -> Result<bool, IapError> {
        Ok(true)
    }

    async fn get_products(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.get_product_data(skus).await
    }

    async fn get_subscriptions(&self, skus: &[String]) -> Result<Vec<Product>, IapError> {
        self.get_product_data(skus).await
    }

    async fn get_purchase_history(&self) -> Result<Vec<Purchase>, IapError> {
        self.purchase_updates().await
    }

    async fn get_available_purchases(&self) -> Result<Vec<Purchase>, IapError> {
        self.purchase_updates().await
    }

    async fn buy_product(&self, sku: &str) -> Result<Option<Purchase>, IapError> {
        self.purchase(sku).await
    }

    async fn buy_subscription(
        &self,
        sku: &str,
        _old_sku: Option<&str>,
        _proration_mode: ProrationMode,
    ) -> Result<Option<Purchase>, IapError> {
        self.purchase(sku).await
    }

    async fn buy_product_without_finish_transaction(
        &self,
        sku: &str,
    ) -> Result<Option<Purchase>, IapError> {
        self.purchase(sku).await
    }
}

impl Product {
    /// Reshape Amazon product data into the fields Google Play reports, so
    /// callers see one product shape on every Android device.
    fn from_amazon_product(p: AmazonProduct) -> Result<Self, IapError> {
        let price = p
            .price
            .as_deref()
            .map(|localized| {
                parse_localized_price(localized).ok_or_else(|| {
                    IapError::invalid_payload(format!(
                        "price parsing error for {}: {localized}",
                        p.sku
                    ))
                })
            })
            .transpose()?;

        let mut extra = Map::new();
        extra.insert(
            "type".to_string(),
            match p.product_type {
                AmazonProductType::Subscription => Value::from(ANDROID_ITEM_TYPE_SUBSCRIPTION),
                AmazonProductType::Entitled | AmazonProductType::Consumable => {
                    Value::from(ANDROID_ITEM_TYPE_IAP)
                }
                AmazonProductType::Unknown(_) => Value::Null,
            },
        );
        extra.insert(
            "localizedPrice".to_string(),
            p.price.clone().map(Value::from).unwrap_or(Value::Null),
        );
        for field in [
            "introductoryPrice",
            "subscriptionPeriodAndroid",
            "freeTrialPeriodAndroid",
            "introductoryPriceCyclesAndroid",
            "introductoryPricePeriodAndroid",
        ] {
            extra.insert(field.to_string(), Value::from(""));
        }

        Ok(Product {
            product_id: p.sku,
            price,
            // The SDK only reports a localized string; the currency is not
            // recoverable from it reliably.
            currency: None,
            title: p.title,
            description: p.description,
            extra,
        })
    }
}

impl Purchase {
    fn from_amazon_receipt(r: AmazonReceipt) -> Self {
        Purchase {
            product_id: r.sku,
            transaction_id: Some(r.receipt_id.clone()),
            transaction_date: Some(r.purchase_date),
            transaction_receipt: Some(r.receipt_id),
            purchase_token: None,
            extra: Map::new(),
        }
    }
}

/// Extracts the numeric amount from a localized price such as "$1,299.99",
/// "1.299,99 €" or "Rp15.000". Returns it in plain decimal notation
/// ("1299.99"), or as an integer when there is no fractional part.
///
/// With both separators present the last one is the decimal separator. With
/// only one kind, it is decimal when it occurs once and is followed by at most
/// two digits; otherwise it groups thousands.
fn parse_localized_price(localized: &str) -> Option<String> {
    let filtered: String = localized
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == ',')
        .collect();
    let raw = filtered.trim_matches(|c| c == '.' || c == ',');
    if !raw.chars().any(|c| c.is_ascii_digit()) {
        return None;
    }

    let normalized = match (raw.rfind('.'), raw.rfind(',')) {
        (Some(dot), Some(comma)) if comma > dot => raw.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => raw.replace(',', ""),
        (Some(dot), None) => single_separator(raw, '.', dot),
        (None, Some(comma)) => single_separator(raw, ',', comma),
        (None, None) => raw.to_string(),
    };

    let value: f64 = normalized.parse().ok()?;
    Some(if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    })
}

fn single_separator(raw: &str, separator: char, last: usize) -> String {
    let is_decimal = raw.matches(separator).count() == 1 && raw.len() - last - 1 <= 2;
    if is_decimal {
        raw.replace(separator, ".")
    } else {
        raw.replace(separator, "")
    }
}
