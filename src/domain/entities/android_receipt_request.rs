/// Everything the Google Play Developer API needs to look up a purchase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AndroidReceiptRequest {
    /// Package name of the app, e.g. 'com.some.thing'.
    pub package_name: String,
    pub product_id: String,
    /// Token handed to the device when the purchase was made.
    pub purchase_token: String,
    /// OAuth access token with the androidpublisher scope.
    pub access_token: String,
    pub is_subscription: bool,
}

impl AndroidReceiptRequest {
    pub(crate) fn purchase_type(&self) -> &'static str {
        if self.is_subscription {
            "subscriptions"
        } else {
            "products"
        }
    }
}
