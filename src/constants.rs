/// Event emitted by the native iOS module when the App Store starts a
/// promoted purchase from outside the app.
pub const PROMOTED_PRODUCT: &str = "iap-promoted-product";

/// Event emitted by the native iOS module for every completed purchase.
pub const PURCHASE_EVENT: &str = "iap-purchase-event";

pub(crate) const ANDROID_ITEM_TYPE_IAP: &str = "inapp";
pub(crate) const ANDROID_ITEM_TYPE_SUBSCRIPTION: &str = "subs";

/// System feature reported by Amazon Fire devices.
pub const AMAZON_DEVICE_FEATURE: &str = "amazon.hardware.fire_tv";

pub(crate) const APPLE_PRODUCTION_VERIFY_RECEIPT_URL: &str =
    "https://buy.itunes.apple.com/verifyReceipt";
pub(crate) const APPLE_SANDBOX_VERIFY_RECEIPT_URL: &str =
    "https://sandbox.itunes.apple.com/verifyReceipt";
pub(crate) const GOOGLE_PLAY_DEVELOPER_API_BASE_URL: &str =
    "https://www.googleapis.com/androidpublisher/v2/applications";
pub(crate) const GOOGLE_ANDROID_PUBLISHER_SCOPE: &str =
    "https://www.googleapis.com/auth/androidpublisher";

pub(crate) const ENV_APPLE_PRODUCTION_VERIFY_URL: &str = "IAP_APPLE_PRODUCTION_VERIFY_URL";
pub(crate) const ENV_APPLE_SANDBOX_VERIFY_URL: &str = "IAP_APPLE_SANDBOX_VERIFY_URL";
pub(crate) const ENV_GOOGLE_PLAY_API_BASE_URL: &str = "IAP_GOOGLE_PLAY_API_BASE_URL";

pub(crate) const IOS_MODULE: &str = "RNIapIos";
pub(crate) const GOOGLE_PLAY_MODULE: &str = "RNIapAndroidModule";
pub(crate) const AMAZON_MODULE: &str = "RNIapAmazonModule";
pub(crate) const DEVICE_PROBE_MODULE: &str = "RNIapCombinedModule";
