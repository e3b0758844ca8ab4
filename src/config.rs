use crate::constants::{
    APPLE_PRODUCTION_VERIFY_RECEIPT_URL, APPLE_SANDBOX_VERIFY_RECEIPT_URL,
    ENV_APPLE_PRODUCTION_VERIFY_URL, ENV_APPLE_SANDBOX_VERIFY_URL, ENV_GOOGLE_PLAY_API_BASE_URL,
    GOOGLE_PLAY_DEVELOPER_API_BASE_URL,
};

/// Where receipts are sent for validation.
///
/// Defaults point at the live Apple and Google endpoints. Overriding them is
/// mostly useful to route validation through a proxy or a local test server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceiptValidationConfig {
    pub apple_production_url: String,
    pub apple_sandbox_url: String,
    /// Everything up to and excluding `/{packageName}`.
    pub google_play_base_url: String,
}

impl Default for ReceiptValidationConfig {
    fn default() -> Self {
        Self {
            apple_production_url: APPLE_PRODUCTION_VERIFY_RECEIPT_URL.to_string(),
            apple_sandbox_url: APPLE_SANDBOX_VERIFY_RECEIPT_URL.to_string(),
            google_play_base_url: GOOGLE_PLAY_DEVELOPER_API_BASE_URL.to_string(),
        }
    }
}

impl ReceiptValidationConfig {
    /// Reads `IAP_APPLE_PRODUCTION_VERIFY_URL`, `IAP_APPLE_SANDBOX_VERIFY_URL`
    /// and `IAP_GOOGLE_PLAY_API_BASE_URL`, falling back to the defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            apple_production_url: std::env::var(ENV_APPLE_PRODUCTION_VERIFY_URL)
                .unwrap_or(defaults.apple_production_url),
            apple_sandbox_url: std::env::var(ENV_APPLE_SANDBOX_VERIFY_URL)
                .unwrap_or(defaults.apple_sandbox_url),
            google_play_base_url: std::env::var(ENV_GOOGLE_PLAY_API_BASE_URL)
                .map(|url| url.trim_end_matches('/').to_string())
                .unwrap_or(defaults.google_play_base_url),
        }
    }

    pub(crate) fn apple_verify_url(&self, is_test: bool) -> &str {
        if is_test {
            &self.apple_sandbox_url
        } else {
            &self.apple_production_url
        }
    }
}
