use serde_json::Value;

/// Value of the `status` field in an App Store verifyReceipt response.
///
/// https://developer.apple.com/documentation/appstorereceipts/status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppleReceiptStatus {
    Valid,
    /// The request to the App Store was not made using HTTP POST.
    BadRequestMethod,
    MalformedReceiptData,
    ReceiptNotAuthenticated,
    /// The shared secret does not match the one on file for the account.
    SharedSecretMismatch,
    ServerUnavailable,
    /// The receipt is valid, but the subscription has expired.
    SubscriptionExpired,
    /// A sandbox receipt was sent to the production environment.
    SandboxReceiptSentToProduction,
    /// A production receipt was sent to the sandbox environment.
    ProductionReceiptSentToSandbox,
    /// Internal data access error, retryable (21009 and 21100-21199).
    InternalDataAccessError(i64),
    /// The user account cannot be found or has been deleted.
    AccountNotFound,

    Unknown(i64),
}

impl AppleReceiptStatus {
    pub fn from_code(code: i64) -> Self {
        match code {
            0 => Self::Valid,
            21000 => Self::BadRequestMethod,
            21002 => Self::MalformedReceiptData,
            21003 => Self::ReceiptNotAuthenticated,
            21004 => Self::SharedSecretMismatch,
            21005 => Self::ServerUnavailable,
            21006 => Self::SubscriptionExpired,
            21007 => Self::SandboxReceiptSentToProduction,
            21008 => Self::ProductionReceiptSentToSandbox,
            21009 | 21100..=21199 => Self::InternalDataAccessError(code),
            21010 => Self::AccountNotFound,
            other => Self::Unknown(other),
        }
    }

    /// Reads the status from a verifyReceipt response body. `None` if the body
    /// has no numeric `status` field.
    pub fn from_response(body: &Value) -> Option<Self> {
        body.get("status").and_then(Value::as_i64).map(Self::from_code)
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid | Self::SubscriptionExpired)
    }
}
