use serde_repr::{Deserialize_repr, Serialize_repr};

/// Google Play policy for crediting unused subscription time when switching
/// from one subscription to another.
///
/// https://developer.android.com/reference/com/android/billingclient/api/BillingFlowParams.ProrationMode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize_repr, Deserialize_repr)]
#[repr(i32)]
pub enum ProrationMode {
    /// No mode was requested by the caller. Sent to the billing module as -1.
    #[default]
    Unset = -1,
    /// Also what one-time product purchases send.
    UnknownSubscriptionUpgradeDowngradePolicy = 0,
    ImmediateWithTimeProration = 1,
    ImmediateAndChargeProratedPrice = 2,
    ImmediateWithoutProration = 3,
    Deferred = 4,
    ImmediateAndChargeFullPrice = 5,
}

impl ProrationMode {
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}
