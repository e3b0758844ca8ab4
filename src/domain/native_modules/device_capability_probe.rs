use async_trait::async_trait;

use crate::errors::IapError;

/// Native capability probe (`RNIapCombinedModule`).
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DeviceCapabilityProbe: Send + Sync {
    /// Whether the device reports the
    /// [`AMAZON_DEVICE_FEATURE`](crate::constants::AMAZON_DEVICE_FEATURE)
    /// system feature. `None` when the probe could not tell.
    async fn is_amazon_device(&self) -> Result<Option<bool>, IapError>;
}
