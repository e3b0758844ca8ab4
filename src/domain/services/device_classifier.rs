use std::sync::Arc;

use crate::{
    constants::DEVICE_PROBE_MODULE,
    domain::native_modules::device_capability_probe::DeviceCapabilityProbe, errors::IapError,
};

/// Tells Amazon devices apart from Google Play devices.
///
/// The probe is asked again on every call; nothing is cached.
pub(crate) struct DeviceClassifier {
    probe: Option<Arc<dyn DeviceCapabilityProbe>>,
}

impl DeviceClassifier {
    pub(crate) fn new(probe: Option<Arc<dyn DeviceCapabilityProbe>>) -> Self {
        Self { probe }
    }

    /// An inconclusive probe counts as a Google Play device. A failing or
    /// missing probe is an error.
    pub(crate) async fn is_amazon_device(&self) -> Result<bool, IapError> {
        let probe = self
            .probe
            .as_ref()
            .ok_or(IapError::NativeModuleMissing(DEVICE_PROBE_MODULE))?;
        let classification = probe.is_amazon_device().await?;
        tracing::debug!(?classification, "Classified Android device");
        Ok(classification.unwrap_or(false))
    }
}
