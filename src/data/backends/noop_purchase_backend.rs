use async_trait::async_trait;

use crate::{domain::repositories::purchase_backend::PurchaseBackend, errors::IapError};

/// Selected when there is no store to talk to: on platforms without one, and
/// for App Store only operations called elsewhere. Every operation resolves
/// without doing anything.
pub(crate) struct NoopPurchaseBackend;

#[async_trait]
impl PurchaseBackend for NoopPurchaseBackend {
    fn name(&self) -> &'static str {
        "noop"
    }

    async fn init_connection(&self) -> Result<bool, IapError> {
        Ok(false)
    }
}
