use std::sync::Arc;

use crate::domain::native_modules::ios_purchase_module::{IosPurchaseModule, ListenerId};

/// Live registration of a purchase listener on the native iOS event emitter.
///
/// The listener is removed when this handle is dropped, or earlier through
/// [`remove`](Self::remove).
pub struct PurchaseListenerSubscription {
    module: Arc<dyn IosPurchaseModule>,
    id: ListenerId,
    removed: bool,
}

impl PurchaseListenerSubscription {
    pub(crate) fn new(module: Arc<dyn IosPurchaseModule>, id: ListenerId) -> Self {
        Self {
            module,
            id,
            removed: false,
        }
    }

    pub fn id(&self) -> ListenerId {
        self.id
    }

    pub fn remove(mut self) {
        self.unregister();
    }

    fn unregister(&mut self) {
        if !self.removed {
            self.removed = true;
            self.module.remove_listener(self.id);
        }
    }
}

impl Drop for PurchaseListenerSubscription {
    fn drop(&mut self) {
        self.unregister();
    }
}

impl std::fmt::Debug for PurchaseListenerSubscription {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PurchaseListenerSubscription")
            .field("id", &self.id)
            .field("removed", &self.removed)
            .finish()
    }
}
