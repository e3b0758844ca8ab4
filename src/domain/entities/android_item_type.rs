use crate::constants::{ANDROID_ITEM_TYPE_IAP, ANDROID_ITEM_TYPE_SUBSCRIPTION};

/// Item type tag understood by the Google Play billing module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AndroidItemType {
    /// One-time products, consumable or not.
    InApp,
    Subscription,
}

impl AndroidItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            AndroidItemType::InApp => ANDROID_ITEM_TYPE_IAP,
            AndroidItemType::Subscription => ANDROID_ITEM_TYPE_SUBSCRIPTION,
        }
    }
}

impl std::fmt::Display for AndroidItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
