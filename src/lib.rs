pub(crate) mod data {
    pub(crate) mod backends {
        pub(crate) mod amazon_purchase_backend;
        pub(crate) mod google_play_purchase_backend;
        pub(crate) mod ios_purchase_backend;
        pub(crate) mod noop_purchase_backend;
    }
    pub(crate) mod datasources {
        pub(crate) mod google_access_token_datasource;
        pub(crate) mod receipt_validation_datasource;
    }
}

pub mod domain {
    pub mod entities {
        pub mod amazon_product;
        pub mod amazon_receipt;
        pub mod amazon_user_data;
        pub mod android_item_type;
        pub mod android_receipt_request;
        pub mod apple_receipt_status;
        pub mod fulfillment_result;
        pub mod platform;
        pub mod product;
        pub mod proration_mode;
        pub mod purchase;
        pub mod purchase_listener_subscription;
    }
    pub mod native_modules {
        pub mod amazon_iap_module;
        pub mod device_capability_probe;
        pub mod google_play_billing_module;
        pub mod ios_purchase_module;
    }
    pub(crate) mod repositories {
        pub(crate) mod purchase_backend;
    }
    pub(crate) mod services {
        pub(crate) mod device_classifier;
    }
}

pub mod config;
pub mod constants;
pub mod errors;
pub mod util;

pub use data::datasources::google_access_token_datasource::GoogleAccessTokenProvider;
