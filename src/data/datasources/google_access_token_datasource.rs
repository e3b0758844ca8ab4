use yup_oauth2::{parse_service_account_key, ServiceAccountAuthenticator};

use crate::{constants::GOOGLE_ANDROID_PUBLISHER_SCOPE, errors::IapError};

/// Mints the OAuth access token that Google Play receipt validation expects,
/// from a service account key with access to the Play Console.
pub struct GoogleAccessTokenProvider {
    service_account_key: String,
}

impl GoogleAccessTokenProvider {
    /// service_account_key:
    ///   The JSON key file contents of the service account.
    pub fn new(service_account_key: impl Into<String>) -> Self {
        Self {
            service_account_key: service_account_key.into(),
        }
    }

    /// Fetches a fresh token scoped to the androidpublisher API.
    pub async fn access_token(&self) -> Result<String, IapError> {
        let key = parse_service_account_key(&self.service_account_key).map_err(|e| {
            IapError::GoogleCredentialsInvalid {
                message: format!("service account key could not be parsed: {e}"),
            }
        })?;
        let authenticator = ServiceAccountAuthenticator::builder(key)
            .build()
            .await
            .map_err(|e| IapError::GoogleCredentialsInvalid {
                message: format!("service account authenticator could not be built: {e}"),
            })?;

        let scopes = &[GOOGLE_ANDROID_PUBLISHER_SCOPE];
        Ok(authenticator
            .token(scopes)
            .await
            .map_err(|e| IapError::GoogleCredentialsInvalid {
                message: format!("service account token could not be built: {e}"),
            })?
            .token()
            .ok_or(IapError::GoogleCredentialsInvalid {
                message: "service account token is empty".to_string(),
            })?
            .to_string())
    }
}
