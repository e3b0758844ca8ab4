use thiserror::Error;

#[derive(Debug, Error)]
pub enum IapError {
    /// A native module rejected the call. Forwarded as-is.
    #[error("{module}: {message}")]
    Native {
        module: &'static str,
        message: String,
    },

    #[error("native module {0} is not available on this device")]
    NativeModuleMissing(&'static str),

    #[error("invalid payload from native module: {message}")]
    InvalidNativePayload { message: String },

    /// Receipt validation endpoint answered with a non-2xx status. The message
    /// is the HTTP status text.
    #[error("{message}")]
    Http { status_code: u16, message: String },

    #[error("receipt validation callout failed to send")]
    Network(#[source] reqwest::Error),

    #[error("failed to parse receipt validation response")]
    InvalidResponse(#[source] reqwest::Error),

    #[error("Google Play credentials invalid: {message}")]
    GoogleCredentialsInvalid { message: String },
}

impl IapError {
    pub fn native(module: &'static str, message: impl Into<String>) -> Self {
        Self::Native {
            module,
            message: message.into(),
        }
    }

    pub(crate) fn invalid_payload(message: impl Into<String>) -> Self {
        Self::InvalidNativePayload {
            message: message.into(),
        }
    }

    /// Numeric HTTP status attached to a failed receipt validation.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Http { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }
}
