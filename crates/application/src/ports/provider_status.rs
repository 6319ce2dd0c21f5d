//! Provider-level status shared by the geocoding and directions replies

use serde::{Deserialize, Serialize};

/// Status string meaning the provider handled the request
pub const STATUS_OK: &str = "OK";
/// The provider understood the request but found nothing
pub const STATUS_ZERO_RESULTS: &str = "ZERO_RESULTS";
/// A referenced location could not be found
pub const STATUS_NOT_FOUND: &str = "NOT_FOUND";

/// Status envelope carried by every provider reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderStatus {
    /// Raw status code, e.g. `OK` or `REQUEST_DENIED`
    pub code: String,
    /// Optional human-readable detail from the provider
    pub error_message: Option<String>,
}

impl ProviderStatus {
    /// A successful status
    #[must_use]
    pub fn ok() -> Self {
        Self::new(STATUS_OK)
    }

    /// A status with the given code and no message
    #[must_use]
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            error_message: None,
        }
    }

    /// Attach a provider error message
    #[must_use]
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.error_message = Some(message.into());
        self
    }

    /// Whether the provider reported success
    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.code == STATUS_OK
    }

    /// Whether the provider reported an empty result set
    #[must_use]
    pub fn is_zero_results(&self) -> bool {
        self.code == STATUS_ZERO_RESULTS
    }

    /// Status code followed by the provider message, if any
    #[must_use]
    pub fn describe(&self) -> String {
        match self.error_message.as_deref() {
            Some(message) if !message.is_empty() => format!("{} - {message}", self.code),
            _ => self.code.clone(),
        }
    }
}
