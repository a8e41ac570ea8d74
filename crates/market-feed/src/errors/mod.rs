//! Error types and failure classification for the market feed crate.
//!
//! This module provides:
//! - [`FeedError`]: The main error enum for all provider and routing operations
//! - [`ErrorClass`]: Classification that decides how callers recover from an error

mod class;

pub use class::ErrorClass;

use thiserror::Error;

use crate::models::ProviderId;

/// Errors that can occur while fetching or normalizing provider data.
///
/// None of these reach the caller of the aggregator API. Each variant is
/// classified into an [`ErrorClass`] via [`class`](Self::class), which tells the
/// aggregator and the fallback chain how to recover.
#[derive(Error, Debug)]
pub enum FeedError {
    /// The requested category is not one of the five known tags.
    /// Rejected before any I/O happens.
    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    /// The provider lacks required configuration (e.g. an API key).
    /// The provider is skipped without a network call.
    #[error("Provider not configured: {provider}")]
    Unconfigured {
        /// The provider that is missing configuration
        provider: ProviderId,
    },

    /// The request never produced a response.
    #[error("Network error: {provider} - {message}")]
    Transport {
        /// The provider that could not be reached
        provider: ProviderId,
        /// The underlying transport error message
        message: String,
    },

    /// The request exceeded the transport timeout.
    #[error("Timeout: {provider}")]
    Timeout {
        /// The provider that timed out
        provider: ProviderId,
    },

    /// The provider answered with a non-success HTTP status.
    #[error("Unexpected status {status} from {provider}")]
    Status {
        /// The provider that returned the status
        provider: ProviderId,
        /// The HTTP status code
        status: u16,
    },

    /// The payload could not be parsed or lacked the expected envelope.
    #[error("Malformed payload from {provider}: {message}")]
    Malformed {
        /// The provider that returned the payload
        provider: ProviderId,
        /// What was wrong with the payload
        message: String,
    },

    /// The provider answered successfully but with no usable rows.
    #[error("Empty result from {provider}")]
    EmptyResult {
        /// The provider that returned nothing
        provider: ProviderId,
    },

    /// A normalized row violated a snapshot invariant.
    #[error("Validation failed: {message}")]
    ValidationFailed {
        /// Description of the validation failure
        message: String,
    },
}

impl FeedError {
    /// Returns the recovery classification for this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use finpulse_market_feed::{ErrorClass, FeedError, ProviderId};
    ///
    /// let error = FeedError::Timeout { provider: ProviderId::Eastmoney };
    /// assert_eq!(error.class(), ErrorClass::Transport);
    ///
    /// let error = FeedError::InvalidCategory("bonds".to_string());
    /// assert_eq!(error.class(), ErrorClass::Input);
    /// ```
    pub fn class(&self) -> ErrorClass {
        match self {
            Self::InvalidCategory(_) => ErrorClass::Input,
            Self::Unconfigured { .. } => ErrorClass::Unconfigured,
            Self::Transport { .. } | Self::Timeout { .. } | Self::Status { .. } => {
                ErrorClass::Transport
            }
            Self::Malformed { .. } | Self::EmptyResult { .. } | Self::ValidationFailed { .. } => {
                ErrorClass::Shape
            }
        }
    }

    /// Map a reqwest failure for `provider` into a transport error.
    pub(crate) fn from_reqwest(provider: ProviderId, error: reqwest::Error) -> Self {
        if error.is_timeout() {
            Self::Timeout { provider }
        } else if let Some(status) = error.status() {
            Self::Status {
                provider,
                status: status.as_u16(),
            }
        } else {
            Self::Transport {
                provider,
                message: error.to_string(),
            }
        }
    }

    pub(crate) fn malformed(provider: ProviderId, message: impl Into<String>) -> Self {
        Self::Malformed {
            provider,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_category_is_input_error() {
        let error = FeedError::InvalidCategory("bonds".to_string());
        assert_eq!(error.class(), ErrorClass::Input);
    }

    #[test]
    fn test_unconfigured_provider_class() {
        let error = FeedError::Unconfigured {
            provider: ProviderId::Tavily,
        };
        assert_eq!(error.class(), ErrorClass::Unconfigured);
    }

    #[test]
    fn test_transport_errors() {
        let errors = [
            FeedError::Transport {
                provider: ProviderId::OpenBb,
                message: "connection refused".to_string(),
            },
            FeedError::Timeout {
                provider: ProviderId::Eastmoney,
            },
            FeedError::Status {
                provider: ProviderId::AkShare,
                status: 502,
            },
        ];
        for error in errors {
            assert_eq!(error.class(), ErrorClass::Transport, "{error}");
        }
    }

    #[test]
    fn test_shape_errors() {
        let errors = [
            FeedError::malformed(ProviderId::Eastmoney, "missing data.diff"),
            FeedError::EmptyResult {
                provider: ProviderId::AkShare,
            },
            FeedError::ValidationFailed {
                message: "price mismatch".to_string(),
            },
        ];
        for error in errors {
            assert_eq!(error.class(), ErrorClass::Shape, "{error}");
        }
    }

    #[test]
    fn test_error_display() {
        let error = FeedError::InvalidCategory("bonds".to_string());
        assert_eq!(format!("{}", error), "Invalid category: bonds");

        let error = FeedError::Status {
            provider: ProviderId::Eastmoney,
            status: 503,
        };
        assert_eq!(format!("{}", error), "Unexpected status 503 from EASTMONEY");

        let error = FeedError::malformed(ProviderId::Tavily, "results is not an array");
        assert_eq!(
            format!("{}", error),
            "Malformed payload from TAVILY: results is not an array"
        );
    }
}
