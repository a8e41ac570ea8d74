//! Attempt tracking for aggregation and fallback diagnostics.

use std::fmt;

use crate::errors::ErrorClass;
use crate::models::ProviderId;

/// Why a provider was not asked for data.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SkipReason {
    /// The requested category is outside the provider's domain.
    CategoryOutOfDomain,

    /// The provider lacks configuration (e.g. an API key).
    Unconfigured,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CategoryOutOfDomain => f.write_str("category out of domain"),
            Self::Unconfigured => f.write_str("unconfigured"),
        }
    }
}

/// Record of a single provider attempt.
#[derive(Clone, Debug)]
pub struct ProviderAttempt {
    pub provider_id: ProviderId,
    pub skipped: Option<SkipReason>,
    pub error: Option<String>,
    pub error_class: Option<ErrorClass>,
    /// Rows accepted from this provider.
    pub rows: usize,
    pub success: bool,
}

/// Ordered trail of provider attempts for one request.
#[derive(Clone, Debug, Default)]
pub struct FetchDiagnostics {
    pub attempts: Vec<ProviderAttempt>,
}

impl FetchDiagnostics {
    pub fn new() -> Self {
        Self {
            attempts: Vec::new(),
        }
    }

    pub fn record_skip(&mut self, provider_id: ProviderId, reason: SkipReason) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: Some(reason),
            error: None,
            error_class: None,
            rows: 0,
            success: false,
        });
    }

    pub fn record_error(&mut self, provider_id: ProviderId, class: ErrorClass, error: String) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            error: Some(error),
            error_class: Some(class),
            rows: 0,
            success: false,
        });
    }

    pub fn record_success(&mut self, provider_id: ProviderId, rows: usize) {
        self.attempts.push(ProviderAttempt {
            provider_id,
            skipped: None,
            error: None,
            error_class: None,
            rows,
            success: true,
        });
    }

    /// Summary for logging/debugging.
    pub fn summary(&self) -> String {
        self.attempts
            .iter()
            .map(|a| {
                if a.success {
                    format!("{}: SUCCESS ({} rows)", a.provider_id, a.rows)
                } else if let Some(skip) = &a.skipped {
                    format!("{}: SKIPPED ({})", a.provider_id, skip)
                } else if let Some(err) = &a.error {
                    format!("{}: ERROR ({})", a.provider_id, err)
                } else {
                    format!("{}: UNKNOWN", a.provider_id)
                }
            })
            .collect::<Vec<_>>()
            .join(" -> ")
    }

    pub fn has_success(&self) -> bool {
        self.attempts.iter().any(|a| a.success)
    }

    /// The provider whose data was used, if any.
    pub fn succeeded(&self) -> Option<ProviderId> {
        self.attempts
            .iter()
            .find(|a| a.success)
            .map(|a| a.provider_id)
    }

    pub fn errors(&self) -> Vec<(ProviderId, &str)> {
        self.attempts
            .iter()
            .filter_map(|a| a.error.as_deref().map(|e| (a.provider_id, e)))
            .collect()
    }

    /// Providers that were called and failed in a way that signals an outage.
    pub fn outages(&self) -> Vec<ProviderId> {
        self.attempts
            .iter()
            .filter(|a| a.error_class.is_some_and(ErrorClass::is_outage))
            .map(|a| a.provider_id)
            .collect()
    }
}
