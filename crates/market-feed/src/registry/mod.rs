//! Provider registry module.
//!
//! This module orchestrates the providers, including:
//! - Category routing for news providers
//! - Parallel fan-out and merging of news
//! - The ordered snapshot fallback chain
//! - Snapshot row validation
//! - Diagnostic tracking of every provider attempt

mod aggregator;
mod diagnostics;
mod fallback;
mod router;
mod validator;

pub use aggregator::{filter_by_query, sort_by_recency, NewsAggregator};
pub use diagnostics::{FetchDiagnostics, ProviderAttempt, SkipReason};
pub use fallback::{FallbackChain, Resolved};
pub use router::{domain, is_eligible, select_providers};
pub use validator::{SnapshotValidator, ValidationIssue, ValidationSeverity, ValidatorConfig};
