/// Classification for error recovery.
///
/// Used by the aggregator and the fallback chain to decide what a provider
/// failure means for the request as a whole.
///
/// # Behavior Summary
///
/// | Class | Aggregator | Fallback chain | Logged at |
/// |-------|-----------|----------------|-----------|
/// | `Input` | never called (rejected before I/O) | n/a | n/a |
/// | `Unconfigured` | empty contribution | next tier | debug |
/// | `Transport` | empty contribution | next tier | warn |
/// | `Shape` | empty contribution | next tier | warn |
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    /// The caller asked for something invalid (unknown category).
    /// Surfaced at the API boundary before any provider is contacted.
    Input,

    /// The provider is deliberately not usable in this process
    /// (e.g. no API key). Expected, so it is not treated as an outage.
    Unconfigured,

    /// Network failure, timeout or non-success HTTP status.
    Transport,

    /// The provider answered but the payload was unusable: wrong envelope,
    /// no rows, or rows that failed validation.
    Shape,
}

impl ErrorClass {
    /// Whether the failure indicates a degraded upstream rather than an
    /// expected skip.
    pub fn is_outage(self) -> bool {
        matches!(self, Self::Transport | Self::Shape)
    }
}
