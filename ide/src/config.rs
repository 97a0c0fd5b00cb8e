use analyzer::ResolverConfig;
use serde::{Deserialize, Serialize};

/// Configuration knobs for [`CompletionEngine`](crate::CompletionEngine).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub resolver: ResolverConfig,
    /// Cancel the in-flight request when a newer one is dispatched, instead of only
    /// discarding its result.
    pub cancel_superseded: bool,
    /// Cap on published items (`None` keeps all).
    pub max_items: Option<usize>,
}
