use serde::{Deserialize, Serialize};

/// Deployment switches that widen what the resolver accepts.
///
/// Both are off by default: an `other` jurisdiction blocks finalization and
/// economic applications must name their sponsor explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EligibilityPolicy {
    pub accept_other_consulate: bool,
    pub economic_sponsor_defaults: bool,
}

impl EligibilityPolicy {
    pub fn with_accept_other_consulate(mut self, accept: bool) -> Self {
        self.accept_other_consulate = accept;
        self
    }

    pub fn with_economic_sponsor_defaults(mut self, enabled: bool) -> Self {
        self.economic_sponsor_defaults = enabled;
        self
    }
}
