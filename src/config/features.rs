//! Feature flags configuration

use serde::Deserialize;

/// Recording policies that can be switched per deployment
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
pub struct FeatureFlags {
    /// Reject events whose session does not exist
    #[serde(default = "default_true")]
    pub enforce_session_exists: bool,

    /// Refresh a session's lastEventTime and duration when an event arrives
    #[serde(default = "default_true")]
    pub track_session_activity: bool,
}

impl Default for FeatureFlags {
    fn default() -> Self {
        Self {
            enforce_session_exists: true,
            track_session_activity: true,
        }
    }
}

fn default_true() -> bool {
    true
}
