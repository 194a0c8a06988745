use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A whole-second duration as it appears in resource options.
///
/// Serializes as a bare integer number of seconds, so
/// `Duration::seconds(300)` becomes `300` in the option map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Duration(u64);

impl Duration {
    pub const fn seconds(seconds: u64) -> Self {
        Self(seconds)
    }

    pub const fn minutes(minutes: u64) -> Self {
        Self(minutes * 60)
    }

    pub const fn as_secs(self) -> u64 {
        self.0
    }
}

impl Display for Duration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}s", self.0)
    }
}
