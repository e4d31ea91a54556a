//! Policy for mutating the timeline behind the playhead.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

/// How the timeline reacts when an entry is added or removed at a point in
/// time the playhead has already passed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum ModifiedBehaviour {
    /// Mutate in place. No notifications fire; the fired pointers are
    /// silently retargeted so the entry counts as "already happened".
    #[default]
    Ignore,
    /// Rewind to just before the affected start time, then mutate. The
    /// playhead stays at the rewound position.
    Rewind,
    /// Rewind as above, mutate, then replay forward to the original time,
    /// firing every boundary in between (including the mutated entry).
    Reapply,
}

impl ModifiedBehaviour {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ModifiedBehaviour::Ignore => "ignore",
            ModifiedBehaviour::Rewind => "rewind",
            ModifiedBehaviour::Reapply => "reapply",
        }
    }

    /// Whether this policy rewinds before mutating.
    pub(crate) fn rewinds(&self) -> bool {
        matches!(self, ModifiedBehaviour::Rewind | ModifiedBehaviour::Reapply)
    }
}

impl std::fmt::Display for ModifiedBehaviour {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_strings() {
        for behaviour in [
            ModifiedBehaviour::Ignore,
            ModifiedBehaviour::Rewind,
            ModifiedBehaviour::Reapply,
        ] {
            assert_eq!(ModifiedBehaviour::from_str(behaviour.as_str()), Some(behaviour));
        }
        assert_eq!(ModifiedBehaviour::from_str("REAPPLY"), Some(ModifiedBehaviour::Reapply));
        assert_eq!(ModifiedBehaviour::from_str("bogus"), None);
    }
}
