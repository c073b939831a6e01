//! Tab State Machine
//!
//! ```text
//! Created
//!   ↓ switch
//! Active  ⇄  Inactive
//!   ↓ close     ↓ close
//! Closed (terminal)
//! ```

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TabState {
    /// Mounted but never shown
    Created,
    /// Bound to the live editing surface the user is typing into
    Active,
    /// Switched away from, content held in the tab
    Inactive,
    /// Surface disposed, removed from the registry
    Closed,
}

impl TabState {
    /// Check if transition to another state is valid
    pub fn can_transition_to(&self, target: TabState) -> bool {
        match (self, target) {
            // Nothing leaves Closed, not even a same-state "transition"
            (TabState::Closed, _) => false,
            (a, b) if *a == b => true,
            (TabState::Created, TabState::Active) => true,
            (TabState::Active, TabState::Inactive) => true,
            (TabState::Inactive, TabState::Active) => true,
            (_, TabState::Closed) => true,
            _ => false,
        }
    }

    pub fn is_closed(&self) -> bool {
        matches!(self, TabState::Closed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TabState::Created => "created",
            TabState::Active => "active",
            TabState::Inactive => "inactive",
            TabState::Closed => "closed",
        }
    }
}

impl std::fmt::Display for TabState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for TabState {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "created" => Ok(TabState::Created),
            "active" => Ok(TabState::Active),
            "inactive" => Ok(TabState::Inactive),
            "closed" => Ok(TabState::Closed),
            _ => Err(format!("Unknown tab state: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_transitions() {
        assert!(TabState::Created.can_transition_to(TabState::Active));
        assert!(TabState::Active.can_transition_to(TabState::Inactive));
        assert!(TabState::Inactive.can_transition_to(TabState::Active));
        // Any live state may close
        assert!(TabState::Created.can_transition_to(TabState::Closed));
        assert!(TabState::Active.can_transition_to(TabState::Closed));
        assert!(TabState::Inactive.can_transition_to(TabState::Closed));
    }

    #[test]
    fn test_invalid_transitions() {
        assert!(!TabState::Created.can_transition_to(TabState::Inactive));
        assert!(!TabState::Inactive.can_transition_to(TabState::Created));
        assert!(!TabState::Closed.can_transition_to(TabState::Active));
        assert!(!TabState::Closed.can_transition_to(TabState::Closed));
    }

    #[test]
    fn test_parse_and_serialize() {
        assert_eq!("Inactive".parse::<TabState>(), Ok(TabState::Inactive));
        assert!("frozen".parse::<TabState>().is_err());
        assert_eq!(
            serde_json::to_string(&TabState::Active).unwrap(),
            "\"active\""
        );
    }
}
