use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Unique identifier for a Goal.
///
/// Minted from a millisecond timestamp, so later goals carry larger ids.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GoalId(i64);

impl GoalId {
    /// Creates a new `GoalId`
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying i64 value
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Unique identifier for a catalog content entry.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ContentId(u32);

impl ContentId {
    /// Creates a new `ContentId`
    #[must_use]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the underlying u32 value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }
}

/// Unique identifier for a reward request (AMA or merch).
///
/// Minted from a millisecond timestamp like `GoalId`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RequestId(i64);

impl RequestId {
    /// Creates a new `RequestId`
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the underlying i64 value
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl fmt::Debug for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GoalId({})", self.0)
    }
}

impl fmt::Debug for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentId({})", self.0)
    }
}

impl fmt::Debug for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "RequestId({})", self.0)
    }
}

// ─── Display Implementations ───────────────────────────────────────────────────

impl fmt::Display for GoalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ─── FromStr Implementations ───────────────────────────────────────────────────

/// Error type for parsing ID from string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseIdError {
    kind: String,
}

impl fmt::Display for ParseIdError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to parse {} from string", self.kind)
    }
}

impl std::error::Error for ParseIdError {}

impl FromStr for GoalId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>().map(GoalId::new).map_err(|_| ParseIdError {
            kind: "GoalId".to_string(),
        })
    }
}

impl FromStr for ContentId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<u32>()
            .map(ContentId::new)
            .map_err(|_| ParseIdError {
                kind: "ContentId".to_string(),
            })
    }
}

impl FromStr for RequestId {
    type Err = ParseIdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse::<i64>()
            .map(RequestId::new)
            .map_err(|_| ParseIdError {
                kind: "RequestId".to_string(),
            })
    }
}

// ─── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_id_display() {
        let id = GoalId::new(1_700_000_000_000);
        assert_eq!(id.to_string(), "1700000000000");
    }

    #[test]
    fn test_goal_id_from_str() {
        let id: GoalId = "1700000000123".parse().unwrap();
        assert_eq!(id, GoalId::new(1_700_000_000_123));
    }

    #[test]
    fn test_goal_id_from_str_invalid() {
        let result = "not-a-number".parse::<GoalId>();
        assert!(result.is_err());
    }

    #[test]
    fn test_goal_id_ordering_follows_mint_time() {
        assert!(GoalId::new(1) < GoalId::new(2));
    }

    #[test]
    fn test_content_id_display() {
        let id = ContentId::new(4);
        assert_eq!(id.to_string(), "4");
    }

    #[test]
    fn test_content_id_from_str() {
        let id: ContentId = "6".parse().unwrap();
        assert_eq!(id, ContentId::new(6));
    }

    #[test]
    fn test_content_id_rejects_negative() {
        assert!("-1".parse::<ContentId>().is_err());
    }

    #[test]
    fn test_request_id_display() {
        let id = RequestId::new(77);
        assert_eq!(id.to_string(), "77");
    }

    #[test]
    fn test_id_roundtrip() {
        let original = RequestId::new(1_700_000_000_000);
        let serialized = original.to_string();
        let deserialized: RequestId = serialized.parse().unwrap();
        assert_eq!(original, deserialized);
    }
}
