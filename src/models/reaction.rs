use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of reactions a reader can leave on a post.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReactionKind {
    Like,
    Love,
    Useful,
}

impl ReactionKind {
    pub const ALL: [ReactionKind; 3] = [
        ReactionKind::Like,
        ReactionKind::Love,
        ReactionKind::Useful,
    ];

    /// Wire name, matching the field names in the persisted JSON blobs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ReactionKind::Like => "like",
            ReactionKind::Love => "love",
            ReactionKind::Useful => "useful",
        }
    }

    /// Display word for buttons and the one-time acknowledgment shown when a
    /// reaction activates.
    pub fn label(&self) -> &'static str {
        match self {
            ReactionKind::Like => "Like",
            ReactionKind::Love => "Love",
            ReactionKind::Useful => "Useful",
        }
    }
}

impl FromStr for ReactionKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "like" => Ok(ReactionKind::Like),
            "love" => Ok(ReactionKind::Love),
            "useful" => Ok(ReactionKind::Useful),
            other => Err(format!("unknown reaction kind: {}", other)),
        }
    }
}

/// Per-post reaction totals, one JSON blob per post. Fields missing from an
/// older blob read as zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReactionCounts {
    pub like: i64,
    pub love: i64,
    pub useful: i64,
}

impl ReactionCounts {
    pub fn get(&self, kind: ReactionKind) -> i64 {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Useful => self.useful,
        }
    }

    pub(crate) fn slot(&mut self, kind: ReactionKind) -> &mut i64 {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Useful => &mut self.useful,
        }
    }
}

/// Which reactions the local reader has toggled on for a post. Persisted
/// separately from the totals; missing fields read as false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserReactions {
    pub like: bool,
    pub love: bool,
    pub useful: bool,
}

impl UserReactions {
    pub fn is_active(&self, kind: ReactionKind) -> bool {
        match kind {
            ReactionKind::Like => self.like,
            ReactionKind::Love => self.love,
            ReactionKind::Useful => self.useful,
        }
    }

    pub(crate) fn slot(&mut self, kind: ReactionKind) -> &mut bool {
        match kind {
            ReactionKind::Like => &mut self.like,
            ReactionKind::Love => &mut self.love,
            ReactionKind::Useful => &mut self.useful,
        }
    }
}
