use std::sync::Arc;

use serde::Serialize;

use crate::models::reaction::{ReactionCounts, ReactionKind, UserReactions};
use crate::models::settings::SITE_SETTINGS_KEY;
use crate::store::{get_json_or_default, set_json, KvStore};

/// Key prefix for per-post reaction totals.
pub const POST_REACTIONS_PREFIX: &str = "post_reactions_";
/// Key prefix for the local reader's toggle flags.
pub const USER_REACTIONS_PREFIX: &str = "user_reactions_";
/// Key prefix for per-post view counters (stored as decimal strings).
pub const VIEWS_PREFIX: &str = "views_";

fn reactions_key(post_id: &str) -> String {
    format!("{}{}", POST_REACTIONS_PREFIX, post_id)
}

fn user_key(post_id: &str) -> String {
    format!("{}{}", USER_REACTIONS_PREFIX, post_id)
}

fn views_key(post_id: &str) -> String {
    format!("{}{}", VIEWS_PREFIX, post_id)
}

/// Result of a reaction toggle: whether the reaction is now active, and the
/// updated count for the toggled kind. The UI shows its one-time thank-you
/// only when `active` is true.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ToggleOutcome {
    pub active: bool,
    pub count: i64,
}

/// Reaction totals, per-reader toggle flags, and view counters for posts,
/// externalized to an injected key-value store. Every operation is total:
/// when the backend misbehaves, callers get the zero/false defaults instead
/// of an error. Engagement state never breaks page rendering.
pub struct Engagement {
    pub store: Arc<dyn KvStore>,
}

impl Engagement {
    pub fn new(store: Arc<dyn KvStore>) -> Self {
        Engagement { store }
    }

    /// Persisted reaction totals for a post, or all zeros when untracked.
    pub fn reaction_counts(&self, post_id: &str) -> ReactionCounts {
        get_json_or_default(self.store.as_ref(), &reactions_key(post_id))
    }

    /// The local reader's toggle flags for a post, or all false when untracked.
    pub fn user_reactions(&self, post_id: &str) -> UserReactions {
        get_json_or_default(self.store.as_ref(), &user_key(post_id))
    }

    /// Flip `kind` for the local reader and adjust the matching total: +1 on
    /// activation, -1 floored at zero on deactivation. Both blobs are written
    /// back on every toggle, totals first, flags second; the two entries are
    /// independent keys with no transaction between them.
    pub fn toggle_reaction(&self, post_id: &str, kind: ReactionKind) -> ToggleOutcome {
        let mut counts = self.reaction_counts(post_id);
        let mut flags = self.user_reactions(post_id);

        let was_active = flags.is_active(kind);
        *flags.slot(kind) = !was_active;

        let slot = counts.slot(kind);
        *slot = if was_active {
            (*slot).saturating_sub(1).max(0)
        } else {
            (*slot).saturating_add(1)
        };

        if let Err(e) = set_json(self.store.as_ref(), &reactions_key(post_id), &counts) {
            log::warn!("reaction totals for '{}' not persisted: {}", post_id, e);
        }
        if let Err(e) = set_json(self.store.as_ref(), &user_key(post_id), &flags) {
            log::warn!("reaction flags for '{}' not persisted: {}", post_id, e);
        }

        ToggleOutcome {
            active: !was_active,
            count: counts.get(kind),
        }
    }

    /// Stored view counter for a post; zero when never viewed.
    pub fn view_count(&self, post_id: &str) -> i64 {
        self.store.get_i64(&views_key(post_id))
    }

    /// Count one more view and return the new total. Every call counts: there
    /// is no per-session dedup, so each load of a tracked page adds one.
    pub fn record_view(&self, post_id: &str) -> i64 {
        let views = self.view_count(post_id).saturating_add(1);
        if let Err(e) = self.store.set(&views_key(post_id), &views.to_string()) {
            log::warn!("view counter for '{}' not persisted: {}", post_id, e);
        }
        views
    }
}

/// The persisted entry a raw storage key refers to. Change listeners receive
/// raw key names; this maps them back to the affected state so a page can
/// re-read just what changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngagementKey {
    ReactionCounts(String),
    UserReactions(String),
    Views(String),
    SiteSettings,
}

impl EngagementKey {
    pub fn parse(key: &str) -> Option<EngagementKey> {
        if key == SITE_SETTINGS_KEY {
            return Some(EngagementKey::SiteSettings);
        }
        if let Some(post_id) = key.strip_prefix(POST_REACTIONS_PREFIX) {
            return Some(EngagementKey::ReactionCounts(post_id.to_string()));
        }
        if let Some(post_id) = key.strip_prefix(USER_REACTIONS_PREFIX) {
            return Some(EngagementKey::UserReactions(post_id.to_string()));
        }
        if let Some(post_id) = key.strip_prefix(VIEWS_PREFIX) {
            return Some(EngagementKey::Views(post_id.to_string()));
        }
        None
    }
}
