//! Reader engagement state for static sites: per-post reactions with
//! persisted toggle flags, browser-local style view counters, the
//! admin-configured site settings blob, and social share links. All state
//! lives as JSON blobs and decimal strings in a pluggable string key-value
//! store, so the same logic runs against SQLite on disk or a plain in-memory
//! map in tests.

pub mod engagement;
pub mod models;
pub mod share;
pub mod store;


pub use engagement::{Engagement, EngagementKey, ToggleOutcome};
pub use models::reaction::{ReactionCounts, ReactionKind, UserReactions};
pub use models::settings::{HeroBackground, SiteSettings};
pub use share::{share_url, ShareTarget};
pub use store::memory::MemoryStore;
pub use store::sqlite::SqliteStore;
pub use store::{ChangeListener, KvStore};
