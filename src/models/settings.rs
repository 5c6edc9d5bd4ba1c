use serde::{Deserialize, Serialize};

use crate::store::{get_json_or_default, KvStore};

/// Storage key for the admin-owned site settings blob. This crate reads it
/// and never writes it; the admin panel owns the entry.
pub const SITE_SETTINGS_KEY: &str = "site_settings";

/// Overlay opacity percent used when the blob does not carry one.
const DEFAULT_OVERLAY_OPACITY: i64 = 40;

/// Typed view of the `site_settings` entry. The wire format uses camelCase
/// field names; missing fields fall back to the defaults below.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SiteSettings {
    /// Background source: "gradient", "image", or "unsplash". Anything else
    /// resolves to the stock background image.
    pub background_type: String,
    pub background_image: Option<String>,
    pub unsplash_image: Option<String>,
    /// Dark overlay strength over a custom background, in percent.
    pub overlay_opacity: i64,
}

impl Default for SiteSettings {
    fn default() -> Self {
        SiteSettings {
            background_type: "gradient".to_string(),
            background_image: None,
            unsplash_image: None,
            overlay_opacity: DEFAULT_OVERLAY_OPACITY,
        }
    }
}

/// Resolved hero background, ready for the page layer to apply.
#[derive(Debug, Clone, PartialEq)]
pub enum HeroBackground {
    /// Keep the stylesheet gradient untouched.
    Gradient,
    /// The stock background image the stylesheet ships with.
    Stock,
    /// An admin-selected image with a dark overlay at the given alpha.
    Image { url: String, overlay_alpha: f64 },
}

impl SiteSettings {
    /// Load the blob from the store. An absent or unreadable blob yields the
    /// defaults; an empty background type counts as unset.
    pub fn load(store: &dyn KvStore) -> Self {
        let mut settings: SiteSettings = get_json_or_default(store, SITE_SETTINGS_KEY);
        if settings.background_type.is_empty() {
            settings.background_type = "gradient".to_string();
        }
        settings
    }

    /// Overlay opacity as an alpha channel value, clamped to 0..=1.
    pub fn overlay_alpha(&self) -> f64 {
        (self.overlay_opacity as f64 / 100.0).clamp(0.0, 1.0)
    }

    /// Decide which hero background the page should show. A custom type
    /// without its image configured falls back to the stock image.
    pub fn hero_background(&self) -> HeroBackground {
        match self.background_type.as_str() {
            "image" => self.custom_or_stock(&self.background_image),
            "unsplash" => self.custom_or_stock(&self.unsplash_image),
            "gradient" => HeroBackground::Gradient,
            _ => HeroBackground::Stock,
        }
    }

    fn custom_or_stock(&self, image: &Option<String>) -> HeroBackground {
        match image {
            Some(url) if !url.is_empty() => HeroBackground::Image {
                url: url.clone(),
                overlay_alpha: self.overlay_alpha(),
            },
            _ => HeroBackground::Stock,
        }
    }
}
