//! Navigation items rendered in the header.

use crate::routes::normalize_path;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

/// A single header link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Link text.
    pub label: Cow<'static, str>,
    /// Target path.
    pub href: Cow<'static, str>,
}

impl NavItem {
    /// Creates a navigation item.
    #[must_use]
    pub fn new(label: impl Into<Cow<'static, str>>, href: impl Into<Cow<'static, str>>) -> Self {
        Self {
            label: label.into(),
            href: href.into(),
        }
    }

    /// Returns whether this item points at `path`.
    #[must_use]
    pub fn is_active(&self, path: &str) -> bool {
        normalize_path(&self.href) == normalize_path(path)
    }
}

/// The ordered header links for the session.
#[must_use]
pub fn default_nav_items() -> Vec<NavItem> {
    vec![NavItem::new("Home", "/"), NavItem::new("Explore", "/explore")]
}
