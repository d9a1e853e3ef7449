//! Path-based route table.
//!
//! Routes are an ordered list of exact path matches evaluated front to back,
//! backed by a mandatory fallback. Every path therefore resolves to exactly
//! one page.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Path segment of the home page.
pub const HOME_SEGMENT: &str = "";

/// Path segment of the explore page.
pub const EXPLORE_SEGMENT: &str = "explore";

/// The page-level views of the explorer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    /// Landing page at `/`.
    Home,
    /// Concept explorer at `/explore`.
    Explore,
    /// Catch-all for any other path.
    NotFound,
}

impl Page {
    /// Returns the page name used in logs.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Explore => "explore",
            Self::NotFound => "not_found",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An ordered mapping from exact paths to pages with a fallback.
#[derive(Debug, Clone)]
pub struct RouteTable<P> {
    routes: Vec<(String, P)>,
    fallback: P,
}

impl<P> RouteTable<P> {
    /// Creates an empty table that resolves every path to `fallback`.
    #[must_use]
    pub fn new(fallback: P) -> Self {
        Self {
            routes: Vec::new(),
            fallback,
        }
    }

    /// Appends an exact-match route.
    ///
    /// Routes are evaluated in insertion order, so registering the same path
    /// twice leaves the first registration in effect.
    #[must_use]
    pub fn route(mut self, path: &str, page: P) -> Self {
        self.routes.push((normalize_path(path), page));
        self
    }

    /// Resolves a browser path to exactly one page.
    pub fn resolve(&self, path: &str) -> &P {
        let path = normalize_path(path);
        self.routes
            .iter()
            .find(|(pattern, _)| *pattern == path)
            .map(|(_, page)| page)
            .unwrap_or(&self.fallback)
    }
}

/// Builds the explorer's route table: `/`, `/explore`, and a not-found fallback.
#[must_use]
pub fn explorer_routes() -> RouteTable<Page> {
    RouteTable::new(Page::NotFound)
        .route(HOME_SEGMENT, Page::Home)
        .route(EXPLORE_SEGMENT, Page::Explore)
}

/// Normalizes a path for matching.
///
/// Query strings and fragments are dropped, trailing slashes are removed
/// (except for the root), and ASCII letters are lowercased.
#[must_use]
pub fn normalize_path(path: &str) -> String {
    let end = path.find(['?', '#']).unwrap_or(path.len());
    let trimmed = path[..end].trim_end_matches('/');

    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut normalized = String::with_capacity(trimmed.len() + 1);
    if !trimmed.starts_with('/') {
        normalized.push('/');
    }
    normalized.push_str(trimmed);
    normalized.make_ascii_lowercase();
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn root_resolves_to_home() {
        let routes = explorer_routes();
        assert_eq!(*routes.resolve("/"), Page::Home);
        assert_eq!(*routes.resolve(""), Page::Home);
    }

    #[test]
    fn explore_resolves_to_explore() {
        let routes = explorer_routes();
        assert_eq!(*routes.resolve("/explore"), Page::Explore);
        assert_eq!(*routes.resolve("/explore/"), Page::Explore);
        assert_eq!(*routes.resolve("/Explore"), Page::Explore);
        assert_eq!(*routes.resolve("/explore?concept=Gene_1017"), Page::Explore);
        assert_eq!(*routes.resolve("/explore#results"), Page::Explore);
    }

    #[test]
    fn unknown_paths_fall_back_to_not_found() {
        let routes = explorer_routes();
        for path in [
            "/explorer",
            "/explore/deeper",
            "/home",
            "/404",
            "//explore-ish",
            "/index.html",
            "/%20",
        ] {
            assert_eq!(*routes.resolve(path), Page::NotFound, "path {path}");
        }
    }

    #[test]
    fn every_path_resolves_to_exactly_one_page() {
        let routes = explorer_routes();
        let pages = [Page::Home, Page::Explore, Page::NotFound];
        for path in ["/", "/explore", "/settings", "/explore/1", "anything"] {
            let resolved = routes.resolve(path);
            assert_eq!(pages.iter().filter(|p| *p == resolved).count(), 1);
        }
    }

    #[test]
    fn first_registration_wins() {
        let routes = RouteTable::new("fallback")
            .route("/a", "first")
            .route("/a/", "second");
        assert_eq!(*routes.resolve("/a"), "first");
        assert_eq!(*routes.resolve("/a/"), "first");
    }

    #[test]
    fn empty_table_always_uses_fallback() {
        let routes: RouteTable<Page> = RouteTable::new(Page::NotFound);
        assert_eq!(*routes.resolve("/"), Page::NotFound);
        assert_eq!(*routes.resolve("/explore"), Page::NotFound);
    }

    #[test]
    fn normalize_path_handles_edge_cases() {
        assert_eq!(normalize_path("/"), "/");
        assert_eq!(normalize_path("///"), "/");
        assert_eq!(normalize_path("?q=1"), "/");
        assert_eq!(normalize_path("explore"), "/explore");
        assert_eq!(normalize_path("/EXPLORE//"), "/explore");
    }

    #[test]
    fn page_display() {
        assert_eq!(Page::NotFound.to_string(), "not_found");
        assert_eq!(Page::Explore.as_str(), "explore");
    }
}
