//! Page components for the application.
//!
//! Each page is a Leptos component that renders a specific route,
//! along with any server functions specific to that page.

pub mod explore;
pub mod home;
pub mod not_found;

pub use explore::ExplorePage;
pub use home::HomePage;
pub use not_found::NotFoundPage;
