//! Shared UI components.

pub mod navbar;

pub use navbar::{ConnectionStatus, Navbar};
