//! Core types shared by the BioConceptVec explorer crates.
//!
//! This crate provides the route table that decides which page renders for
//! a given path and the navigation item list shown in the header.

pub mod navigation;
pub mod routes;

pub use navigation::{NavItem, default_nav_items};
pub use routes::{
    EXPLORE_SEGMENT, HOME_SEGMENT, Page, RouteTable, explorer_routes, normalize_path,
};
