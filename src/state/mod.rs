/// State management module
///
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - The immutable watch catalog (catalog.rs)
/// - Filter and search state (filter.rs)
/// - Detail view and recommendation lifecycle (detail.rs)

pub mod catalog;
pub mod data;
pub mod detail;
pub mod filter;
