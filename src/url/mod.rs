//! URL handling module for Trailhead
//!
//! This module provides href resolution, domain comparison and path glob matching.

mod domain;
mod matcher;
mod resolve;

// Re-export main functions
pub use domain::{domain_key, extract_domain, same_domain};
pub use matcher::{matches_patterns, split_patterns, GlobPattern, PathFilter, PatternSet};
pub use resolve::{resolve, ResolvedUrl};
