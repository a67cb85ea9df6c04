//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `VisitedSet`: the crawl-wide set of committed URLs with per-domain counters

mod visited;

pub use visited::VisitedSet;
