//! # Analytics Module
//!
//! Session-level engagement statistics for later clinical review.
//!
//! ## Components
//! - `aggregator`: per-session append-only state and snapshots
//! - `stats`: snapshot and log value types
//! - `summary`: narrative summary prompt, sentinel and fallback

pub mod aggregator;
pub mod stats;
pub mod summary;

pub use aggregator::SessionAnalytics;
pub use stats::{round2, AssistantResponse, ChildUtterance, HistoryEntry, SessionStatistics};
pub use summary::{build_summary_prompt, fallback_summary, summarize, NO_CONVERSATION_SUMMARY};
