//! Session quality metrics
//!
//! Derived, read-only scoring over finished sessions.

pub mod alignment;
pub mod concerns;
pub mod scorer;

pub use alignment::{alignment_score, domain_keywords};
pub use concerns::{ConcernAnalysis, ConcernMatcher, ConcernRecord, KeywordConcernMatcher};
pub use scorer::{QualityReport, QualityScorer};
