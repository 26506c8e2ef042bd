//! segment-wind - Tailwind windows for segment record attempts
//!
//! Scores a short-range wind forecast against the travel bearing of each
//! segment and reports the daylight periods where a record attempt has the
//! wind at its back: input adaptation → per-observation scoring → date
//! grouping and ranking → reporting.
//!
//! ## Modules
//!
//! - **Engine**: angle math, alignment/speed scoring, daylight and threshold
//!   filtering, grouping and ordering (`angle`, `scoring`, `engine`)
//! - **Inputs**: forecast, sun-time, and segment adapters plus a disk cache
//!   (`adapters`, `cache`)
//! - **Output**: per-segment reports and their text/JSON rendering
//!   (`pipeline`, `attempt`, `report`)

pub mod adapters;
pub mod angle;
pub mod attempt;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod pipeline;
pub mod report;
pub mod scoring;
pub mod types;

pub use config::{ScoringParams, Settings};
pub use engine::find_favorable_conditions;
pub use error::WindError;
pub use pipeline::{scan, SegmentReport};
pub use types::{Observation, Opportunity, Segment};

/// Crate version reported by the CLI
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
