//! Size Advisor - size recommendation engine for the storefront fit quiz
//!
//! This library maps body measurements and a fit preference to a garment
//! size, a confidence score, per-region fit diagnostics and alternative
//! sizes, and persists one recommendation per owner.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{compute_recommendation, QuizSession, SizeCatalog, SizeEngine, ValidationError};
pub use models::{FitLevel, FitPreference, RawMeasurements, RecommendationResult, SizeLabel};
pub use services::{InMemoryStore, RecommendationStore, StoreError};
