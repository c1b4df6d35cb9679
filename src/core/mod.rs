// Core algorithm exports
pub mod adjustment;
pub mod catalog;
pub mod diagnostics;
pub mod engine;
pub mod intake;
pub mod profiles;
pub mod quiz;
pub mod scoring;
pub mod selector;

pub use catalog::{BandRanges, Range, SizeBand, SizeCatalog};
pub use engine::{compute_recommendation, SizeEngine};
pub use intake::{validate_measurements, Field, FieldError, Reason, ValidationError};
pub use profiles::{MeasurementProfile, ProfileBook, ProfileError};
pub use quiz::{BasicInfo, BodyShape, QuizError, QuizSession, QuizStep};
pub use selector::Selection;
