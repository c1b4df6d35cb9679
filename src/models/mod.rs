// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Adjustment, Dimension, Field, FieldError, FitDiagnosis, FitLabel, FitLevel, FitPreference,
    Measurements, PersistedRecommendation, RawField, RawMeasurements, Reason, RecommendationResult,
    Region, SizeLabel, UnknownSize,
};
pub use requests::{GetRecommendationQuery, RecommendRequest, SaveRecommendationRequest};
pub use responses::{ErrorResponse, HealthResponse, RecommendationResponse};
