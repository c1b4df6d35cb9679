use serde::{Deserialize, Serialize};
use validator::Validate;
use crate::models::domain::{FitPreference, RawMeasurements};

/// Request to compute a size recommendation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub measurements: RawMeasurements,
    #[serde(default)]
    #[serde(alias = "fit_preference", rename = "fitPreference")]
    pub fit_preference: FitPreference,
}

/// Request to persist a recommendation for an owner
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveRecommendationRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", alias = "userId", rename = "ownerId")]
    pub owner_id: String,
    #[serde(default)]
    #[serde(alias = "rawAnswers")]
    pub answers: serde_json::Value,
    #[validate(length(min = 1))]
    #[serde(alias = "recommended_size", rename = "recommendedSize")]
    pub recommended_size: String,
}

/// Query for fetching a stored recommendation
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct GetRecommendationQuery {
    #[validate(length(min = 1))]
    #[serde(alias = "owner_id", alias = "userId", rename = "ownerId")]
    pub owner_id: String,
}
