use crate::core::{
    adjustment::{apply_adjustment, calculate_adjustment},
    catalog::SizeCatalog,
    diagnostics::analyze_fit,
    intake::{validate_measurements, ValidationError},
    scoring::calculate_raw_scores,
    selector::select_size,
};
use crate::models::{FitPreference, Measurements, RawMeasurements, RecommendationResult};

/// Size recommendation orchestrator - runs the scoring pipeline
///
/// # Pipeline Stages
/// 1. Measurement intake and validation
/// 2. Per-band closeness scoring with progression penalty
/// 3. BMI and fit-preference bias
/// 4. Size selection and alternatives
/// 5. Per-region fit diagnostics
///
/// The engine holds no mutable state and can be shared freely across threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizeEngine {
    catalog: SizeCatalog,
}

impl SizeEngine {
    pub fn new(catalog: SizeCatalog) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &SizeCatalog {
        &self.catalog
    }

    /// Validate raw quiz answers and compute a recommendation
    pub fn compute_recommendation(
        &self,
        raw: &RawMeasurements,
        preference: &FitPreference,
    ) -> Result<RecommendationResult, ValidationError> {
        let measurements = validate_measurements(raw)?;
        Ok(self.recommend(&measurements, preference))
    }

    /// Compute a recommendation for an already validated measurement set
    ///
    /// Never fails: measurements beyond the chart still produce a best-effort
    /// result with reduced confidence.
    pub fn recommend(
        &self,
        measurements: &Measurements,
        preference: &FitPreference,
    ) -> RecommendationResult {
        let per_size_score = calculate_raw_scores(&self.catalog, measurements.dimensions());

        let adjustment = calculate_adjustment(measurements, preference);
        let effective_score = apply_adjustment(&per_size_score, &adjustment);

        let selection = select_size(&self.catalog, &effective_score);

        let ranges = self.catalog.lookup(selection.size);
        let fit_analysis = analyze_fit(&ranges, measurements, preference);

        tracing::debug!(
            "Recommended {} (score {:.3}, confidence {}%, alternatives {:?})",
            selection.size,
            selection.score,
            selection.confidence_percent,
            selection.alternatives
        );

        RecommendationResult {
            recommended_size: selection.size,
            per_size_score,
            effective_score,
            fit_analysis,
            alternative_sizes: selection.alternatives,
            overall_confidence_percent: selection.confidence_percent,
            adjustment,
            measurements: *measurements,
        }
    }
}

/// Compute a recommendation with the standard size chart
pub fn compute_recommendation(
    raw: &RawMeasurements,
    preference: &FitPreference,
) -> Result<RecommendationResult, ValidationError> {
    SizeEngine::default().compute_recommendation(raw, preference)
}
