use std::collections::BTreeMap;
use crate::core::adjustment::preference_bias;
use crate::core::catalog::{BandRanges, Range};
use crate::models::{FitDiagnosis, FitLabel, FitLevel, FitPreference, Measurements, Region};

/// Shoulder width is approximated from the bust measurement
pub const SHOULDER_PROXY_FACTOR: f64 = 0.9;
pub const PERFECT_THRESHOLD: f64 = 0.2;

/// Per-region fit of the recommended band
///
/// Confidences are informational and never influence size selection.
pub fn analyze_fit(
    ranges: &BandRanges,
    measurements: &Measurements,
    preference: &FitPreference,
) -> BTreeMap<Region, FitDiagnosis> {
    Region::ALL
        .into_iter()
        .map(|region| {
            let (value, range) = region_measurement(region, ranges, measurements);
            let diagnosis = analyze_region(value, &range, preference.for_region(region));
            (region, diagnosis)
        })
        .collect()
}

fn region_measurement(region: Region, ranges: &BandRanges, m: &Measurements) -> (f64, Range) {
    match region {
        Region::Shoulders => (m.bust * SHOULDER_PROXY_FACTOR, ranges.bust),
        Region::Bust => (m.bust, ranges.bust),
        Region::Waist => (m.waist, ranges.waist),
        Region::Hip => (m.hip, ranges.hip),
    }
}

/// Label one region and estimate how confident that label is
pub fn analyze_region(value: f64, range: &Range, level: FitLevel) -> FitDiagnosis {
    let adjusted = signed_deviation(value, range) + preference_bias(level);
    let magnitude = adjusted.abs();

    let (label, confidence) = if magnitude <= PERFECT_THRESHOLD {
        (FitLabel::Perfect, 95.0 - magnitude * 50.0)
    } else if adjusted < -PERFECT_THRESHOLD {
        (FitLabel::SlightlyTight, 85.0 - magnitude * 30.0)
    } else {
        (FitLabel::SlightlyLoose, 85.0 - magnitude * 30.0)
    };

    FitDiagnosis {
        label,
        confidence_percent: confidence.clamp(0.0, 100.0).round() as u8,
    }
}

/// Position of a value relative to the band: -1 at min, 0 at the midpoint, +1 at max
#[inline]
fn signed_deviation(value: f64, range: &Range) -> f64 {
    let half = range.half_range();
    if half <= 0.0 {
        return 0.0;
    }
    (value - range.midpoint()) / half
}
