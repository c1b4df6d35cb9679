use std::collections::BTreeMap;
use crate::core::catalog::{Range, SizeBand, SizeCatalog};
use crate::models::{Dimension, SizeLabel};

/// Penalty applied for each measurement that falls outside a band toward a
/// neighbor that exists
pub const PROGRESSION_PENALTY: f64 = 0.5;

/// Calculate a raw score for every size band
///
/// Scoring formula per band:
/// rawScore = sum over present measurements of
///            max(0, 1 - |value - midpoint| / halfRange)
///            - 0.5 if above max and a larger band exists
///            - 0.5 if below min and a smaller band exists
///            divided by the number of present measurements
pub fn calculate_raw_scores<I>(catalog: &SizeCatalog, dimensions: I) -> BTreeMap<SizeLabel, f64>
where
    I: IntoIterator<Item = (Dimension, f64)> + Clone,
{
    let bands = catalog.bands();
    bands
        .iter()
        .enumerate()
        .map(|(idx, band)| {
            let has_smaller = idx > 0;
            let has_larger = idx + 1 < bands.len();
            let score = score_band(band, dimensions.clone(), has_smaller, has_larger);
            (band.label, score)
        })
        .collect()
}

/// Score one band against the present dimensions
pub fn score_band<I>(band: &SizeBand, dimensions: I, has_smaller: bool, has_larger: bool) -> f64
where
    I: IntoIterator<Item = (Dimension, f64)>,
{
    let mut total = 0.0;
    let mut count = 0usize;
    let mut penalty = 0.0;

    for (dimension, value) in dimensions {
        let range = band.ranges.get(dimension);
        total += calculate_dimension_score(value, &range);
        count += 1;
        penalty += calculate_progression_penalty(value, &range, has_smaller, has_larger);
    }

    if count == 0 {
        return 0.0;
    }

    (total - penalty) / count as f64
}

/// Calculate closeness score (0-1)
/// 1.0 at the midpoint, falling linearly to 0 at the band edge and beyond
#[inline]
pub fn calculate_dimension_score(value: f64, range: &Range) -> f64 {
    let half = range.half_range();
    if half <= 0.0 {
        return if value == range.midpoint() { 1.0 } else { 0.0 };
    }

    let deviation = (value - range.midpoint()).abs() / half;
    (1.0 - deviation).max(0.0)
}

#[inline]
fn calculate_progression_penalty(value: f64, range: &Range, has_smaller: bool, has_larger: bool) -> f64 {
    if value > range.max && has_larger {
        PROGRESSION_PENALTY
    } else if value < range.min && has_smaller {
        PROGRESSION_PENALTY
    } else {
        0.0
    }
}
