use std::collections::BTreeMap;
use crate::core::catalog::SizeCatalog;
use crate::models::SizeLabel;

/// How far below the winner a neighbor may score and still be suggested
pub const ALTERNATIVE_MARGIN: f64 = 1.0;

/// Outcome of ranking the effective scores
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    pub size: SizeLabel,
    pub score: f64,
    pub alternatives: Vec<SizeLabel>,
    pub confidence_percent: u8,
}

/// Pick the best size by effective score
///
/// Sizes are visited in catalog order and a later size only wins on a
/// strictly greater score, so ties go to the smaller size.
pub fn select_size(catalog: &SizeCatalog, effective: &BTreeMap<SizeLabel, f64>) -> Selection {
    let mut best: Option<(SizeLabel, f64)> = None;

    for size in catalog.ordered_sizes() {
        let Some(&score) = effective.get(&size) else {
            continue;
        };
        match best {
            Some((_, best_score)) if score <= best_score => {}
            _ => best = Some((size, score)),
        }
    }

    // An empty score map cannot come out of the scoring engine; fall back to
    // the middle of the chart with no confidence.
    let (size, score) = best.unwrap_or((SizeLabel::M, 0.0));

    let alternatives = [catalog.smaller(size), catalog.larger(size)]
        .into_iter()
        .flatten()
        .filter(|neighbor| {
            effective
                .get(neighbor)
                .is_some_and(|s| *s >= score - ALTERNATIVE_MARGIN)
        })
        .collect();

    Selection {
        size,
        score,
        alternatives,
        confidence_percent: confidence_percent(score),
    }
}

/// Overall confidence: the winning score clamped to 0-1, as a percentage
#[inline]
pub fn confidence_percent(score: f64) -> u8 {
    (score.clamp(0.0, 1.0) * 100.0).round() as u8
}
