use std::collections::BTreeMap;
use crate::models::{Adjustment, FitLevel, FitPreference, Measurements, SizeLabel};

pub const BMI_UNDERWEIGHT: f64 = 18.5;
pub const BMI_OVERWEIGHT: f64 = 25.0;
pub const BIAS_STEP: f64 = 0.5;

/// Bias from body-mass index: negative below the healthy band, positive above
#[inline]
pub fn bmi_bias(bmi: f64) -> f64 {
    if bmi < BMI_UNDERWEIGHT {
        -BIAS_STEP
    } else if bmi > BMI_OVERWEIGHT {
        BIAS_STEP
    } else {
        0.0
    }
}

/// Bias from a fit preference. Also used per region by fit diagnostics.
#[inline]
pub fn preference_bias(level: FitLevel) -> f64 {
    match level {
        FitLevel::Tight => -BIAS_STEP,
        FitLevel::Regular => 0.0,
        FitLevel::Loose => BIAS_STEP,
    }
}

/// Work out the bias terms for a measurement set and preference
pub fn calculate_adjustment(measurements: &Measurements, preference: &FitPreference) -> Adjustment {
    let bmi = measurements.bmi();
    Adjustment {
        bmi,
        bmi_bias: bmi.map(bmi_bias).unwrap_or(0.0),
        preference_bias: preference_bias(preference.general),
    }
}

/// Effective ranking scores. The raw scores are left untouched.
pub fn apply_adjustment(
    raw_scores: &BTreeMap<SizeLabel, f64>,
    adjustment: &Adjustment,
) -> BTreeMap<SizeLabel, f64> {
    let bias = adjustment.total();
    raw_scores
        .iter()
        .map(|(size, score)| (*size, score + bias))
        .collect()
}
