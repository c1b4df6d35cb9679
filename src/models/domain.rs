use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Garment size label. Declaration order is catalog order (smallest first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum SizeLabel {
    XS,
    S,
    M,
    L,
    XL,
}

impl SizeLabel {
    pub const ALL: [SizeLabel; 5] = [
        SizeLabel::XS,
        SizeLabel::S,
        SizeLabel::M,
        SizeLabel::L,
        SizeLabel::XL,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SizeLabel::XS => "XS",
            SizeLabel::S => "S",
            SizeLabel::M => "M",
            SizeLabel::L => "L",
            SizeLabel::XL => "XL",
        }
    }
}

impl fmt::Display for SizeLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown size label: {0}")]
pub struct UnknownSize(pub String);

impl FromStr for SizeLabel {
    type Err = UnknownSize;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "XS" => Ok(SizeLabel::XS),
            "S" => Ok(SizeLabel::S),
            "M" => Ok(SizeLabel::M),
            "L" => Ok(SizeLabel::L),
            "XL" => Ok(SizeLabel::XL),
            _ => Err(UnknownSize(s.to_string())),
        }
    }
}

/// Body dimension covered by the size catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dimension {
    Bust,
    Waist,
    Hip,
}

/// Body region reported by fit diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    Shoulders,
    #[serde(alias = "chest")]
    Bust,
    Waist,
    #[serde(alias = "hips")]
    Hip,
}

impl Region {
    pub const ALL: [Region; 4] = [Region::Shoulders, Region::Bust, Region::Waist, Region::Hip];
}

/// How snug the wearer wants the garment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FitLevel {
    #[serde(alias = "Tight")]
    Tight,
    #[default]
    #[serde(alias = "Regular")]
    Regular,
    #[serde(alias = "Loose")]
    Loose,
}

/// Overall fit preference with optional per-region overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitPreference {
    #[serde(default)]
    pub general: FitLevel,
    #[serde(rename = "perRegion", alias = "areas", default)]
    pub per_region: BTreeMap<Region, FitLevel>,
}

impl FitPreference {
    pub fn new(general: FitLevel) -> Self {
        Self {
            general,
            per_region: BTreeMap::new(),
        }
    }

    pub fn with_region(mut self, region: Region, level: FitLevel) -> Self {
        self.per_region.insert(region, level);
        self
    }

    /// Preference for a region, falling back to the general preference
    pub fn for_region(&self, region: Region) -> FitLevel {
        self.per_region.get(&region).copied().unwrap_or(self.general)
    }
}

/// Admissible intake bounds
pub const CIRCUMFERENCE_BOUNDS: (f64, f64) = (40.0, 140.0);
pub const HEIGHT_BOUNDS: (f64, f64) = (120.0, 220.0);
pub const WEIGHT_BOUNDS: (f64, f64) = (30.0, 200.0);
pub const AGE_BOUNDS: (f64, f64) = (13.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Bust,
    Waist,
    Hip,
    Height,
    Weight,
    Age,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Bust => "bust",
            Field::Waist => "waist",
            Field::Hip => "hip",
            Field::Height => "height",
            Field::Weight => "weight",
            Field::Age => "age",
        }
    }

    pub fn bounds(&self) -> (f64, f64) {
        match self {
            Field::Bust | Field::Waist | Field::Hip => CIRCUMFERENCE_BOUNDS,
            Field::Height => HEIGHT_BOUNDS,
            Field::Weight => WEIGHT_BOUNDS,
            Field::Age => AGE_BOUNDS,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Reason {
    Missing,
    NonNumeric,
    OutOfRange,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Field,
    pub reason: Reason,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Reason::Missing => write!(f, "{} is required", self.field),
            Reason::NonNumeric => write!(f, "{} must be a number", self.field),
            Reason::OutOfRange => {
                let (min, max) = self.field.bounds();
                write!(f, "{} must be between {} and {}", self.field, min, max)
            }
        }
    }
}

/// A quiz answer as submitted: a JSON number, a string, or anything else
/// (kept so intake can report it instead of failing the whole request)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Number(f64),
    Text(String),
    Other(serde_json::Value),
}

impl From<f64> for RawField {
    fn from(value: f64) -> Self {
        RawField::Number(value)
    }
}

impl From<&str> for RawField {
    fn from(value: &str) -> Self {
        RawField::Text(value.to_string())
    }
}

/// Unvalidated measurement answers
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawMeasurements {
    #[serde(default)]
    pub bust: Option<RawField>,
    #[serde(default)]
    pub waist: Option<RawField>,
    #[serde(default, alias = "hips")]
    pub hip: Option<RawField>,
    #[serde(default)]
    pub height: Option<RawField>,
    #[serde(default)]
    pub weight: Option<RawField>,
    #[serde(default)]
    pub age: Option<RawField>,
}

impl RawMeasurements {
    /// Convenience constructor for the three required circumferences
    pub fn circumferences(bust: f64, waist: f64, hip: f64) -> Self {
        Self {
            bust: Some(bust.into()),
            waist: Some(waist.into()),
            hip: Some(hip.into()),
            ..Default::default()
        }
    }

    pub fn with_height_weight(mut self, height_cm: f64, weight_kg: f64) -> Self {
        self.height = Some(height_cm.into());
        self.weight = Some(weight_kg.into());
        self
    }
}

/// Validated measurement set (circumferences and height in cm, weight in kg)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Measurements {
    pub bust: f64,
    pub waist: f64,
    pub hip: f64,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub age: Option<u8>,
}

impl Measurements {
    /// Catalog dimensions present in this measurement set
    pub fn dimensions(&self) -> [(Dimension, f64); 3] {
        [
            (Dimension::Bust, self.bust),
            (Dimension::Waist, self.waist),
            (Dimension::Hip, self.hip),
        ]
    }

    /// Body-mass index, when both height and weight are known
    pub fn bmi(&self) -> Option<f64> {
        match (self.height, self.weight) {
            (Some(height_cm), Some(weight_kg)) => {
                let height_m = height_cm / 100.0;
                Some(weight_kg / (height_m * height_m))
            }
            _ => None,
        }
    }
}

/// Qualitative fit of the recommended size on one region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitLabel {
    #[serde(rename = "perfect")]
    Perfect,
    #[serde(rename = "slightly tight")]
    SlightlyTight,
    #[serde(rename = "slightly loose")]
    SlightlyLoose,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitDiagnosis {
    pub label: FitLabel,
    #[serde(rename = "confidencePercent")]
    pub confidence_percent: u8,
}

/// Bias terms applied on top of the raw scores
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Adjustment {
    pub bmi: Option<f64>,
    pub bmi_bias: f64,
    pub preference_bias: f64,
}

impl Adjustment {
    pub fn total(&self) -> f64 {
        self.preference_bias + self.bmi_bias
    }
}

/// Full output of a size recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationResult {
    pub recommended_size: SizeLabel,
    pub per_size_score: BTreeMap<SizeLabel, f64>,
    pub effective_score: BTreeMap<SizeLabel, f64>,
    pub fit_analysis: BTreeMap<Region, FitDiagnosis>,
    pub alternative_sizes: Vec<SizeLabel>,
    pub overall_confidence_percent: u8,
    pub adjustment: Adjustment,
    pub measurements: Measurements,
}

/// Stored recommendation, one per owner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersistedRecommendation {
    #[serde(rename = "ownerId")]
    pub owner_id: String,
    #[serde(rename = "rawAnswers")]
    pub raw_answers: serde_json::Value,
    #[serde(rename = "recommendedSize")]
    pub recommended_size: SizeLabel,
    #[serde(rename = "lastUpdated")]
    pub last_updated: chrono::DateTime<chrono::Utc>,
}
