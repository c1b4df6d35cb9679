use serde::{Deserialize, Serialize};
use thiserror::Error;
use crate::core::engine::SizeEngine;
use crate::core::intake::{check_optional, validate_measurements, Field, ValidationError};
use crate::models::{FitPreference, RawField, RawMeasurements, RecommendationResult};

/// Steps of the size quiz, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuizStep {
    BasicInfo,
    BodyShape,
    FitPreference,
    Result,
}

#[derive(Debug, Error)]
pub enum QuizError {
    #[error("Step {0:?} is not complete")]
    StepIncomplete(QuizStep),

    #[error("Already at the first step")]
    AtFirstStep,

    #[error("Already at the last step")]
    AtLastStep,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Answers gathered on the basic-info step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BasicInfo {
    pub height: Option<RawField>,
    pub weight: Option<RawField>,
    pub age: Option<RawField>,
}

/// Answers gathered on the body-shape step
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BodyShape {
    pub bust: Option<RawField>,
    pub waist: Option<RawField>,
    pub hip: Option<RawField>,
}

/// Step-by-step size quiz
///
/// Forward moves are guarded by the current step's completion check, and the
/// engine runs exactly once, when leaving the fit-preference step.
#[derive(Debug, Clone)]
pub struct QuizSession {
    engine: SizeEngine,
    step: QuizStep,
    basic: BasicInfo,
    body: BodyShape,
    preference: FitPreference,
    result: Option<RecommendationResult>,
}

impl QuizSession {
    pub fn new(engine: SizeEngine) -> Self {
        Self {
            engine,
            step: QuizStep::BasicInfo,
            basic: BasicInfo::default(),
            body: BodyShape::default(),
            preference: FitPreference::default(),
            result: None,
        }
    }

    pub fn step(&self) -> QuizStep {
        self.step
    }

    pub fn result(&self) -> Option<&RecommendationResult> {
        self.result.as_ref()
    }

    pub fn set_basic_info(&mut self, basic: BasicInfo) {
        self.basic = basic;
    }

    pub fn set_body_shape(&mut self, body: BodyShape) {
        self.body = body;
    }

    pub fn set_fit_preference(&mut self, preference: FitPreference) {
        self.preference = preference;
    }

    /// All answers so far, as one raw measurement set
    pub fn raw_measurements(&self) -> RawMeasurements {
        RawMeasurements {
            bust: self.body.bust.clone(),
            waist: self.body.waist.clone(),
            hip: self.body.hip.clone(),
            height: self.basic.height.clone(),
            weight: self.basic.weight.clone(),
            age: self.basic.age.clone(),
        }
    }

    /// Answers as the document stored alongside a saved recommendation
    pub fn raw_answers(&self) -> serde_json::Value {
        serde_json::json!({
            "basicInfo": self.basic,
            "bodyShape": self.body,
            "fitPreference": self.preference,
        })
    }

    pub fn is_step_complete(&self) -> bool {
        match self.step {
            QuizStep::BasicInfo => self.basic_info_complete(),
            QuizStep::BodyShape => self.body_shape_complete(),
            QuizStep::FitPreference | QuizStep::Result => true,
        }
    }

    fn basic_info_complete(&self) -> bool {
        let height = check_optional(Field::Height, self.basic.height.as_ref());
        let weight = check_optional(Field::Weight, self.basic.weight.as_ref());
        let age = check_optional(Field::Age, self.basic.age.as_ref());

        matches!((height, weight), (Ok(Some(_)), Ok(Some(_)))) && age.is_ok()
    }

    fn body_shape_complete(&self) -> bool {
        let body_only = RawMeasurements {
            bust: self.body.bust.clone(),
            waist: self.body.waist.clone(),
            hip: self.body.hip.clone(),
            ..Default::default()
        };
        validate_measurements(&body_only).is_ok()
    }

    /// Move to the next step if the current one is complete
    pub fn advance(&mut self) -> Result<QuizStep, QuizError> {
        let next = match self.step {
            QuizStep::BasicInfo => QuizStep::BodyShape,
            QuizStep::BodyShape => QuizStep::FitPreference,
            QuizStep::FitPreference => QuizStep::Result,
            QuizStep::Result => return Err(QuizError::AtLastStep),
        };

        if !self.is_step_complete() {
            return Err(QuizError::StepIncomplete(self.step));
        }

        if next == QuizStep::Result {
            let result = self
                .engine
                .compute_recommendation(&self.raw_measurements(), &self.preference)?;
            self.result = Some(result);
        }

        self.step = next;
        Ok(next)
    }

    /// Move to the previous step; leaving the result discards it
    pub fn back(&mut self) -> Result<QuizStep, QuizError> {
        let previous = match self.step {
            QuizStep::BasicInfo => return Err(QuizError::AtFirstStep),
            QuizStep::BodyShape => QuizStep::BasicInfo,
            QuizStep::FitPreference => QuizStep::BodyShape,
            QuizStep::Result => {
                self.result = None;
                QuizStep::FitPreference
            }
        };

        self.step = previous;
        Ok(previous)
    }
}

impl Default for QuizSession {
    fn default() -> Self {
        Self::new(SizeEngine::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FitLevel, SizeLabel};

    fn basic() -> BasicInfo {
        BasicInfo {
            height: Some("168".into()),
            weight: Some(62.0.into()),
            age: None,
        }
    }

    fn body() -> BodyShape {
        BodyShape {
            bust: Some(95.0.into()),
            waist: Some(78.0.into()),
            hip: Some(103.0.into()),
        }
    }

    #[test]
    fn test_full_walkthrough() {
        let mut quiz = QuizSession::default();
        quiz.set_basic_info(basic());
        assert_eq!(quiz.advance().unwrap(), QuizStep::BodyShape);

        quiz.set_body_shape(body());
        assert_eq!(quiz.advance().unwrap(), QuizStep::FitPreference);

        quiz.set_fit_preference(FitPreference::new(FitLevel::Regular));
        assert_eq!(quiz.advance().unwrap(), QuizStep::Result);

        let result = quiz.result().unwrap();
        assert_eq!(result.recommended_size, SizeLabel::M);
        assert!(matches!(quiz.advance(), Err(QuizError::AtLastStep)));
    }

    #[test]
    fn test_incomplete_step_blocks_advance() {
        let mut quiz = QuizSession::default();
        assert!(matches!(
            quiz.advance(),
            Err(QuizError::StepIncomplete(QuizStep::BasicInfo))
        ));

        // Weight out of range keeps the step incomplete
        quiz.set_basic_info(BasicInfo {
            weight: Some(250.0.into()),
            ..basic()
        });
        assert!(!quiz.is_step_complete());
        assert_eq!(quiz.step(), QuizStep::BasicInfo);
    }

    #[test]
    fn test_back_from_result_clears_it() {
        let mut quiz = QuizSession::default();
        quiz.set_basic_info(basic());
        quiz.set_body_shape(body());
        quiz.advance().unwrap();
        quiz.advance().unwrap();
        quiz.advance().unwrap();
        assert!(quiz.result().is_some());

        assert_eq!(quiz.back().unwrap(), QuizStep::FitPreference);
        assert!(quiz.result().is_none());

        quiz.back().unwrap();
        quiz.back().unwrap();
        assert!(matches!(quiz.back(), Err(QuizError::AtFirstStep)));
    }

    #[test]
    fn test_raw_answers_document() {
        let mut quiz = QuizSession::default();
        quiz.set_basic_info(basic());
        quiz.set_body_shape(body());

        let answers = quiz.raw_answers();
        assert_eq!(answers["basicInfo"]["height"], "168");
        assert_eq!(answers["bodyShape"]["bust"], 95.0);
        assert_eq!(answers["fitPreference"]["general"], "regular");
    }
}
