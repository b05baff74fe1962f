//! Core data-model vocabulary for SCORM 1.2.
//!
//! These are the wire-level value types shared by the whole crate: the
//! score record and the enumerations the SCORM 1.2 run-time data model
//! accepts for status, exit condition, interaction type, and result.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DataModelError;

/// A raw/min/max score triple, as stored under a `score` branch of the
/// data model.
///
/// SCORM 1.2 does not require `min <= raw <= max` and neither does this
/// type; the LMS receives whatever the content reports.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Score {
    pub raw: f64,
    pub min: f64,
    pub max: f64,
}

impl Score {
    pub fn new(raw: f64, min: f64, max: f64) -> Self {
        Self { raw, min, max }
    }
}

impl Default for Score {
    fn default() -> Self {
        Self {
            raw: 0.0,
            min: 0.0,
            max: 100.0,
        }
    }
}

/// Legal values for `cmi.core.lesson_status` and
/// `cmi.objectives.N.status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LessonStatus {
    #[serde(rename = "passed")]
    Passed,
    #[serde(rename = "failed")]
    Failed,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "incomplete")]
    Incomplete,
    #[serde(rename = "browsed")]
    Browsed,
    #[serde(rename = "not attempted")]
    NotAttempted,
}

impl fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LessonStatus::Passed => write!(f, "passed"),
            LessonStatus::Failed => write!(f, "failed"),
            LessonStatus::Completed => write!(f, "completed"),
            LessonStatus::Incomplete => write!(f, "incomplete"),
            LessonStatus::Browsed => write!(f, "browsed"),
            LessonStatus::NotAttempted => write!(f, "not attempted"),
        }
    }
}

impl FromStr for LessonStatus {
    type Err = DataModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "passed" => Ok(LessonStatus::Passed),
            "failed" => Ok(LessonStatus::Failed),
            "completed" => Ok(LessonStatus::Completed),
            "incomplete" => Ok(LessonStatus::Incomplete),
            "browsed" => Ok(LessonStatus::Browsed),
            "not attempted" => Ok(LessonStatus::NotAttempted),
            other => Err(DataModelError::UnknownLessonStatus(other.to_string())),
        }
    }
}

/// Legal values for `cmi.core.exit`. The normal condition is the empty
/// string on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExitCondition {
    #[serde(rename = "time-out")]
    TimeOut,
    #[serde(rename = "suspend")]
    Suspend,
    #[serde(rename = "logout")]
    Logout,
    #[serde(rename = "")]
    Normal,
}

impl fmt::Display for ExitCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCondition::TimeOut => write!(f, "time-out"),
            ExitCondition::Suspend => write!(f, "suspend"),
            ExitCondition::Logout => write!(f, "logout"),
            ExitCondition::Normal => Ok(()),
        }
    }
}

impl FromStr for ExitCondition {
    type Err = DataModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "time-out" => Ok(ExitCondition::TimeOut),
            "suspend" => Ok(ExitCondition::Suspend),
            "logout" => Ok(ExitCondition::Logout),
            "" => Ok(ExitCondition::Normal),
            other => Err(DataModelError::UnknownExitCondition(other.to_string())),
        }
    }
}

/// Legal values for `cmi.interactions.N.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InteractionType {
    #[serde(rename = "true-false")]
    TrueFalse,
    #[serde(rename = "choice")]
    Choice,
    #[serde(rename = "fill-in")]
    FillIn,
    #[serde(rename = "matching")]
    Matching,
    #[serde(rename = "performance")]
    Performance,
    #[serde(rename = "likert")]
    Likert,
    #[serde(rename = "sequencing")]
    Sequencing,
    #[serde(rename = "numeric")]
    Numeric,
}

impl fmt::Display for InteractionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionType::TrueFalse => write!(f, "true-false"),
            InteractionType::Choice => write!(f, "choice"),
            InteractionType::FillIn => write!(f, "fill-in"),
            InteractionType::Matching => write!(f, "matching"),
            InteractionType::Performance => write!(f, "performance"),
            InteractionType::Likert => write!(f, "likert"),
            InteractionType::Sequencing => write!(f, "sequencing"),
            InteractionType::Numeric => write!(f, "numeric"),
        }
    }
}

impl FromStr for InteractionType {
    type Err = DataModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "true-false" => Ok(InteractionType::TrueFalse),
            "choice" => Ok(InteractionType::Choice),
            "fill-in" => Ok(InteractionType::FillIn),
            "matching" => Ok(InteractionType::Matching),
            "performance" => Ok(InteractionType::Performance),
            "likert" => Ok(InteractionType::Likert),
            "sequencing" => Ok(InteractionType::Sequencing),
            "numeric" => Ok(InteractionType::Numeric),
            other => Err(DataModelError::UnknownInteractionType(other.to_string())),
        }
    }
}

/// Legal values for `cmi.interactions.N.result` — one of four keywords
/// or a floating-point number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InteractionResult {
    Correct,
    Wrong,
    Unanticipated,
    Neutral,
    /// A numeric result, written as its decimal string.
    Score(f64),
}

impl fmt::Display for InteractionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InteractionResult::Correct => write!(f, "correct"),
            InteractionResult::Wrong => write!(f, "wrong"),
            InteractionResult::Unanticipated => write!(f, "unanticipated"),
            InteractionResult::Neutral => write!(f, "neutral"),
            InteractionResult::Score(n) => write!(f, "{n}"),
        }
    }
}

impl FromStr for InteractionResult {
    type Err = DataModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "correct" => Ok(InteractionResult::Correct),
            "wrong" => Ok(InteractionResult::Wrong),
            "unanticipated" => Ok(InteractionResult::Unanticipated),
            "neutral" => Ok(InteractionResult::Neutral),
            other => other
                .parse::<f64>()
                .map(InteractionResult::Score)
                .map_err(|_| DataModelError::UnknownInteractionResult(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_default() {
        let score = Score::default();
        assert_eq!(score.raw, 0.0);
        assert_eq!(score.min, 0.0);
        assert_eq!(score.max, 100.0);
    }

    #[test]
    fn lesson_status_display_and_parse() {
        assert_eq!(LessonStatus::NotAttempted.to_string(), "not attempted");
        assert_eq!(
            "not attempted".parse::<LessonStatus>().unwrap(),
            LessonStatus::NotAttempted
        );
        assert_eq!(
            "completed".parse::<LessonStatus>().unwrap(),
            LessonStatus::Completed
        );
        assert!("done".parse::<LessonStatus>().is_err());
    }

    #[test]
    fn exit_normal_is_empty_string() {
        assert_eq!(ExitCondition::Normal.to_string(), "");
        assert_eq!("".parse::<ExitCondition>().unwrap(), ExitCondition::Normal);
        assert_eq!(
            "time-out".parse::<ExitCondition>().unwrap(),
            ExitCondition::TimeOut
        );
    }

    #[test]
    fn interaction_type_wire_strings() {
        assert_eq!(InteractionType::TrueFalse.to_string(), "true-false");
        assert_eq!(InteractionType::FillIn.to_string(), "fill-in");
        assert_eq!(
            "sequencing".parse::<InteractionType>().unwrap(),
            InteractionType::Sequencing
        );
        assert!("essay".parse::<InteractionType>().is_err());
    }

    #[test]
    fn interaction_result_keyword_or_number() {
        assert_eq!(
            "correct".parse::<InteractionResult>().unwrap(),
            InteractionResult::Correct
        );
        assert_eq!(
            "0.5".parse::<InteractionResult>().unwrap(),
            InteractionResult::Score(0.5)
        );
        assert_eq!(InteractionResult::Score(0.5).to_string(), "0.5");
        assert!("almost".parse::<InteractionResult>().is_err());
    }
}
