//! Wheel of Life self-assessment.
//!
//! # Responsibility
//! - Define the ten life areas and their per-area score/goal pair.
//! - Keep every stored score inside `[0, 10]` at one decimal.
//!
//! # Invariants
//! - An entry is keyed by its `DD-Mon-YY` date label.
//! - Area keys serialize with their display name (`Self Improvement`).

use super::ModelError;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 10.0;
const DATE_LABEL_FORMAT: &str = "%d-%b-%y";

/// Life area scored on the wheel, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum LifeArea {
    Body,
    Mind,
    Soul,
    Career,
    #[serde(rename = "Self Improvement")]
    SelfImprovement,
    Relationships,
    Romance,
    Money,
    Leisure,
    Environment,
}

impl LifeArea {
    pub const ALL: [LifeArea; 10] = [
        Self::Body,
        Self::Mind,
        Self::Soul,
        Self::Career,
        Self::SelfImprovement,
        Self::Relationships,
        Self::Romance,
        Self::Money,
        Self::Leisure,
        Self::Environment,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Body => "Body",
            Self::Mind => "Mind",
            Self::Soul => "Soul",
            Self::Career => "Career",
            Self::SelfImprovement => "Self Improvement",
            Self::Relationships => "Relationships",
            Self::Romance => "Romance",
            Self::Money => "Money",
            Self::Leisure => "Leisure",
            Self::Environment => "Environment",
        }
    }

    /// Guidance shown when scoring this area.
    pub fn score_prompt(self) -> &'static str {
        match self {
            Self::Body => "Rate your physical health, energy levels, and lifestyle habits",
            Self::Mind => "Rate your mental wellbeing, stress levels, and emotional balance",
            Self::Soul => "Rate your spiritual connection and sense of purpose",
            Self::Career => "Rate your job satisfaction and career progress",
            Self::SelfImprovement => "Rate your growth and learning in personal areas",
            Self::Relationships => "Rate the quality of your personal relationships",
            Self::Romance => "Rate your romantic relationship or satisfaction with dating life",
            Self::Money => "Rate your financial situation and money management",
            Self::Leisure => "Rate your work-life balance and enjoyment of free time",
            Self::Environment => "Rate your living space and surrounding environment",
        }
    }

    /// Guidance shown when setting a goal for this area.
    pub fn goal_prompt(self) -> &'static str {
        match self {
            Self::Body => "Set a goal to improve your physical well-being",
            Self::Mind => "Set a goal to enhance your mental health",
            Self::Soul => "Set a goal to deepen your spiritual practice",
            Self::Career => "Set a career-related goal",
            Self::SelfImprovement => "Set a personal development goal",
            Self::Relationships => "Set a goal to improve your relationships",
            Self::Romance => "Set a goal for your romantic life",
            Self::Money => "Set a financial goal",
            Self::Leisure => "Set a goal to improve your leisure time",
            Self::Environment => "Set a goal to improve your environment",
        }
    }
}

impl Display for LifeArea {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LifeArea {
    type Err = ModelError;

    /// Case-insensitive; `_`, `-` and spaces are interchangeable.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let key = fold_area_key(value);
        Self::ALL
            .into_iter()
            .find(|area| fold_area_key(area.name()) == key)
            .ok_or_else(|| ModelError::InvalidLifeArea(value.trim().to_string()))
    }
}

fn fold_area_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, ' ' | '_' | '-'))
        .map(|ch| ch.to_ascii_lowercase())
        .collect()
}

/// Clamps a raw score into `[0, 10]` and rounds it to one decimal.
///
/// NaN and negative input become `0`.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() || raw < MIN_SCORE {
        MIN_SCORE
    } else if raw > MAX_SCORE {
        MAX_SCORE
    } else {
        (raw * 10.0).round() / 10.0
    }
}

/// Parses free-form score input; anything unparsable counts as `0`.
pub fn parse_score(input: &str) -> f64 {
    clamp_score(input.trim().parse::<f64>().unwrap_or(MIN_SCORE))
}

/// Formats `date` as the wheel document id, e.g. `16-Oct-26`.
pub fn date_label(date: NaiveDate) -> String {
    date.format(DATE_LABEL_FORMAT).to_string()
}

/// Label for the local current date.
pub fn today_label() -> String {
    date_label(chrono::Local::now().date_naive())
}

pub fn parse_date_label(label: &str) -> Result<NaiveDate, ModelError> {
    NaiveDate::parse_from_str(label.trim(), DATE_LABEL_FORMAT)
        .map_err(|_| ModelError::InvalidDateLabel(label.trim().to_string()))
}

/// Score and goal recorded for one area.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AreaAssessment {
    #[serde(rename = "Score")]
    pub score: f64,
    #[serde(rename = "Goal", default)]
    pub goal: String,
}

/// One dated wheel-of-life assessment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelEntry {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub date: String,
    #[serde(flatten)]
    pub areas: BTreeMap<LifeArea, AreaAssessment>,
}

impl WheelEntry {
    pub fn new(first_name: impl Into<String>, date: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            date: date.into(),
            areas: BTreeMap::new(),
        }
    }

    /// Stores a clamped score for `area`, keeping any existing goal.
    pub fn set_score(&mut self, area: LifeArea, raw: f64) -> f64 {
        let score = clamp_score(raw);
        self.areas.entry(area).or_default().score = score;
        score
    }

    pub fn set_goal(&mut self, area: LifeArea, goal: impl Into<String>) {
        self.areas.entry(area).or_default().goal = goal.into().trim().to_string();
    }

    /// Score for `area`; unscored areas read as `0`.
    pub fn score(&self, area: LifeArea) -> f64 {
        self.areas.get(&area).map_or(MIN_SCORE, |a| a.score)
    }

    pub fn goal(&self, area: LifeArea) -> &str {
        self.areas.get(&area).map_or("", |a| a.goal.as_str())
    }

    /// Sum of all area scores (0..=100).
    pub fn total_score(&self) -> f64 {
        LifeArea::ALL.iter().map(|area| self.score(*area)).sum()
    }

    /// Scores in display order, one per area.
    pub fn chart_values(&self) -> Vec<f64> {
        LifeArea::ALL.iter().map(|area| self.score(*area)).collect()
    }

    /// Whether the entry has a name, a date and a score for every area.
    pub fn is_complete(&self) -> bool {
        !self.first_name.trim().is_empty()
            && !self.date.trim().is_empty()
            && LifeArea::ALL.iter().all(|area| self.areas.contains_key(area))
    }

    /// Copy with every missing area present at score `0` and every score
    /// clamped, including ones written straight into `areas`.
    pub fn filled(&self) -> Self {
        let mut filled = self.clone();
        for area in LifeArea::ALL {
            let assessment = filled.areas.entry(area).or_default();
            assessment.score = clamp_score(assessment.score);
        }
        filled
    }
}
