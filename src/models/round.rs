use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Holes on a full-length course; 9-hole rounds use the front half only.
pub const HOLES_PER_ROUND: usize = 18;
pub const FRONT_NINE_HOLES: usize = 9;

/// ---------------------------------------------------------------------------
/// Field Enums
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RoundType {
  #[serde(rename = "9")]
  Nine,
  #[default]
  #[serde(rename = "18")]
  Eighteen,
}

impl RoundType {
  pub fn holes(&self) -> usize {
    match self {
      RoundType::Nine => FRONT_NINE_HOLES,
      RoundType::Eighteen => HOLES_PER_ROUND,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      RoundType::Nine => "9",
      RoundType::Eighteen => "18",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TeeColor {
  Black,
  Blue,
  #[default]
  White,
  Red,
  Gold,
}

impl TeeColor {
  pub fn as_str(&self) -> &'static str {
    match self {
      TeeColor::Black => "black",
      TeeColor::Blue => "blue",
      TeeColor::White => "white",
      TeeColor::Red => "red",
      TeeColor::Gold => "gold",
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Weather {
  Sunny,
  Cloudy,
  Overcast,
  LightRain,
  Rain,
  Windy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wind {
  Calm,
  Light,
  Moderate,
  Strong,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseCondition {
  Excellent,
  Good,
  Fair,
  Poor,
}

/// ---------------------------------------------------------------------------
/// Hole-by-Hole Scores
/// ---------------------------------------------------------------------------

/// Per-hole stroke counts. Always 18 slots; a 9-hole round populates only the
/// front nine and leaves the rest unset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct HoleScores(pub [Option<u32>; HOLES_PER_ROUND]);

impl HoleScores {
  /// Total strokes over the holes the round type plays, or None if any of
  /// those holes is still unrecorded.
  pub fn total_for(&self, round_type: RoundType) -> Option<u32> {
    Self::complete_total(&self.0[..round_type.holes()])
  }

  /// Number of holes with a recorded stroke count.
  pub fn recorded(&self) -> usize {
    self.0.iter().flatten().count()
  }

  pub fn front_nine_total(&self) -> Option<u32> {
    Self::complete_total(&self.0[..FRONT_NINE_HOLES])
  }

  pub fn back_nine_total(&self) -> Option<u32> {
    Self::complete_total(&self.0[FRONT_NINE_HOLES..])
  }

  fn complete_total(holes: &[Option<u32>]) -> Option<u32> {
    if holes.iter().all(|h| h.is_some()) {
      Some(holes.iter().flatten().sum())
    } else {
      None
    }
  }
}

/// ---------------------------------------------------------------------------
/// Round
/// ---------------------------------------------------------------------------

/// One recorded round of golf. Optional fields stay None when the user did
/// not record them; "not recorded" is never collapsed to zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Round {
  pub id: u64,
  pub course: String,
  pub date: NaiveDate,
  pub score: u32,
  pub par: u32,
  pub round_type: RoundType,
  pub tees: TeeColor,
  // Catalog back-references, filled when the round was started from a
  // catalog course
  pub course_id: Option<String>,
  pub course_rating: Option<f64>,
  pub slope_rating: Option<u32>,
  pub yardage: Option<u32>,
  // Conditions
  pub weather: Option<Weather>,
  pub temperature_f: Option<f64>,
  pub wind: Option<Wind>,
  pub course_condition: Option<CourseCondition>,
  // Performance detail; ratio fields keep the raw "hit/attempts" entry text
  pub fairways_hit: Option<String>,
  pub greens_in_regulation: Option<String>,
  pub putts: Option<u32>,
  pub chips: Option<u32>,
  pub bunker_shots: Option<u32>,
  pub penalties: Option<u32>,
  pub driving_distance: Option<u32>,
  pub hole_scores: Option<HoleScores>,
  pub notes: Option<String>,
}

impl Round {
  /// Strokes relative to par (negative when under).
  pub fn to_par(&self) -> i64 {
    self.score as i64 - self.par as i64
  }
}

/// Draft for a round being entered (everything except the id, which the
/// store assigns). Its Default is the post-submit reset state of the entry
/// form: par 72, white tees, 18 holes, nothing else recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewRound {
  pub course: String,
  pub date: Option<NaiveDate>,
  pub score: Option<u32>,
  pub par: u32,
  pub round_type: RoundType,
  pub tees: TeeColor,
  pub course_id: Option<String>,
  pub course_rating: Option<f64>,
  pub slope_rating: Option<u32>,
  pub yardage: Option<u32>,
  pub weather: Option<Weather>,
  pub temperature_f: Option<f64>,
  pub wind: Option<Wind>,
  pub course_condition: Option<CourseCondition>,
  pub fairways_hit: Option<String>,
  pub greens_in_regulation: Option<String>,
  pub putts: Option<u32>,
  pub chips: Option<u32>,
  pub bunker_shots: Option<u32>,
  pub penalties: Option<u32>,
  pub driving_distance: Option<u32>,
  pub hole_scores: Option<HoleScores>,
  pub notes: Option<String>,
}

impl Default for NewRound {
  fn default() -> Self {
    Self {
      course: String::new(),
      date: None,
      score: None,
      par: 72,
      round_type: RoundType::default(),
      tees: TeeColor::default(),
      course_id: None,
      course_rating: None,
      slope_rating: None,
      yardage: None,
      weather: None,
      temperature_f: None,
      wind: None,
      course_condition: None,
      fairways_hit: None,
      greens_in_regulation: None,
      putts: None,
      chips: None,
      bunker_shots: None,
      penalties: None,
      driving_distance: None,
      hole_scores: None,
      notes: None,
    }
  }
}

impl NewRound {
  /// Validate the minimum-required fields and resolve the final score.
  ///
  /// With hole-by-hole entry active the score comes from the hole sums and
  /// every hole the round type plays must be recorded; otherwise the direct
  /// score is required.
  pub fn resolve(&self, use_hole_by_hole: bool) -> Result<(NaiveDate, u32), RoundEntryError> {
    if self.course.trim().is_empty() {
      return Err(RoundEntryError::MissingCourse);
    }

    let date = self.date.ok_or(RoundEntryError::MissingDate)?;

    let score = if use_hole_by_hole {
      let expected = self.round_type.holes();
      let holes = self
        .hole_scores
        .as_ref()
        .ok_or(RoundEntryError::IncompleteHoles { recorded: 0, expected })?;
      holes
        .total_for(self.round_type)
        .ok_or(RoundEntryError::IncompleteHoles {
          recorded: holes.recorded(),
          expected,
        })?
    } else {
      self.score.ok_or(RoundEntryError::MissingScore)?
    };

    if score == 0 {
      return Err(RoundEntryError::InvalidScore);
    }

    Ok((date, score))
  }
}

/// ---------------------------------------------------------------------------
/// Entry Validation Errors
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RoundEntryError {
  #[error("Course name is required")]
  MissingCourse,

  #[error("Round date is required")]
  MissingDate,

  #[error("Score is required")]
  MissingScore,

  #[error("Score must be greater than zero")]
  InvalidScore,

  #[error("Hole-by-hole entry is incomplete: {recorded} of {expected} holes recorded")]
  IncompleteHoles { recorded: usize, expected: usize },
}

impl Serialize for RoundEntryError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}
