//! Test utilities and helpers for the crate's unit tests
//!
//! This module provides common test infrastructure including:
//! - Mock data factories for rounds and drafts
//! - Repository seeding
//! - Helper assertions

use chrono::NaiveDate;

use crate::models::round::{NewRound, Round, RoundType, TeeColor};
use crate::store::AppState;

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// Calendar date for the Nth mocked round, keeping test data deterministic.
pub fn test_date(day_offset: u64) -> NaiveDate {
  NaiveDate::from_ymd_opt(2025, 4, 1).expect("valid base date")
    + chrono::Duration::days(day_offset as i64)
}

/// An 18-hole round from the white tees with only the required fields set.
/// Tests tweak individual fields from here.
pub fn mock_round(id: u64, course: &str, score: u32) -> Round {
  Round {
    id,
    course: course.to_string(),
    date: test_date(id),
    score,
    par: 72,
    round_type: RoundType::Eighteen,
    tees: TeeColor::White,
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

/// A 9-hole round on a par-36 loop.
pub fn mock_nine_hole_round(id: u64, course: &str, score: u32) -> Round {
  let mut round = mock_round(id, course, score);
  round.round_type = RoundType::Nine;
  round.par = 36;
  round
}

/// A submittable draft with the required fields filled in.
pub fn mock_draft(course: &str, score: u32) -> NewRound {
  NewRound {
    course: course.to_string(),
    date: Some(test_date(0)),
    score: Some(score),
    ..NewRound::default()
  }
}

/// Append `count` plain rounds to the repository; returns the assigned ids.
pub async fn seed_test_rounds(state: &AppState, count: usize) -> Vec<u64> {
  let mut ids = Vec::new();

  for i in 0..count {
    let draft = mock_draft(&format!("Course {}", i % 3), 85 + (i % 4) as u32);
    let round = state
      .rounds
      .append(draft, false)
      .await
      .expect("seed draft is valid");
    ids.push(round.id);
  }

  ids
}

/// ---------------------------------------------------------------------------
/// Test Macros
/// ---------------------------------------------------------------------------

/// Assert two floats are approximately equal within a tolerance
#[macro_export]
macro_rules! assert_approx_eq {
  ($left:expr, $right:expr, $tolerance:expr) => {
    let left = $left;
    let right = $right;
    let tolerance = $tolerance;
    let diff = (left - right).abs();
    assert!(
      diff < tolerance,
      "Values not approximately equal: {} vs {} (diff: {}, tolerance: {})",
      left,
      right,
      diff,
      tolerance
    );
  };
}

/// ---------------------------------------------------------------------------
/// Tests for Test Utilities
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_mock_factories_create_valid_data() {
    let round = mock_round(3, "Pebble Beach Golf Links", 88);
    assert_eq!(round.id, 3);
    assert_eq!(round.par, 72);
    assert_eq!(round.round_type, RoundType::Eighteen);
    assert!(round.putts.is_none());

    let nine = mock_nine_hole_round(4, "Muni North", 42);
    assert_eq!(nine.par, 36);
    assert_eq!(nine.round_type, RoundType::Nine);

    let draft = mock_draft("Muni North", 42);
    assert!(draft.resolve(false).is_ok());
  }

  #[tokio::test]
  async fn test_seed_rounds_returns_correct_count() {
    let state = AppState::new();

    let ids = seed_test_rounds(&state, 5).await;
    assert_eq!(ids.len(), 5);
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
    assert_eq!(state.rounds.len().await, 5);
  }
}
