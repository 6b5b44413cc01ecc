use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::RwLock;

use crate::models::round::{NewRound, Round, RoundEntryError};

/// Application state shared with the UI shell.
pub struct AppState {
  pub rounds: RoundStore,
}

impl AppState {
  pub fn new() -> Self {
    Self {
      rounds: RoundStore::new(),
    }
  }
}

impl Default for AppState {
  fn default() -> Self {
    Self::new()
  }
}

/// In-memory, append-only repository of recorded rounds.
///
/// Rounds live for the session only; they are never edited or deleted once
/// appended. Ids are monotonic from 1 and never reused.
pub struct RoundStore {
  rounds: RwLock<Vec<Round>>,
  next_id: AtomicU64,
}

impl RoundStore {
  pub fn new() -> Self {
    Self {
      rounds: RwLock::new(Vec::new()),
      next_id: AtomicU64::new(1),
    }
  }

  /// Validate a draft, assign it an id, and append it.
  ///
  /// With `use_hole_by_hole` set the stored score is the sum of the recorded
  /// hole scores, so the two can never drift apart.
  pub async fn append(
    &self,
    draft: NewRound,
    use_hole_by_hole: bool,
  ) -> Result<Round, RoundEntryError> {
    let (date, score) = draft.resolve(use_hole_by_hole)?;
    let id = self.next_id.fetch_add(1, Ordering::Relaxed);

    let round = Round {
      id,
      course: draft.course,
      date,
      score,
      par: draft.par,
      round_type: draft.round_type,
      tees: draft.tees,
      course_id: draft.course_id,
      course_rating: draft.course_rating,
      slope_rating: draft.slope_rating,
      yardage: draft.yardage,
      weather: draft.weather,
      temperature_f: draft.temperature_f,
      wind: draft.wind,
      course_condition: draft.course_condition,
      fairways_hit: draft.fairways_hit,
      greens_in_regulation: draft.greens_in_regulation,
      putts: draft.putts,
      chips: draft.chips,
      bunker_shots: draft.bunker_shots,
      penalties: draft.penalties,
      driving_distance: draft.driving_distance,
      hole_scores: draft.hole_scores,
      notes: draft.notes,
    };

    self.rounds.write().await.push(round.clone());
    Ok(round)
  }

  /// Snapshot of the full history in insertion order.
  pub async fn all(&self) -> Vec<Round> {
    self.rounds.read().await.clone()
  }

  pub async fn len(&self) -> usize {
    self.rounds.read().await.len()
  }

  pub async fn is_empty(&self) -> bool {
    self.rounds.read().await.is_empty()
  }
}

impl Default for RoundStore {
  fn default() -> Self {
    Self::new()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::round::{HoleScores, RoundEntryError, RoundType, TeeColor, HOLES_PER_ROUND};
  use crate::test_utils::mock_draft;

  #[tokio::test]
  async fn test_append_then_read_back_round_trips() {
    let store = RoundStore::new();

    let mut draft = mock_draft("Pebble Beach Golf Links", 88);
    draft.putts = Some(34);
    draft.fairways_hit = Some("8/14".to_string());
    draft.notes = Some("Windy on the back nine".to_string());

    let stored = store.append(draft.clone(), false).await.expect("valid draft");
    let all = store.all().await;

    assert_eq!(all.len(), 1);
    assert_eq!(all[0], stored);
    assert_eq!(all[0].course, draft.course);
    assert_eq!(all[0].score, 88);
    assert_eq!(all[0].par, 72);
    assert_eq!(all[0].tees, TeeColor::White);
    assert_eq!(all[0].putts, Some(34));
    assert_eq!(all[0].fairways_hit.as_deref(), Some("8/14"));
    assert_eq!(all[0].notes.as_deref(), Some("Windy on the back nine"));
  }

  #[tokio::test]
  async fn test_ids_are_monotonic_and_never_reused() {
    let store = RoundStore::new();

    let first = store
      .append(mock_draft("Course A", 90), false)
      .await
      .unwrap();
    let second = store
      .append(mock_draft("Course B", 85), false)
      .await
      .unwrap();

    assert_eq!(first.id, 1);
    assert_eq!(second.id, 2);
  }

  #[tokio::test]
  async fn test_invalid_draft_is_rejected_and_not_appended() {
    let store = RoundStore::new();

    let mut draft = mock_draft("", 90);
    draft.course = String::new();

    let result = store.append(draft, false).await;
    assert_eq!(result, Err(RoundEntryError::MissingCourse));
    assert!(store.is_empty().await);
  }

  #[tokio::test]
  async fn test_hole_by_hole_score_matches_stored_sum() {
    let store = RoundStore::new();

    let mut draft = mock_draft("Torrey Pines (South)", 0);
    draft.score = None;
    draft.hole_scores = Some(HoleScores([Some(5); HOLES_PER_ROUND]));

    let stored = store.append(draft, true).await.expect("complete holes");
    assert_eq!(stored.score, 90);
    assert_eq!(
      stored
        .hole_scores
        .as_ref()
        .and_then(|h| h.total_for(RoundType::Eighteen)),
      Some(stored.score)
    );
  }
}
