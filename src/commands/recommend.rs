use crate::models::Recommendation;
use crate::recommend::generate_recommendations;
use crate::store::AppState;

/// Recompute the coaching recommendations from the full round history.
/// Nothing is cached or persisted; the same history yields the same list.
pub async fn get_recommendations(state: &AppState) -> Result<Vec<Recommendation>, String> {
  let rounds = state.rounds.all().await;
  Ok(generate_recommendations(&rounds))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::recommendation::Priority;
  use crate::test_utils::{mock_draft, seed_test_rounds};

  #[tokio::test]
  async fn test_single_round_gets_bootstrap_nudge() {
    let state = AppState::new();
    crate::commands::add_round(&state, mock_draft("Links", 85), false)
      .await
      .unwrap();

    let recs = get_recommendations(&state).await.unwrap();
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].title, "Track More Rounds");
    assert_eq!(recs[0].priority, Priority::High);
  }

  #[tokio::test]
  async fn test_recomputed_identically_per_snapshot() {
    let state = AppState::new();
    seed_test_rounds(&state, 5).await;

    let first = get_recommendations(&state).await.unwrap();
    let second = get_recommendations(&state).await.unwrap();
    assert_eq!(first, second);
    assert!(!first.is_empty());
  }
}
