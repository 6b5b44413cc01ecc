pub mod catalog;
pub mod recommend;
pub mod stats;

use crate::models::round::{NewRound, Round};
use crate::store::AppState;

const RECENT_ROUNDS_DEFAULT: usize = 10;

/// Validate a submitted draft and append it to the repository.
///
/// With `use_hole_by_hole` set the score is resolved from the hole sums.
/// A draft missing its required fields is rejected and nothing is stored.
pub async fn add_round(
  state: &AppState,
  draft: NewRound,
  use_hole_by_hole: bool,
) -> Result<Round, String> {
  state
    .rounds
    .append(draft, use_hole_by_hole)
    .await
    .map_err(|e| format!("Failed to add round: {}", e))
}

/// Full round history in the order it was entered.
pub async fn get_rounds(state: &AppState) -> Result<Vec<Round>, String> {
  Ok(state.rounds.all().await)
}

/// Newest rounds first, for the recent-rounds panel.
pub async fn get_recent_rounds(
  state: &AppState,
  limit: Option<usize>,
) -> Result<Vec<Round>, String> {
  let limit = limit.unwrap_or(RECENT_ROUNDS_DEFAULT);

  let mut rounds = state.rounds.all().await;
  rounds.reverse();
  rounds.truncate(limit);
  Ok(rounds)
}
