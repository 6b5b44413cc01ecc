use crate::stats::StatsSummary;
use crate::store::AppState;

/// The statistics the display layer shows, recomputed from the repository
/// on every call. Repository sizes are small enough that no caching layer
/// is needed.
pub async fn get_stats_summary(state: &AppState) -> Result<StatsSummary, String> {
  let rounds = state.rounds.all().await;
  Ok(StatsSummary::compute(&rounds))
}
