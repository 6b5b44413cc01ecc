//! Pure, deterministic statistics over recorded rounds.
//!
//! Everything here is a stateless function of a repository snapshot: calling
//! twice with the same rounds yields the same output. Empty inputs and empty
//! filtered subsets return sentinels, never a divide-by-zero.

use serde::Serialize;

use crate::models::round::{Round, RoundType};

/// Net-differential multiplier used by the handicap estimate.
const HANDICAP_FACTOR: f64 = 0.96;

/// ---------------------------------------------------------------------------
/// Ratio Parsing
/// ---------------------------------------------------------------------------

/// Parse a "hit/attempts" entry like "8/14".
///
/// Anything without a `/` or with non-numeric parts is treated as not
/// recorded, matching the entry form's free-text tolerance.
pub fn parse_ratio(raw: &str) -> Option<(u32, u32)> {
  let (hit, attempts) = raw.split_once('/')?;
  let hit = hit.trim().parse().ok()?;
  let attempts = attempts.trim().parse().ok()?;
  Some((hit, attempts))
}

/// ---------------------------------------------------------------------------
/// Aggregate Metrics
/// ---------------------------------------------------------------------------

/// Handicap differential for one round: strokes over par, doubled for 9-hole
/// rounds to approximate an 18-hole equivalent.
pub fn differential(round: &Round) -> f64 {
  let to_par = round.to_par() as f64;
  match round.round_type {
    RoundType::Nine => 2.0 * to_par,
    RoundType::Eighteen => to_par,
  }
}

/// Rough handicap estimate: mean differential scaled by the usual 0.96,
/// rounded to the nearest stroke and floored at zero. Zero for no rounds.
pub fn handicap_estimate(rounds: &[Round]) -> i64 {
  if rounds.is_empty() {
    return 0;
  }

  let sum: f64 = rounds.iter().map(differential).sum();
  let average = sum / rounds.len() as f64;
  ((average * HANDICAP_FACTOR).round() as i64).max(0)
}

/// Fairways hit as a percentage, pooled across all rounds with a parsable
/// ratio. Zero when nothing parsable was recorded.
pub fn fairway_percentage(rounds: &[Round]) -> f64 {
  pooled_percentage(rounds, |r| r.fairways_hit.as_deref()).unwrap_or(0.0)
}

/// Greens in regulation as a percentage, pooled the same way.
pub fn gir_percentage(rounds: &[Round]) -> f64 {
  pooled_percentage(rounds, |r| r.greens_in_regulation.as_deref()).unwrap_or(0.0)
}

/// Lowest score on record; None with no rounds.
pub fn best_score(rounds: &[Round]) -> Option<u32> {
  rounds.iter().map(|r| r.score).min()
}

/// Mean putts over rounds where putts were recorded; None when none were.
/// A round with no putts entry does not count as zero putts.
pub fn average_putts(rounds: &[Round]) -> Option<f64> {
  mean(rounds.iter().filter_map(|r| r.putts.map(f64::from)))
}

/// Pool numerators and denominators independently, then divide once.
/// None when no round contributes a valid ratio or attempts pool to zero.
fn pooled_percentage(
  rounds: &[Round],
  field: impl Fn(&Round) -> Option<&str>,
) -> Option<f64> {
  let mut hit_total: u64 = 0;
  let mut attempt_total: u64 = 0;

  for round in rounds {
    if let Some((hit, attempts)) = field(round).and_then(parse_ratio) {
      hit_total += u64::from(hit);
      attempt_total += u64::from(attempts);
    }
  }

  if attempt_total == 0 {
    None
  } else {
    Some(hit_total as f64 / attempt_total as f64 * 100.0)
  }
}

pub(crate) fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
  let mut sum = 0.0;
  let mut count = 0usize;
  for v in values {
    sum += v;
    count += 1;
  }
  if count == 0 {
    None
  } else {
    Some(sum / count as f64)
  }
}

/// ---------------------------------------------------------------------------
/// Statistics Surface
/// ---------------------------------------------------------------------------

/// Everything the display layer shows at the top of the page, recomputed on
/// demand from the repository. Option fields are None when the backing data
/// was never recorded so the shell can render a dash.
#[derive(Debug, Clone, Serialize)]
pub struct StatsSummary {
  pub rounds_played: usize,
  pub nine_hole_rounds: usize,
  pub eighteen_hole_rounds: usize,
  pub handicap_estimate: i64,
  pub best_score: Option<u32>,
  pub average_putts: Option<f64>,
  pub fairway_pct: Option<f64>,
  pub gir_pct: Option<f64>,
}

impl StatsSummary {
  pub fn compute(rounds: &[Round]) -> Self {
    let nine_hole_rounds = rounds
      .iter()
      .filter(|r| r.round_type == RoundType::Nine)
      .count();

    Self {
      rounds_played: rounds.len(),
      nine_hole_rounds,
      eighteen_hole_rounds: rounds.len() - nine_hole_rounds,
      handicap_estimate: handicap_estimate(rounds),
      best_score: best_score(rounds),
      average_putts: average_putts(rounds),
      fairway_pct: pooled_percentage(rounds, |r| r.fairways_hit.as_deref()),
      gir_pct: pooled_percentage(rounds, |r| r.greens_in_regulation.as_deref()),
    }
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::assert_approx_eq;
  use crate::models::round::RoundType;
  use crate::test_utils::mock_round;

  #[test]
  fn test_handicap_estimate_empty_is_zero() {
    assert_eq!(handicap_estimate(&[]), 0);
  }

  #[test]
  fn test_handicap_never_negative() {
    // Scores well under par would produce a negative average; clamp to 0
    let rounds = vec![mock_round(1, "Links", 68), mock_round(2, "Links", 66)];
    assert_eq!(handicap_estimate(&rounds), 0);
  }

  #[test]
  fn test_nine_hole_differential_is_doubled() {
    // A 40 on a par-36 nine matches an 80 on a par-72 eighteen
    let mut nine = mock_round(1, "Muni North", 40);
    nine.round_type = RoundType::Nine;
    nine.par = 36;

    let eighteen = mock_round(2, "Muni North", 80);

    assert_approx_eq!(differential(&nine), 8.0, 1e-9);
    assert_approx_eq!(differential(&eighteen), 8.0, 1e-9);

    // Both rounds contribute the same, so the estimate is round(8 * 0.96)
    assert_eq!(handicap_estimate(&[nine]), 8);
    assert_eq!(handicap_estimate(&[eighteen]), 8);
  }

  #[test]
  fn test_parse_ratio_accepts_hit_slash_attempts() {
    assert_eq!(parse_ratio("8/14"), Some((8, 14)));
    assert_eq!(parse_ratio(" 7 / 14 "), Some((7, 14)));
    assert_eq!(parse_ratio("8"), None);
    assert_eq!(parse_ratio("eight/14"), None);
    assert_eq!(parse_ratio("8/"), None);
  }

  #[test]
  fn test_fairway_percentage_single_round() {
    let mut round = mock_round(1, "Links", 85);
    round.fairways_hit = Some("7/14".to_string());

    assert_approx_eq!(fairway_percentage(&[round]), 50.0, 1e-9);
  }

  #[test]
  fn test_fairway_percentage_pools_across_rounds() {
    let mut a = mock_round(1, "Links", 85);
    a.fairways_hit = Some("10/14".to_string());
    let mut b = mock_round(2, "Links", 88);
    b.fairways_hit = Some("4/14".to_string());

    // 14 of 28, not the mean of 71.4% and 28.6% over unequal attempts
    assert_approx_eq!(fairway_percentage(&[a, b]), 50.0, 1e-9);
  }

  #[test]
  fn test_malformed_ratios_are_excluded_not_errors() {
    let mut good = mock_round(1, "Links", 85);
    good.fairways_hit = Some("7/14".to_string());
    let mut no_slash = mock_round(2, "Links", 88);
    no_slash.fairways_hit = Some("9".to_string());
    let mut garbage = mock_round(3, "Links", 90);
    garbage.fairways_hit = Some("most/some".to_string());
    let absent = mock_round(4, "Links", 92);

    let rounds = vec![good, no_slash, garbage, absent];
    assert_approx_eq!(fairway_percentage(&rounds), 50.0, 1e-9);
  }

  #[test]
  fn test_gir_percentage_no_data_is_zero() {
    let rounds = vec![mock_round(1, "Links", 85)];
    assert_approx_eq!(gir_percentage(&rounds), 0.0, 1e-9);
  }

  #[test]
  fn test_best_score_and_empty_sentinel() {
    assert_eq!(best_score(&[]), None);

    let rounds = vec![
      mock_round(1, "Links", 91),
      mock_round(2, "Links", 84),
      mock_round(3, "Links", 88),
    ];
    assert_eq!(best_score(&rounds), Some(84));
  }

  #[test]
  fn test_average_putts_ignores_unrecorded_rounds() {
    let mut a = mock_round(1, "Links", 85);
    a.putts = Some(36);
    let b = mock_round(2, "Links", 88); // no putts recorded
    let mut c = mock_round(3, "Links", 90);
    c.putts = Some(30);

    let avg = average_putts(&[a, b, c]).expect("two rounds have putts");
    assert_approx_eq!(avg, 33.0, 1e-9);

    assert_eq!(average_putts(&[mock_round(4, "Links", 80)]), None);
  }

  #[test]
  fn test_stats_summary_splits_round_types() {
    let mut nine = mock_round(1, "Muni North", 40);
    nine.round_type = RoundType::Nine;
    nine.par = 36;
    let eighteen = mock_round(2, "Links", 85);

    let summary = StatsSummary::compute(&[nine, eighteen]);
    assert_eq!(summary.rounds_played, 2);
    assert_eq!(summary.nine_hole_rounds, 1);
    assert_eq!(summary.eighteen_hole_rounds, 1);
    assert_eq!(summary.best_score, Some(40));
    assert_eq!(summary.fairway_pct, None);
    assert_eq!(summary.gir_pct, None);
  }
}
