//! Rule-based coaching recommendations derived from the round history.
//!
//! Each rule is an independent pass over the rounds: passes never see each
//! other's output, and a pass whose inputs are missing simply contributes
//! nothing. The engine is the ordered concatenation of the passes followed
//! by a stable sort on priority, so equal-priority items keep the order the
//! passes produced them in.

use std::collections::HashMap;

use crate::models::recommendation::{Priority, Recommendation};
use crate::models::round::{Round, RoundType, TeeColor, Wind, HOLES_PER_ROUND};
use crate::stats;

/// ---------------------------------------------------------------------------
/// Thresholds
/// ---------------------------------------------------------------------------

/// Rounds analyzed by the recent-form rules.
pub const RECENT_WINDOW: usize = 5;
/// Below this many rounds every comparison is meaningless; only the
/// getting-started nudge is produced.
pub const MIN_ROUNDS_FOR_ANALYSIS: usize = 2;

const PUTTS_WEAK_AVG: f64 = 33.0;
const PUTTS_STRONG_AVG: f64 = 30.0;
const FAIRWAY_WEAK_PCT: f64 = 50.0;
const FAIRWAY_STRONG_PCT: f64 = 70.0;
const GIR_WEAK_PCT: f64 = 40.0;
const PENALTIES_AVG_LIMIT: f64 = 1.0;
const WIND_PENALTY_STROKES: f64 = 3.0;
const TREND_STROKES: i64 = 3;
const MIN_ROUNDS_FOR_TREND: usize = 3;
const HIGH_SLOPE: u32 = 135;
const LOW_SLOPE: u32 = 125;
const SLOPE_GAP_STROKES: f64 = 5.0;
const MIN_ROUNDS_PER_TEE: usize = 2;
const TEE_GAP_STROKES: f64 = 3.0;
const FAMILIAR_PLAY_COUNT: usize = 3;
const FAMILIARITY_GAP_STROKES: f64 = 4.0;
/// Per-hole mean above which a hole counts as trouble. Assumes a mostly
/// par-4 course; callers with unusual layouts can pass their own threshold
/// to [`hole_trouble_with_threshold`].
pub const TROUBLE_HOLE_MEAN_STROKES: f64 = 5.0;
const TROUBLE_HOLE_REPORT_LIMIT: usize = 3;
const MIN_ROUNDS_WITH_HOLE_DATA: usize = 2;
const NINE_SPLIT_GAP_STROKES: f64 = 3.0;
const MIN_ROUNDS_PER_FORMAT: usize = 2;
const FORMAT_GAP_PER_HOLE: f64 = 0.3;

/// ---------------------------------------------------------------------------
/// Engine
/// ---------------------------------------------------------------------------

/// Every rule pass, in presentation order for equal priorities. Recent-form
/// rules read the first argument, full-history rules the second.
const RULE_PASSES: &[fn(&[Round], &[Round]) -> Vec<Recommendation>] = &[
  putting_pass,
  driving_pass,
  approach_pass,
  penalties_pass,
  wind_pass,
  trend_pass,
  course_difficulty_pass,
  tee_selection_pass,
  familiarity_pass,
  hole_trouble_pass,
  front_back_pass,
  format_gap_pass,
  format_variety_pass,
];

/// Derive the prioritized recommendation list from the full round history.
///
/// Pure and idempotent: the same history always yields the same list. Never
/// returns an empty list for a caller that has rounds - the bootstrap and
/// fallback items guarantee at least one entry.
pub fn generate_recommendations(rounds: &[Round]) -> Vec<Recommendation> {
  if rounds.len() < MIN_ROUNDS_FOR_ANALYSIS {
    return vec![getting_started()];
  }

  let recent = &rounds[rounds.len().saturating_sub(RECENT_WINDOW)..];

  let mut recs: Vec<Recommendation> = Vec::new();
  for pass in RULE_PASSES {
    recs.extend(pass(recent, rounds));
  }

  if recs.is_empty() {
    recs.push(consistent_performance());
  }

  // Stable: ties keep pass order, and within a pass its own output order.
  recs.sort_by(|a, b| b.priority.weight().cmp(&a.priority.weight()));
  recs
}

fn getting_started() -> Recommendation {
  Recommendation::new(
    "Getting Started",
    "🎯",
    "Track More Rounds",
    "Add a few more rounds to unlock personalized insights and recommendations.".to_string(),
    Priority::High,
  )
}

fn consistent_performance() -> Recommendation {
  Recommendation::new(
    "General",
    "🎯",
    "Consistent Performance",
    "Your game is well-balanced! Focus on maintaining consistency and small improvements across all areas."
      .to_string(),
    Priority::Low,
  )
  .with_actions(&[
    "Continue current practice routine",
    "Set specific improvement goals",
    "Track progress over time",
  ])
}

/// ---------------------------------------------------------------------------
/// Recent-Form Rules
/// ---------------------------------------------------------------------------

fn putting_pass(recent: &[Round], _all: &[Round]) -> Vec<Recommendation> {
  let avg = match stats::average_putts(recent) {
    Some(avg) => avg,
    None => return vec![],
  };

  if avg > PUTTS_WEAK_AVG {
    vec![Recommendation::new(
      "Short Game",
      "⛳",
      "Focus on Putting Practice",
      format!(
        "Your recent putting average is {:.1} putts per round. Tour average is 29-30. Spend 30% of practice time on putting drills.",
        avg
      ),
      Priority::High,
    )
    .with_actions(&[
      "Practice 3-foot putts until 95% success rate",
      "Work on lag putting from 30+ feet",
      "Focus on green reading skills",
    ])]
  } else if avg < PUTTS_STRONG_AVG {
    vec![Recommendation::new(
      "Strength Area",
      "🎯",
      "Putting is Your Strength",
      format!(
        "Excellent putting! Average of {:.1} putts per round. Maintain this strength while working on other areas.",
        avg
      ),
      Priority::Low,
    )]
  } else {
    vec![]
  }
}

fn driving_pass(recent: &[Round], _all: &[Round]) -> Vec<Recommendation> {
  let pct = stats::fairway_percentage(recent);

  if pct > 0.0 && pct < FAIRWAY_WEAK_PCT {
    vec![Recommendation::new(
      "Driving",
      "🏌️",
      "Improve Driving Accuracy",
      format!(
        "Hitting {:.0}% of fairways. Focus on accuracy over distance. Aim for 60%+ fairway accuracy.",
        pct
      ),
      Priority::High,
    )
    .with_actions(&[
      "Practice with alignment sticks",
      "Consider shorter, more controlled swings",
      "Work on setup and tempo",
    ])]
  } else if pct > FAIRWAY_STRONG_PCT {
    vec![Recommendation::new(
      "Strength Area",
      "💪",
      "Excellent Driving Accuracy",
      format!(
        "Outstanding fairway accuracy at {:.0}%! Consider adding distance while maintaining accuracy.",
        pct
      ),
      Priority::Low,
    )]
  } else {
    vec![]
  }
}

fn approach_pass(recent: &[Round], _all: &[Round]) -> Vec<Recommendation> {
  let pct = stats::gir_percentage(recent);

  if pct > 0.0 && pct < GIR_WEAK_PCT {
    vec![Recommendation::new(
      "Iron Play",
      "🎪",
      "Work on Approach Shots",
      format!(
        "{:.0}% GIR rate needs improvement. Tour average is 60-65%. Focus on iron accuracy and distance control.",
        pct
      ),
      Priority::High,
    )
    .with_actions(&[
      "Practice with targets at driving range",
      "Work on yardage precision",
      "Focus on club selection",
    ])]
  } else {
    vec![]
  }
}

fn penalties_pass(recent: &[Round], _all: &[Round]) -> Vec<Recommendation> {
  let avg = match stats::mean(recent.iter().filter_map(|r| r.penalties.map(f64::from))) {
    Some(avg) => avg,
    None => return vec![],
  };

  if avg > PENALTIES_AVG_LIMIT {
    vec![Recommendation::new(
      "Course Management",
      "🧠",
      "Reduce Penalty Strokes",
      format!(
        "Averaging {:.1} penalties per round. Smart course management can save 2-3 strokes per round.",
        avg
      ),
      Priority::High,
    )
    .with_actions(&[
      "Play more conservatively off tees",
      "Avoid water hazards and OB",
      "Choose safer targets",
    ])]
  } else {
    vec![]
  }
}

fn wind_pass(recent: &[Round], _all: &[Round]) -> Vec<Recommendation> {
  let windy: Vec<&Round> = recent
    .iter()
    .filter(|r| matches!(r.wind, Some(Wind::Moderate) | Some(Wind::Strong)))
    .collect();
  let calm: Vec<&Round> = recent
    .iter()
    .filter(|r| matches!(r.wind, Some(Wind::Calm) | Some(Wind::Light)))
    .collect();

  // Both comparison sets must exist; an all-windy window has no baseline.
  let (windy_avg, calm_avg) = match (mean_score(&windy), mean_score(&calm)) {
    (Some(w), Some(c)) => (w, c),
    _ => return vec![],
  };

  if windy_avg - calm_avg > WIND_PENALTY_STROKES {
    vec![Recommendation::new(
      "Weather Adaptation",
      "🌬️",
      "Improve Wind Play",
      format!(
        "You score {:.0} strokes higher in wind. Practice wind management techniques.",
        windy_avg - calm_avg
      ),
      Priority::Medium,
    )
    .with_actions(&[
      "Practice lower ball flights",
      "Club up and swing easier",
      "Focus on balance and tempo",
    ])]
  } else {
    vec![]
  }
}

fn trend_pass(recent: &[Round], _all: &[Round]) -> Vec<Recommendation> {
  if recent.len() < MIN_ROUNDS_FOR_TREND {
    return vec![];
  }

  // Oldest to newest within the window
  let first = &recent[0];
  let last = &recent[recent.len() - 1];
  let delta = last.score as i64 - first.score as i64;

  if delta > TREND_STROKES {
    vec![Recommendation::new(
      "Performance Trend",
      "📈",
      "Scores Trending Up",
      "Recent rounds show score increase. Consider lessons or focused practice to address fundamentals."
        .to_string(),
      Priority::Medium,
    )]
  } else if delta < -TREND_STROKES {
    vec![Recommendation::new(
      "Performance Trend",
      "📉",
      "Great Improvement!",
      "Scores are trending down - keep up the excellent work! Your practice is paying off.".to_string(),
      Priority::Low,
    )]
  } else {
    vec![]
  }
}

/// ---------------------------------------------------------------------------
/// Full-History Rules
/// ---------------------------------------------------------------------------

fn course_difficulty_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  let hard: Vec<&Round> = all
    .iter()
    .filter(|r| r.slope_rating.is_some_and(|s| s > HIGH_SLOPE))
    .collect();
  let easy: Vec<&Round> = all
    .iter()
    .filter(|r| r.slope_rating.is_some_and(|s| s <= LOW_SLOPE))
    .collect();

  let (hard_avg, easy_avg) = match (mean_to_par(&hard), mean_to_par(&easy)) {
    (Some(h), Some(e)) => (h, e),
    _ => return vec![],
  };

  let delta = hard_avg - easy_avg;
  if delta > SLOPE_GAP_STROKES {
    vec![Recommendation::new(
      "Course Strategy",
      "🏔️",
      "Prepare for Difficult Courses",
      format!(
        "You average {:.0} strokes more over par on high-slope courses. Build a plan before taking on demanding layouts.",
        delta
      ),
      Priority::Medium,
    )
    .with_actions(&[
      "Study the scorecard before the round",
      "Favor position over distance on tight holes",
      "Take your medicine on the hardest holes",
    ])]
  } else {
    vec![]
  }
}

fn tee_selection_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  // Fixed color order keeps the best/worst pick deterministic on ties
  const TEE_ORDER: [TeeColor; 5] = [
    TeeColor::Black,
    TeeColor::Blue,
    TeeColor::White,
    TeeColor::Red,
    TeeColor::Gold,
  ];

  let mut averages: Vec<(TeeColor, f64)> = Vec::new();
  for tee in TEE_ORDER {
    let played: Vec<&Round> = all.iter().filter(|r| r.tees == tee).collect();
    if played.len() >= MIN_ROUNDS_PER_TEE {
      if let Some(avg) = mean_to_par(&played) {
        averages.push((tee, avg));
      }
    }
  }

  if averages.len() < 2 {
    return vec![];
  }

  let mut best = averages[0];
  let mut worst = averages[0];
  for &entry in &averages[1..] {
    if entry.1 < best.1 {
      best = entry;
    }
    if entry.1 > worst.1 {
      worst = entry;
    }
  }

  let delta = worst.1 - best.1;
  if delta > TEE_GAP_STROKES {
    vec![Recommendation::new(
      "Course Strategy",
      "🚩",
      "Rethink Your Tee Selection",
      format!(
        "You average {:.0} strokes better from the {} tees than the {} tees. Play the set that fits your game today.",
        delta,
        best.0.as_str(),
        worst.0.as_str()
      ),
      Priority::Medium,
    )
    .with_actions(&[
      "Pick tees by driving distance, not habit",
      "Move up a set when the course plays long",
    ])]
  } else {
    vec![]
  }
}

fn familiarity_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  let mut play_counts: HashMap<&str, usize> = HashMap::new();
  for round in all {
    *play_counts.entry(round.course.as_str()).or_insert(0) += 1;
  }

  let familiar: Vec<&Round> = all
    .iter()
    .filter(|r| play_counts[r.course.as_str()] >= FAMILIAR_PLAY_COUNT)
    .collect();
  let first_visits: Vec<&Round> = all
    .iter()
    .filter(|r| play_counts[r.course.as_str()] == 1)
    .collect();

  let (familiar_avg, new_avg) = match (mean_to_par(&familiar), mean_to_par(&first_visits)) {
    (Some(f), Some(n)) => (f, n),
    _ => return vec![],
  };

  let delta = new_avg - familiar_avg;
  if delta > FAMILIARITY_GAP_STROKES {
    vec![Recommendation::new(
      "Course Knowledge",
      "🗺️",
      "Scout New Courses",
      format!(
        "You score {:.0} strokes better on courses you have played three or more times. Do some homework before a first visit.",
        delta
      ),
      Priority::Medium,
    )
    .with_actions(&[
      "Review the layout before you play",
      "Note yardages and hazards hole by hole",
      "Play a practice nine when you can",
    ])]
  } else {
    vec![]
  }
}

fn hole_trouble_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  hole_trouble_with_threshold(all, TROUBLE_HOLE_MEAN_STROKES)
}

/// Trouble-hole detection with an explicit threshold, worst hole first.
pub fn hole_trouble_with_threshold(all: &[Round], threshold: f64) -> Vec<Recommendation> {
  let with_holes: Vec<&Round> = all.iter().filter(|r| r.hole_scores.is_some()).collect();
  if with_holes.len() < MIN_ROUNDS_WITH_HOLE_DATA {
    return vec![];
  }

  let mut trouble: Vec<(usize, f64, usize)> = Vec::new();
  for hole_idx in 0..HOLES_PER_ROUND {
    let strokes: Vec<f64> = with_holes
      .iter()
      .filter_map(|r| r.hole_scores.as_ref().and_then(|h| h.0[hole_idx]))
      .map(f64::from)
      .collect();

    if let Some(avg) = stats::mean(strokes.iter().copied()) {
      if avg > threshold {
        trouble.push((hole_idx + 1, avg, strokes.len()));
      }
    }
  }

  // Worst first; equal means keep hole order
  trouble.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
  trouble.truncate(TROUBLE_HOLE_REPORT_LIMIT);

  trouble
    .into_iter()
    .map(|(hole, avg, rounds)| {
      Recommendation::new(
        "Hole Strategy",
        "🕳️",
        &format!("Trouble on Hole {}", hole),
        format!(
          "Averaging {:.1} strokes on hole {} across {} rounds with hole-by-hole data. Plan a safer route from the tee.",
          avg, hole, rounds
        ),
        Priority::High,
      )
    })
    .collect()
}

fn front_back_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  let with_holes: Vec<&Round> = all.iter().filter(|r| r.hole_scores.is_some()).collect();
  if with_holes.len() < MIN_ROUNDS_WITH_HOLE_DATA {
    return vec![];
  }

  let fronts = with_holes
    .iter()
    .filter_map(|r| r.hole_scores.as_ref().and_then(|h| h.front_nine_total()))
    .map(f64::from);
  let backs = with_holes
    .iter()
    .filter_map(|r| r.hole_scores.as_ref().and_then(|h| h.back_nine_total()))
    .map(f64::from);

  let (front_avg, back_avg) = match (stats::mean(fronts), stats::mean(backs)) {
    (Some(f), Some(b)) => (f, b),
    _ => return vec![],
  };

  let delta = front_avg - back_avg;
  if delta > NINE_SPLIT_GAP_STROKES {
    vec![Recommendation::new(
      "Performance Trend",
      "⏳",
      "Slow Starts Are Costing Strokes",
      format!(
        "You average {:.0} more strokes on the front nine than the back nine. Build a warm-up routine before the first tee.",
        delta
      ),
      Priority::Medium,
    )
    .with_actions(&[
      "Arrive early enough to hit balls",
      "Chip and putt before the opening tee shot",
    ])]
  } else if delta < -NINE_SPLIT_GAP_STROKES {
    vec![Recommendation::new(
      "Performance Trend",
      "⏳",
      "Strong Starts, Fading Finishes",
      format!(
        "You average {:.0} more strokes on the back nine than the front nine. Save energy and focus for the closing holes.",
        -delta
      ),
      Priority::Medium,
    )
    .with_actions(&[
      "Eat and hydrate at the turn",
      "Slow your routine on the closing holes",
    ])]
  } else {
    vec![]
  }
}

fn format_gap_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  let nines: Vec<&Round> = all
    .iter()
    .filter(|r| r.round_type == RoundType::Nine)
    .collect();
  let eighteens: Vec<&Round> = all
    .iter()
    .filter(|r| r.round_type == RoundType::Eighteen)
    .collect();

  if nines.len() < MIN_ROUNDS_PER_FORMAT || eighteens.len() < MIN_ROUNDS_PER_FORMAT {
    return vec![];
  }

  let per_hole = |rounds: &[&Round]| {
    stats::mean(
      rounds
        .iter()
        .map(|r| r.to_par() as f64 / r.round_type.holes() as f64),
    )
  };

  let (nine_rate, eighteen_rate) = match (per_hole(&nines), per_hole(&eighteens)) {
    (Some(n), Some(e)) => (n, e),
    _ => return vec![],
  };

  let gap = nine_rate - eighteen_rate;
  if gap.abs() > FORMAT_GAP_PER_HOLE {
    let description = if gap > 0.0 {
      format!(
        "You average {:.1} more strokes per hole in 9-hole rounds than in 18-hole rounds. Bring full-round focus to short loops.",
        gap
      )
    } else {
      format!(
        "You average {:.1} more strokes per hole in 18-hole rounds than in 9-hole rounds. Pace yourself over the full eighteen.",
        -gap
      )
    };

    vec![Recommendation::new(
      "Performance Trend",
      "📊",
      "Nine and Eighteen Play Differently",
      description,
      Priority::Medium,
    )]
  } else {
    vec![]
  }
}

fn format_variety_pass(_recent: &[Round], all: &[Round]) -> Vec<Recommendation> {
  let has_nine = all.iter().any(|r| r.round_type == RoundType::Nine);
  let has_eighteen = all.iter().any(|r| r.round_type == RoundType::Eighteen);

  if has_nine && has_eighteen {
    return vec![];
  }

  let description = if has_eighteen {
    "Every round you have logged is an 18-hole round. An occasional 9-hole loop is a low-pressure way to work on scoring."
  } else {
    "Every round you have logged is a 9-hole round. A full eighteen will show how your game holds up over a complete round."
  };

  vec![Recommendation::new(
    "Variety",
    "🔀",
    "Mix Up Your Round Length",
    description.to_string(),
    Priority::Low,
  )]
}

/// ---------------------------------------------------------------------------
/// Shared Helpers
/// ---------------------------------------------------------------------------

fn mean_score(rounds: &[&Round]) -> Option<f64> {
  stats::mean(rounds.iter().map(|r| r.score as f64))
}

fn mean_to_par(rounds: &[&Round]) -> Option<f64> {
  stats::mean(rounds.iter().map(|r| r.to_par() as f64))
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
