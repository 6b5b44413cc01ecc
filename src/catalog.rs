//! Course catalog: a small built-in table plus a best-effort remote lookup.
//!
//! The two providers sit behind one search front. Local entries always list
//! before remote ones so provenance stays visible, and every remote failure
//! (missing credential, network error, bad status, unparsable body) degrades
//! to "no remote results" - round entry never depends on the catalog.

use std::env;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::models::course::{Course, CourseSource, TeeRating};
use crate::models::round::TeeColor;

/// ---------------------------------------------------------------------------
/// Configuration Constants
/// ---------------------------------------------------------------------------

const COURSE_API_BASE: &str = "https://api.golfcourseapi.com/v1";
/// Quiet period after the last keystroke before a search goes out.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
const SEARCH_RESULT_CAP: usize = 10;
const MIN_QUERY_LEN: usize = 2;

/// ---------------------------------------------------------------------------
/// Configuration
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct CatalogConfig {
  pub api_key: String,
  pub base_url: String,
}

impl CatalogConfig {
  pub fn from_env() -> Result<Self, CatalogError> {
    // Pick up a local .env in development; a no-op everywhere else
    dotenvy::dotenv().ok();

    Ok(Self {
      api_key: env::var("COURSE_API_KEY")
        .map_err(|_| CatalogError::MissingConfig("COURSE_API_KEY".into()))?,
      base_url: env::var("COURSE_API_URL").unwrap_or_else(|_| COURSE_API_BASE.to_string()),
    })
  }
}

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum CatalogError {
  #[error("Missing configuration: {0}")]
  MissingConfig(String),

  #[error("HTTP request failed: {0}")]
  Request(String),

  #[error("Not authorized by the course API")]
  NotAuthorized,

  #[error("API error: {0}")]
  Api(String),
}

impl From<reqwest::Error> for CatalogError {
  fn from(e: reqwest::Error) -> Self {
    CatalogError::Request(e.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Local Provider
/// ---------------------------------------------------------------------------

/// The built-in course table. Small on purpose: it covers the courses the
/// catalog should resolve even when the remote API is unreachable.
pub fn local_courses() -> Vec<Course> {
  fn tee(color: TeeColor, yardage: u32, rating: f64, slope: u32) -> TeeRating {
    TeeRating {
      tee: color,
      yardage: Some(yardage),
      rating: Some(rating),
      slope: Some(slope),
    }
  }

  fn course(id: &str, name: &str, location: &str, par: u32, tees: Vec<TeeRating>) -> Course {
    Course {
      id: id.to_string(),
      name: name.to_string(),
      location: location.to_string(),
      par,
      tees,
      source: CourseSource::Local,
    }
  }

  vec![
    course(
      "pebble-beach",
      "Pebble Beach Golf Links",
      "Pebble Beach, CA",
      72,
      vec![
        tee(TeeColor::Black, 7075, 75.5, 145),
        tee(TeeColor::Blue, 6816, 74.9, 144),
        tee(TeeColor::White, 6116, 72.1, 135),
        tee(TeeColor::Red, 5198, 71.9, 130),
      ],
    ),
    course(
      "torrey-pines-south",
      "Torrey Pines (South)",
      "La Jolla, CA",
      72,
      vec![
        tee(TeeColor::Black, 7652, 78.1, 144),
        tee(TeeColor::Blue, 7051, 75.2, 138),
        tee(TeeColor::White, 6628, 72.9, 133),
        tee(TeeColor::Red, 5631, 68.5, 123),
      ],
    ),
    course(
      "torrey-pines-north",
      "Torrey Pines (North)",
      "La Jolla, CA",
      72,
      vec![
        tee(TeeColor::Black, 7258, 75.1, 134),
        tee(TeeColor::White, 6317, 70.4, 125),
        tee(TeeColor::Red, 5306, 66.2, 115),
      ],
    ),
    course(
      "bethpage-black",
      "Bethpage State Park (Black)",
      "Farmingdale, NY",
      71,
      vec![
        tee(TeeColor::Black, 7468, 77.5, 152),
        tee(TeeColor::Blue, 7065, 75.4, 148),
        tee(TeeColor::White, 6684, 73.6, 144),
      ],
    ),
    course(
      "pinehurst-no-2",
      "Pinehurst No. 2",
      "Pinehurst, NC",
      72,
      vec![
        tee(TeeColor::Black, 7588, 76.5, 138),
        tee(TeeColor::Blue, 7053, 74.1, 135),
        tee(TeeColor::White, 6307, 70.7, 126),
        tee(TeeColor::Red, 5401, 66.8, 117),
      ],
    ),
    course(
      "st-andrews-old",
      "Old Course at St Andrews",
      "St Andrews, Scotland",
      72,
      vec![
        tee(TeeColor::Blue, 6721, 73.1, 132),
        tee(TeeColor::White, 6387, 71.8, 129),
        tee(TeeColor::Red, 6032, 69.9, 125),
      ],
    ),
  ]
}

fn local_search(query: &str) -> Vec<Course> {
  let needle = query.to_lowercase();
  local_courses()
    .into_iter()
    .filter(|c| {
      c.name.to_lowercase().contains(&needle) || c.location.to_lowercase().contains(&needle)
    })
    .collect()
}

/// Rating data for a tee at a local catalog course, for pre-filling a draft.
pub fn lookup(course_id: &str, tee: TeeColor) -> Option<TeeRating> {
  local_courses()
    .into_iter()
    .find(|c| c.id == course_id)
    .and_then(|c| c.tees.into_iter().find(|t| t.tee == tee))
}

/// ---------------------------------------------------------------------------
/// Remote Provider
/// ---------------------------------------------------------------------------

/// Course record shape returned by the remote catalog.
#[derive(Debug, Deserialize)]
struct RemoteCourse {
  id: i64,
  name: String,
  #[serde(default)]
  city: Option<String>,
  #[serde(default)]
  state: Option<String>,
  #[serde(default)]
  country: Option<String>,
  #[serde(default)]
  par: Option<u32>,
  #[serde(default)]
  yardage: Option<u32>,
  #[serde(default)]
  rating: Option<f64>,
  #[serde(default)]
  slope: Option<u32>,
}

impl RemoteCourse {
  fn into_course(self) -> Course {
    let location = match (self.city, self.state) {
      (Some(city), Some(state)) => format!("{}, {}", city, state),
      (Some(city), None) => city,
      (None, _) => self.country.unwrap_or_default(),
    };

    // Remote records carry at most one set of numbers; surface it as the
    // default white tees
    let tees = if self.yardage.is_some() || self.rating.is_some() || self.slope.is_some() {
      vec![TeeRating {
        tee: TeeColor::White,
        yardage: self.yardage,
        rating: self.rating,
        slope: self.slope,
      }]
    } else {
      vec![]
    };

    Course {
      id: self.id.to_string(),
      name: self.name,
      location,
      par: self.par.unwrap_or(72),
      tees,
      source: CourseSource::Remote,
    }
  }
}

async fn remote_search(query: &str, config: &CatalogConfig) -> Result<Vec<Course>, CatalogError> {
  let mut url = Url::parse(&format!("{}/courses", config.base_url))
    .map_err(|e| CatalogError::Request(e.to_string()))?;
  url.query_pairs_mut().append_pair("name", query);

  let client = Client::new();
  let response = client
    .get(url)
    .header("Authorization", format!("Bearer {}", config.api_key))
    .send()
    .await?;

  if response.status() == reqwest::StatusCode::UNAUTHORIZED {
    return Err(CatalogError::NotAuthorized);
  }

  if !response.status().is_success() {
    let status = response.status();
    let error_text = response.text().await.unwrap_or_default();
    return Err(CatalogError::Api(format!(
      "Course search failed ({}): {}",
      status, error_text
    )));
  }

  let response_text = response.text().await?;

  let records: Vec<RemoteCourse> = serde_json::from_str(&response_text).map_err(|e| {
    eprintln!("Failed to parse course catalog response: {}", e);
    eprintln!(
      "Raw response (first 500 chars): {}",
      &response_text[..response_text.len().min(500)]
    );
    CatalogError::Api(format!("Failed to parse courses: {}", e))
  })?;

  Ok(records.into_iter().map(RemoteCourse::into_course).collect())
}

/// ---------------------------------------------------------------------------
/// Combined Search
/// ---------------------------------------------------------------------------

/// Search both providers with the credentials from the environment.
pub async fn search(query: &str) -> Vec<Course> {
  search_with_config(query, CatalogConfig::from_env().ok().as_ref()).await
}

/// Search both providers: local matches first, then remote, capped at 10.
/// No config means local-only; a failing remote lookup is logged and skipped.
pub async fn search_with_config(query: &str, config: Option<&CatalogConfig>) -> Vec<Course> {
  if query.trim().len() < MIN_QUERY_LEN {
    return vec![];
  }

  let mut results = local_search(query);

  if let Some(config) = config {
    match remote_search(query, config).await {
      Ok(remote) => results.extend(remote),
      Err(e) => eprintln!("Remote course lookup failed: {}", e),
    }
  }

  results.truncate(SEARCH_RESULT_CAP);
  results
}

/// ---------------------------------------------------------------------------
/// Debounced Search
/// ---------------------------------------------------------------------------

/// Serializes keystroke-driven searches: each call bumps a generation
/// counter, waits out the debounce window, and discards its own result if a
/// newer query was issued in the meantime. A stale response can therefore
/// never overwrite a newer one, regardless of network timing.
pub struct SearchDebouncer {
  generation: AtomicU64,
}

impl SearchDebouncer {
  pub fn new() -> Self {
    Self {
      generation: AtomicU64::new(0),
    }
  }

  /// Run a debounced search. None means the query was superseded; only the
  /// newest in-flight query resolves with results.
  pub async fn search(&self, query: &str, config: Option<&CatalogConfig>) -> Option<Vec<Course>> {
    let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

    tokio::time::sleep(Duration::from_millis(SEARCH_DEBOUNCE_MS)).await;
    if self.generation.load(Ordering::SeqCst) != generation {
      return None; // superseded while debouncing
    }

    let results = search_with_config(query, config).await;
    if self.generation.load(Ordering::SeqCst) != generation {
      return None; // superseded while the request was in flight
    }

    Some(results)
  }
}

impl Default for SearchDebouncer {
  fn default() -> Self {
    Self::new()
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
