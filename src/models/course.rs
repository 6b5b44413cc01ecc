use serde::{Deserialize, Serialize};

use super::round::TeeColor;

/// Where a catalog entry came from, so provenance stays visible to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CourseSource {
  Local,
  Remote,
}

/// Rating data for one set of tees. Remote records often carry only part of
/// this, so everything past the tee color is optional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeeRating {
  pub tee: TeeColor,
  pub yardage: Option<u32>,
  pub rating: Option<f64>,
  pub slope: Option<u32>,
}

/// Catalog reference data for a course; used to pre-fill rating, slope, and
/// yardage on a round being drafted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
  pub id: String,
  pub name: String,
  pub location: String,
  pub par: u32,
  pub tees: Vec<TeeRating>,
  pub source: CourseSource,
}

impl Course {
  pub fn tee(&self, tee: TeeColor) -> Option<&TeeRating> {
    self.tees.iter().find(|t| t.tee == tee)
  }
}
