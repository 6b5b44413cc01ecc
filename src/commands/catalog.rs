use crate::catalog;
use crate::models::course::{Course, TeeRating};
use crate::models::round::TeeColor;

/// Course search for the entry form's typeahead: local table first, then the
/// remote catalog when credentials are configured. Never fails - a broken
/// remote lookup just means fewer results.
pub async fn search_courses(query: &str) -> Result<Vec<Course>, String> {
  Ok(catalog::search(query).await)
}

/// Rating, slope, and yardage for a catalog course and tee, used to pre-fill
/// a draft round when the user picks a course.
pub async fn lookup_course_tee(
  course_id: &str,
  tee: TeeColor,
) -> Result<Option<TeeRating>, String> {
  Ok(catalog::lookup(course_id, tee))
}
