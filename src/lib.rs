pub mod catalog;
pub mod commands;
pub mod models;
pub mod recommend;
pub mod stats;
pub mod store;

#[cfg(test)]
pub mod test_utils;

pub use models::{Course, Recommendation, Round};
pub use store::AppState;
