use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  High,
  Medium,
  Low,
}

impl Priority {
  /// Sort weight: high outranks medium outranks low.
  pub fn weight(&self) -> u8 {
    match self {
      Priority::High => 3,
      Priority::Medium => 2,
      Priority::Low => 1,
    }
  }

  pub fn as_str(&self) -> &'static str {
    match self {
      Priority::High => "high",
      Priority::Medium => "medium",
      Priority::Low => "low",
    }
  }
}

/// A derived coaching suggestion. Never stored: the engine recomputes the
/// full list from the round history on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
  pub category: String,
  pub icon: String,
  pub title: String,
  pub description: String,
  pub priority: Priority,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub action_items: Option<Vec<String>>,
}

impl Recommendation {
  pub fn new(
    category: &str,
    icon: &str,
    title: &str,
    description: String,
    priority: Priority,
  ) -> Self {
    Self {
      category: category.to_string(),
      icon: icon.to_string(),
      title: title.to_string(),
      description,
      priority,
      action_items: None,
    }
  }

  pub fn with_actions(mut self, actions: &[&str]) -> Self {
    self.action_items = Some(actions.iter().map(|a| a.to_string()).collect());
    self
  }
}
