//! Todo data model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;
use uuid::Uuid;

/// Todo priority, stored and serialized in uppercase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Priority {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Urgent => "URGENT",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid priority: '{0}' (expected LOW, MEDIUM, HIGH or URGENT)")]
pub struct ParsePriorityError(pub String);

impl FromStr for Priority {
    type Err = ParsePriorityError;

    /// Case-insensitive
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            "URGENT" => Ok(Self::Urgent),
            _ => Err(ParsePriorityError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: Uuid,
    #[schema(example = "Buy milk")]
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub priority: Priority,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Validated creation input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTodo {
    pub title: String,
    pub description: Option<String>,
    pub priority: Priority,
}

/// Validated partial update. `None` leaves the field untouched;
/// `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

impl TodoChanges {
    pub fn apply_to(&self, todo: &mut Todo) {
        if let Some(title) = &self.title {
            todo.title = title.clone();
        }
        if let Some(description) = &self.description {
            todo.description = description.clone();
        }
        if let Some(completed) = self.completed {
            todo.completed = completed;
        }
        if let Some(priority) = self.priority {
            todo.priority = priority;
        }
    }
}

/// Optional equality predicates for listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TodoFilter {
    pub completed: Option<bool>,
    pub priority: Option<Priority>,
}

impl TodoFilter {
    pub fn matches(&self, todo: &Todo) -> bool {
        self.completed.is_none_or(|c| todo.completed == c)
            && self.priority.is_none_or(|p| todo.priority == p)
    }
}

/// Incomplete first, then newest first
pub fn sort_for_listing(todos: &mut [Todo]) {
    todos.sort_by(|a, b| {
        a.completed
            .cmp(&b.completed)
            .then_with(|| b.created_at.cmp(&a.created_at))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn todo(completed: bool, age_secs: i64) -> Todo {
        let created = Utc::now() - Duration::seconds(age_secs);
        Todo {
            id: Uuid::new_v4(),
            title: format!("t{}", age_secs),
            description: None,
            completed,
            priority: Priority::Medium,
            created_at: created,
            updated_at: created,
            user_id: Uuid::nil(),
        }
    }

    #[test]
    fn test_priority_parse_case_insensitive() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert_eq!("Urgent".parse::<Priority>().unwrap(), Priority::Urgent);
        assert_eq!("LOW".parse::<Priority>().unwrap(), Priority::Low);
        assert!("critical".parse::<Priority>().is_err());
    }

    #[test]
    fn test_priority_serializes_uppercase() {
        assert_eq!(serde_json::to_value(Priority::High).unwrap(), "HIGH");
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_todo_json_is_camel_case() {
        let json = serde_json::to_value(todo(false, 0)).unwrap();
        assert!(json.get("createdAt").is_some());
        assert!(json.get("userId").is_some());
        assert!(json["description"].is_null());
        assert_eq!(json["priority"], "MEDIUM");
    }

    #[test]
    fn test_listing_order() {
        let old_open = todo(false, 300);
        let new_open = todo(false, 10);
        let old_done = todo(true, 200);
        let new_done = todo(true, 5);
        let mut todos = vec![
            old_done.clone(),
            old_open.clone(),
            new_done.clone(),
            new_open.clone(),
        ];
        sort_for_listing(&mut todos);
        let ids: Vec<Uuid> = todos.iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![new_open.id, old_open.id, new_done.id, old_done.id]);
    }

    #[test]
    fn test_filter_matches() {
        let mut t = todo(true, 0);
        t.priority = Priority::High;
        assert!(TodoFilter::default().matches(&t));
        let f = TodoFilter {
            completed: Some(true),
            priority: Some(Priority::High),
        };
        assert!(f.matches(&t));
        let f = TodoFilter {
            completed: Some(false),
            priority: None,
        };
        assert!(!f.matches(&t));
    }

    #[test]
    fn test_changes_apply_only_present_fields() {
        let mut t = todo(false, 0);
        t.description = Some("keep".into());
        TodoChanges {
            completed: Some(true),
            ..Default::default()
        }
        .apply_to(&mut t);
        assert!(t.completed);
        assert_eq!(t.description.as_deref(), Some("keep"));

        TodoChanges {
            description: Some(None),
            ..Default::default()
        }
        .apply_to(&mut t);
        assert_eq!(t.description, None);
    }
}
