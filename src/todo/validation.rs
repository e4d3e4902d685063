//! Todo input validation and normalization
//!
//! Titles are trimmed before storage. Descriptions are trimmed and an empty
//! result is stored as absent.

use super::models::{NewTodo, Priority, TodoChanges, TodoFilter};
use crate::account::validation::normalize_optional;
use crate::error::AppError;

pub const MAX_TITLE_CHARS: usize = 200;

fn check_title_length(title: &str) -> Result<(), AppError> {
    if title.chars().count() > MAX_TITLE_CHARS {
        return Err(AppError::validation(format!(
            "Todo title must be less than {} characters",
            MAX_TITLE_CHARS
        )));
    }
    Ok(())
}

fn parse_priority(raw: &str) -> Result<Priority, AppError> {
    raw.parse().map_err(|_| AppError::validation("Invalid priority"))
}

pub fn validate_new_todo(
    title: Option<&str>,
    description: Option<&str>,
    priority: Option<&str>,
) -> Result<NewTodo, AppError> {
    let title = title.unwrap_or_default();
    if title.trim().is_empty() {
        return Err(AppError::validation("Todo title is required"));
    }
    check_title_length(title)?;

    let priority = match priority {
        Some(p) => parse_priority(p)?,
        None => Priority::default(),
    };

    Ok(NewTodo {
        title: title.trim().to_string(),
        description: normalize_optional(description),
        priority,
    })
}

/// Outer `None` = not sent, `Some(None)` = sent as null
pub fn validate_changes(
    title: Option<Option<&str>>,
    description: Option<Option<&str>>,
    completed: Option<bool>,
    priority: Option<&str>,
) -> Result<TodoChanges, AppError> {
    let title = match title {
        Some(t) => {
            let t = t.unwrap_or_default();
            if t.trim().is_empty() {
                return Err(AppError::validation("Todo title cannot be empty"));
            }
            check_title_length(t)?;
            Some(t.trim().to_string())
        }
        None => None,
    };

    Ok(TodoChanges {
        title,
        description: description.map(normalize_optional),
        completed,
        priority: priority.map(parse_priority).transpose()?,
    })
}

/// `completed=true` selects completed todos; any other value selects open ones.
pub fn parse_filter(completed: Option<&str>, priority: Option<&str>) -> Result<TodoFilter, AppError> {
    Ok(TodoFilter {
        completed: completed.map(|c| c == "true"),
        priority: priority
            .filter(|p| !p.is_empty())
            .map(parse_priority)
            .transpose()?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_boundaries() {
        let exactly = "a".repeat(200);
        assert_eq!(
            validate_new_todo(Some(&exactly), None, None).unwrap().title,
            exactly
        );

        let too_long = "a".repeat(201);
        let err = validate_new_todo(Some(&too_long), None, None).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Todo title must be less than 200 characters"
        );
    }

    #[test]
    fn test_title_counts_characters_not_bytes() {
        let accented = "é".repeat(200);
        assert!(validate_new_todo(Some(&accented), None, None).is_ok());
    }

    #[test]
    fn test_blank_title_rejected() {
        for title in [None, Some(""), Some("   \t\n")] {
            let err = validate_new_todo(title, None, None).unwrap_err();
            assert_eq!(err.to_string(), "Todo title is required");
        }
    }

    #[test]
    fn test_create_normalizes() {
        let todo = validate_new_todo(Some("  Buy milk "), Some("   "), None).unwrap();
        assert_eq!(todo.title, "Buy milk");
        assert_eq!(todo.description, None);
        assert_eq!(todo.priority, Priority::Medium);

        let todo = validate_new_todo(Some("x"), Some(" 2 litres "), Some("urgent")).unwrap();
        assert_eq!(todo.description.as_deref(), Some("2 litres"));
        assert_eq!(todo.priority, Priority::Urgent);
    }

    #[test]
    fn test_create_bad_priority() {
        let err = validate_new_todo(Some("x"), None, Some("someday")).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_changes_title_rules() {
        let err = validate_changes(Some(Some(" ")), None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Todo title cannot be empty");
        let long = "b".repeat(201);
        let err = validate_changes(Some(Some(long.as_str())), None, None, None).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        let ok = validate_changes(Some(Some(" new ")), None, None, None).unwrap();
        assert_eq!(ok.title.as_deref(), Some("new"));
    }

    #[test]
    fn test_changes_null_title_rejected() {
        let err = validate_changes(Some(None), None, None, None).unwrap_err();
        assert_eq!(err.to_string(), "Todo title cannot be empty");
    }

    #[test]
    fn test_changes_description_states() {
        let untouched = validate_changes(None, None, None, None).unwrap();
        assert_eq!(untouched.description, None);

        let cleared = validate_changes(None, Some(None), None, None).unwrap();
        assert_eq!(cleared.description, Some(None));

        let emptied = validate_changes(None, Some(Some("  ")), None, None).unwrap();
        assert_eq!(emptied.description, Some(None));

        let set = validate_changes(None, Some(Some(" note ")), None, None).unwrap();
        assert_eq!(set.description, Some(Some("note".to_string())));
    }

    #[test]
    fn test_filter_parsing() {
        let f = parse_filter(Some("true"), Some("high")).unwrap();
        assert_eq!(f.completed, Some(true));
        assert_eq!(f.priority, Some(Priority::High));

        let f = parse_filter(Some("false"), None).unwrap();
        assert_eq!(f.completed, Some(false));

        let f = parse_filter(Some("yes"), Some("")).unwrap();
        assert_eq!(f.completed, Some(false));
        assert_eq!(f.priority, None);

        assert!(parse_filter(None, Some("whenever")).is_err());
    }
}
