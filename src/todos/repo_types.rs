use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

/// Todo record in the database.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Todo {
    pub id: i64,                        // assigned by the store, never reused
    pub title: String,
    pub description: Option<String>,    // nullable
    pub completed: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,     // refreshed on every mutation
}

/// Partial set of fields merged into an existing row.
///
/// `description` is three-state: `None` leaves it alone, `Some(None)` clears
/// it, `Some(Some(v))` sets it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub completed: Option<bool>,
}

impl TodoPatch {
    pub fn completed(completed: bool) -> Self {
        Self {
            completed: Some(completed),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.completed.is_none()
    }

    /// Merges the supplied fields into `todo`. Timestamps are the caller's job.
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
    }
}

/// Next `updated_at` for a row last touched at `previous`.
///
/// Rounded to microseconds to match Postgres `TIMESTAMPTZ`, and always at
/// least one microsecond past `previous`.
pub fn next_updated_at(previous: OffsetDateTime, now: OffsetDateTime) -> OffsetDateTime {
    let now = truncate_to_micros(now);
    let floor = previous + time::Duration::microseconds(1);
    if now > floor {
        now
    } else {
        floor
    }
}

pub fn truncate_to_micros(at: OffsetDateTime) -> OffsetDateTime {
    let micros = at.nanosecond() / 1_000 * 1_000;
    at.replace_nanosecond(micros).unwrap_or(at)
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn sample() -> Todo {
        let at = datetime!(2024-06-01 12:00 UTC);
        Todo {
            id: 1,
            title: "Buy milk".into(),
            description: Some("old".into()),
            completed: false,
            created_at: at,
            updated_at: at,
        }
    }

    #[test]
    fn empty_patch_changes_nothing() {
        let mut todo = sample();
        let patch = TodoPatch::default();
        assert!(patch.is_empty());
        patch.apply_to(&mut todo);
        assert_eq!(todo, sample());
    }

    #[test]
    fn explicit_null_clears_description() {
        let mut todo = sample();
        TodoPatch {
            description: Some(None),
            ..TodoPatch::default()
        }
        .apply_to(&mut todo);
        assert_eq!(todo.description, None);
        assert_eq!(todo.title, "Buy milk");
    }

    #[test]
    fn next_updated_at_is_strictly_later() {
        let prev = datetime!(2024-06-01 12:00:00.000001 UTC);
        // Clock went backwards: still moves forward.
        let earlier = datetime!(2024-06-01 11:59 UTC);
        assert!(next_updated_at(prev, earlier) > prev);
        assert!(next_updated_at(prev, prev) > prev);

        let later = datetime!(2024-06-01 12:05:00.123456789 UTC);
        assert_eq!(
            next_updated_at(prev, later),
            datetime!(2024-06-01 12:05:00.123456 UTC)
        );
    }

    #[test]
    fn todo_timestamps_serialize_as_rfc3339() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["created_at"], "2024-06-01T12:00:00Z");
        assert_eq!(json["description"], "old");
        let back: Todo = serde_json::from_value(json).unwrap();
        assert_eq!(back, sample());
    }
}
