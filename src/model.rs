use std::fmt;

use chrono::{DateTime, Local, Utc};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    pub id: TaskId,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creation date in local time, rendered with a strftime pattern.
    pub fn created_on(&self, date_format: &str) -> String {
        self.created_at
            .with_timezone(&Local)
            .format(date_format)
            .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn created_on_uses_local_calendar_day() {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 7, 12, 0, 0).unwrap();
        let task = Task {
            id: TaskId(1),
            text: "Buy milk".to_string(),
            completed: false,
            created_at,
        };
        let expected = created_at.with_timezone(&Local).format("%Y-%m-%d").to_string();
        assert_eq!(task.created_on("%Y-%m-%d"), expected);
    }

    #[test]
    fn task_id_displays_as_number() {
        assert_eq!(TaskId(42).to_string(), "42");
    }
}
