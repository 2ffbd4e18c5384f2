use chrono::NaiveDate;

use crate::domain::foundation::{Timestamp, TodoId, TripId, ValidationError};

/// Todo priority, 0 (low) to 2 (high).
pub type Priority = i16;

const MAX_PRIORITY: Priority = 2;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    pub id: TodoId,
    pub trip_id: TripId,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
    pub priority: Priority,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

fn check_priority(priority: Priority) -> Result<Priority, ValidationError> {
    if !(0..=MAX_PRIORITY).contains(&priority) {
        return Err(ValidationError::out_of_range(
            "priority",
            0,
            MAX_PRIORITY as i64,
            priority as i64,
        ));
    }
    Ok(priority)
}

fn check_title(title: &str) -> Result<String, ValidationError> {
    let title = title.trim();
    if title.is_empty() {
        return Err(ValidationError::empty_field("title"));
    }
    Ok(title.to_string())
}

impl Todo {
    pub fn new(
        trip_id: TripId,
        title: &str,
        description: Option<String>,
        due_date: Option<NaiveDate>,
        priority: Priority,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: TodoId::new(),
            trip_id,
            title: check_title(title)?,
            description,
            completed: false,
            due_date,
            completed_at: None,
            priority: check_priority(priority)?,
            created_at: Timestamp::now(),
        })
    }

    /// Completing stamps `completed_at`; reopening clears it.
    pub fn apply(&mut self, changes: TodoChanges) -> Result<(), ValidationError> {
        let title = match changes.title {
            Some(t) => check_title(&t)?,
            None => self.title.clone(),
        };
        let priority = match changes.priority {
            Some(p) => check_priority(p)?,
            None => self.priority,
        };

        self.title = title;
        self.priority = priority;
        if changes.description.is_some() {
            self.description = changes.description;
        }
        if changes.due_date.is_some() {
            self.due_date = changes.due_date;
        }
        match changes.completed {
            Some(true) if !self.completed => {
                self.completed = true;
                self.completed_at = Some(Timestamp::now());
            }
            Some(false) => {
                self.completed = false;
                self.completed_at = None;
            }
            _ => {}
        }
        Ok(())
    }
}

/// Standard pre-trip tasks with their priorities.
pub fn default_todos() -> Vec<(&'static str, Priority)> {
    vec![
        ("Book flights", 2),
        ("Reserve hotels/accommodation", 2),
        ("Purchase travel insurance", 1),
        ("Check passport validity (6+ months)", 2),
        ("Apply for visa (if required)", 2),
        ("Notify bank of travel dates", 1),
        ("Download offline maps", 0),
        ("Research local customs & etiquette", 0),
        ("Exchange currency", 1),
        ("Arrange airport transportation", 1),
    ]
}
