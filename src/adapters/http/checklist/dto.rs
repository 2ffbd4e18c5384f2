//! HTTP DTOs for checklist endpoints.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::application::handlers::checklist::{AddPackingItemCommand, AddTodoCommand};
use crate::domain::checklist::{PackingChanges, PackingItem, Priority, Todo, TodoChanges};
use crate::domain::foundation::Timestamp;

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreatePackingItemRequest {
    pub category: String,
    pub item: String,
    #[serde(default = "default_quantity")]
    pub quantity: i32,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<CreatePackingItemRequest> for AddPackingItemCommand {
    fn from(req: CreatePackingItemRequest) -> Self {
        Self {
            category: req.category,
            item: req.item,
            quantity: req.quantity,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdatePackingItemRequest {
    pub category: Option<String>,
    pub item: Option<String>,
    pub packed: Option<bool>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

impl From<UpdatePackingItemRequest> for PackingChanges {
    fn from(req: UpdatePackingItemRequest) -> Self {
        Self {
            category: req.category,
            item: req.item,
            packed: req.packed,
            quantity: req.quantity,
            notes: req.notes,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PackingItemResponse {
    pub id: String,
    pub trip_id: String,
    pub category: String,
    pub item: String,
    pub packed: bool,
    pub quantity: i32,
    pub notes: Option<String>,
}

impl From<PackingItem> for PackingItemResponse {
    fn from(item: PackingItem) -> Self {
        Self {
            id: item.id.to_string(),
            trip_id: item.trip_id.to_string(),
            category: item.category,
            item: item.item,
            packed: item.packed,
            quantity: item.quantity,
            notes: item.notes,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateTodoRequest {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub priority: Priority,
}

impl From<CreateTodoRequest> for AddTodoCommand {
    fn from(req: CreateTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            due_date: req.due_date,
            priority: req.priority,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct UpdateTodoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub completed: Option<bool>,
    pub due_date: Option<NaiveDate>,
    pub priority: Option<Priority>,
}

impl From<UpdateTodoRequest> for TodoChanges {
    fn from(req: UpdateTodoRequest) -> Self {
        Self {
            title: req.title,
            description: req.description,
            completed: req.completed,
            due_date: req.due_date,
            priority: req.priority,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TodoResponse {
    pub id: String,
    pub trip_id: String,
    pub title: String,
    pub description: Option<String>,
    pub completed: bool,
    pub due_date: Option<NaiveDate>,
    pub completed_at: Option<Timestamp>,
    pub priority: Priority,
}

impl From<Todo> for TodoResponse {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            trip_id: todo.trip_id.to_string(),
            title: todo.title,
            description: todo.description,
            completed: todo.completed,
            due_date: todo.due_date,
            completed_at: todo.completed_at,
            priority: todo.priority,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packing_item_defaults_to_one() {
        let req: CreatePackingItemRequest =
            serde_json::from_str(r#"{"category": "Clothing", "item": "Socks"}"#).unwrap();
        assert_eq!(req.quantity, 1);
        assert!(req.notes.is_none());
    }

    #[test]
    fn todo_defaults_to_low_priority() {
        let req: CreateTodoRequest =
            serde_json::from_str(r#"{"title": "Book hotel", "due_date": "2026-05-01"}"#).unwrap();
        assert_eq!(req.priority, 0);
        assert_eq!(req.due_date, NaiveDate::from_ymd_opt(2026, 5, 1));
    }

    #[test]
    fn partial_update_leaves_other_fields_unset() {
        let req: UpdateTodoRequest = serde_json::from_str(r#"{"completed": true}"#).unwrap();
        let changes = TodoChanges::from(req);
        assert_eq!(changes.completed, Some(true));
        assert!(changes.title.is_none());
    }
}
