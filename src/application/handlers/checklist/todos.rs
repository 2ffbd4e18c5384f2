//! TodoListHandler

use chrono::NaiveDate;
use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::application::handlers::trip::load_owned_trip;
use crate::domain::checklist::{default_todos, Priority, Todo, TodoChanges};
use crate::domain::foundation::{DomainError, ErrorCode, TodoId, TripId, UserId};
use crate::ports::{TodoRepository, TripRepository};

#[derive(Debug, Clone)]
pub struct AddTodoCommand {
    pub title: String,
    pub description: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

fn todo_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::TodoNotFound, "Todo not found")
}

pub struct TodoListHandler {
    trips: Arc<dyn TripRepository>,
    todos: Arc<dyn TodoRepository>,
}

impl TodoListHandler {
    pub fn new(trips: Arc<dyn TripRepository>, todos: Arc<dyn TodoRepository>) -> Self {
        Self { trips, todos }
    }

    /// Highest priority first.
    pub async fn list(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<Todo>, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        self.todos.list_by_trip(&trip.id).await
    }

    pub async fn add(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        cmd: AddTodoCommand,
    ) -> Result<Todo, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let todo = Todo::new(trip.id, &cmd.title, cmd.description, cmd.due_date, cmd.priority)?;
        self.todos.save(&todo).await?;
        Ok(todo)
    }

    pub async fn update(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        todo_id: &TodoId,
        changes: TodoChanges,
    ) -> Result<Todo, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let mut todo = self
            .todos
            .find(&trip.id, todo_id)
            .await?
            .ok_or_else(todo_not_found)?;
        todo.apply(changes)?;
        self.todos.update(&todo).await?;
        Ok(todo)
    }

    pub async fn delete(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        todo_id: &TodoId,
    ) -> Result<(), DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        self.todos
            .find(&trip.id, todo_id)
            .await?
            .ok_or_else(todo_not_found)?;
        self.todos.delete(&trip.id, todo_id).await
    }

    /// Adds the standard pre-trip tasks whose titles are not present yet.
    pub async fn generate(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<Todo>, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let existing = self.todos.list_by_trip(&trip.id).await?;
        let titles: HashSet<&str> = existing.iter().map(|t| t.title.as_str()).collect();

        let mut created = Vec::new();
        for (title, priority) in default_todos() {
            if titles.contains(title) {
                continue;
            }
            let todo = Todo::new(trip.id, title, None, None, priority)?;
            self.todos.save(&todo).await?;
            created.push(todo);
        }

        info!(trip_id = %trip.id, added = created.len(), "Todo list generated");
        Ok(created)
    }
}
