use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::checklist::{PackingItem, Todo};
use crate::domain::foundation::{DomainError, ErrorCode, PackingItemId, TodoId, TripId};
use crate::ports::{PackingRepository, TodoRepository};

#[derive(Debug, Default, Clone)]
pub struct InMemoryPackingRepository {
    items: Arc<RwLock<HashMap<PackingItemId, PackingItem>>>,
}

impl InMemoryPackingRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn packing_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::PackingItemNotFound, "Packing item not found")
}

#[async_trait]
impl PackingRepository for InMemoryPackingRepository {
    async fn list_by_trip(&self, trip_id: &TripId) -> Result<Vec<PackingItem>, DomainError> {
        let mut items: Vec<PackingItem> = self
            .items
            .read()
            .await
            .values()
            .filter(|i| &i.trip_id == trip_id)
            .cloned()
            .collect();
        items.sort_by(|a, b| {
            a.category
                .cmp(&b.category)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(items)
    }

    async fn find(
        &self,
        trip_id: &TripId,
        id: &PackingItemId,
    ) -> Result<Option<PackingItem>, DomainError> {
        Ok(self
            .items
            .read()
            .await
            .get(id)
            .filter(|i| &i.trip_id == trip_id)
            .cloned())
    }

    async fn save(&self, item: &PackingItem) -> Result<(), DomainError> {
        self.items.write().await.insert(item.id, item.clone());
        Ok(())
    }

    async fn update(&self, item: &PackingItem) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        let existing = items.get_mut(&item.id).ok_or_else(packing_not_found)?;
        *existing = item.clone();
        Ok(())
    }

    async fn delete(&self, trip_id: &TripId, id: &PackingItemId) -> Result<(), DomainError> {
        let mut items = self.items.write().await;
        match items.get(id) {
            Some(item) if &item.trip_id == trip_id => {
                items.remove(id);
                Ok(())
            }
            _ => Err(packing_not_found()),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct InMemoryTodoRepository {
    todos: Arc<RwLock<HashMap<TodoId, Todo>>>,
}

impl InMemoryTodoRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn todo_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::TodoNotFound, "Todo not found")
}

#[async_trait]
impl TodoRepository for InMemoryTodoRepository {
    async fn list_by_trip(&self, trip_id: &TripId) -> Result<Vec<Todo>, DomainError> {
        let mut todos: Vec<Todo> = self
            .todos
            .read()
            .await
            .values()
            .filter(|t| &t.trip_id == trip_id)
            .cloned()
            .collect();
        todos.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then(a.created_at.cmp(&b.created_at))
        });
        Ok(todos)
    }

    async fn find(&self, trip_id: &TripId, id: &TodoId) -> Result<Option<Todo>, DomainError> {
        Ok(self
            .todos
            .read()
            .await
            .get(id)
            .filter(|t| &t.trip_id == trip_id)
            .cloned())
    }

    async fn save(&self, todo: &Todo) -> Result<(), DomainError> {
        self.todos.write().await.insert(todo.id, todo.clone());
        Ok(())
    }

    async fn update(&self, todo: &Todo) -> Result<(), DomainError> {
        let mut todos = self.todos.write().await;
        let existing = todos.get_mut(&todo.id).ok_or_else(todo_not_found)?;
        *existing = todo.clone();
        Ok(())
    }

    async fn delete(&self, trip_id: &TripId, id: &TodoId) -> Result<(), DomainError> {
        let mut todos = self.todos.write().await;
        match todos.get(id) {
            Some(todo) if &todo.trip_id == trip_id => {
                todos.remove(id);
                Ok(())
            }
            _ => Err(todo_not_found()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn packing_items_are_scoped_to_their_trip() {
        let repo = InMemoryPackingRepository::new();
        let trip = TripId::new();
        let item = PackingItem::new(trip, "Documents", "Passport", 1, None).unwrap();
        repo.save(&item).await.unwrap();

        assert!(repo.find(&trip, &item.id).await.unwrap().is_some());
        assert!(repo.find(&TripId::new(), &item.id).await.unwrap().is_none());
        assert!(repo.delete(&TripId::new(), &item.id).await.is_err());
        repo.delete(&trip, &item.id).await.unwrap();
        assert!(repo.list_by_trip(&trip).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn packing_list_is_grouped_by_category() {
        let repo = InMemoryPackingRepository::new();
        let trip = TripId::new();
        for (category, item) in [("Toiletries", "Toothbrush"), ("Documents", "Passport")] {
            repo.save(&PackingItem::new(trip, category, item, 1, None).unwrap())
                .await
                .unwrap();
        }

        let categories: Vec<String> = repo
            .list_by_trip(&trip)
            .await
            .unwrap()
            .into_iter()
            .map(|i| i.category)
            .collect();
        assert_eq!(categories, vec!["Documents", "Toiletries"]);
    }

    #[tokio::test]
    async fn todos_list_highest_priority_first() {
        let repo = InMemoryTodoRepository::new();
        let trip = TripId::new();
        repo.save(&Todo::new(trip, "Low", None, None, 0).unwrap())
            .await
            .unwrap();
        repo.save(&Todo::new(trip, "High", None, None, 2).unwrap())
            .await
            .unwrap();

        let titles: Vec<String> = repo
            .list_by_trip(&trip)
            .await
            .unwrap()
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["High", "Low"]);
    }

    #[tokio::test]
    async fn updating_missing_todo_is_not_found() {
        let repo = InMemoryTodoRepository::new();
        let todo = Todo::new(TripId::new(), "Book", None, None, 1).unwrap();
        let err = repo.update(&todo).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::TodoNotFound);
    }
}
