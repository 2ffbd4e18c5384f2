//! Checklist repository ports (packing items and todos).

use async_trait::async_trait;

use crate::domain::checklist::{PackingItem, Todo};
use crate::domain::foundation::{DomainError, PackingItemId, TodoId, TripId};

#[async_trait]
pub trait PackingRepository: Send + Sync {
    /// Items of a trip, grouped by category then in insertion order.
    async fn list_by_trip(&self, trip_id: &TripId) -> Result<Vec<PackingItem>, DomainError>;

    async fn find(
        &self,
        trip_id: &TripId,
        id: &PackingItemId,
    ) -> Result<Option<PackingItem>, DomainError>;

    async fn save(&self, item: &PackingItem) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `PackingItemNotFound` if the item doesn't exist
    async fn update(&self, item: &PackingItem) -> Result<(), DomainError>;

    async fn delete(&self, trip_id: &TripId, id: &PackingItemId) -> Result<(), DomainError>;
}

#[async_trait]
pub trait TodoRepository: Send + Sync {
    /// Todos of a trip, highest priority first.
    async fn list_by_trip(&self, trip_id: &TripId) -> Result<Vec<Todo>, DomainError>;

    async fn find(&self, trip_id: &TripId, id: &TodoId) -> Result<Option<Todo>, DomainError>;

    async fn save(&self, todo: &Todo) -> Result<(), DomainError>;

    /// # Errors
    ///
    /// - `TodoNotFound` if the todo doesn't exist
    async fn update(&self, todo: &Todo) -> Result<(), DomainError>;

    async fn delete(&self, trip_id: &TripId, id: &TodoId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_repositories_are_object_safe() {
        fn _packing(_repo: &dyn PackingRepository) {}
        fn _todos(_repo: &dyn TodoRepository) {}
    }
}
