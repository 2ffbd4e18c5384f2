//! PackingListHandler

use std::collections::HashSet;
use std::sync::Arc;
use tracing::info;

use crate::application::handlers::trip::load_owned_trip;
use crate::domain::checklist::{default_packing_list, PackingChanges, PackingItem};
use crate::domain::foundation::{DomainError, ErrorCode, PackingItemId, TripId, UserId};
use crate::ports::{PackingRepository, TripRepository};

#[derive(Debug, Clone)]
pub struct AddPackingItemCommand {
    pub category: String,
    pub item: String,
    pub quantity: i32,
    pub notes: Option<String>,
}

fn packing_item_not_found() -> DomainError {
    DomainError::not_found(ErrorCode::PackingItemNotFound, "Packing item not found")
}

pub struct PackingListHandler {
    trips: Arc<dyn TripRepository>,
    items: Arc<dyn PackingRepository>,
}

impl PackingListHandler {
    pub fn new(trips: Arc<dyn TripRepository>, items: Arc<dyn PackingRepository>) -> Self {
        Self { trips, items }
    }

    /// Items grouped by category, oldest first within a category.
    pub async fn list(&self, owner: &UserId, trip_id: &TripId) -> Result<Vec<PackingItem>, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        self.items.list_by_trip(&trip.id).await
    }

    pub async fn add(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        cmd: AddPackingItemCommand,
    ) -> Result<PackingItem, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let item = PackingItem::new(trip.id, &cmd.category, &cmd.item, cmd.quantity, cmd.notes)?;
        self.items.save(&item).await?;
        Ok(item)
    }

    pub async fn update(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        item_id: &PackingItemId,
        changes: PackingChanges,
    ) -> Result<PackingItem, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let mut item = self
            .items
            .find(&trip.id, item_id)
            .await?
            .ok_or_else(packing_item_not_found)?;
        item.apply(changes)?;
        self.items.update(&item).await?;
        Ok(item)
    }

    pub async fn delete(
        &self,
        owner: &UserId,
        trip_id: &TripId,
        item_id: &PackingItemId,
    ) -> Result<(), DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        self.items
            .find(&trip.id, item_id)
            .await?
            .ok_or_else(packing_item_not_found)?;
        self.items.delete(&trip.id, item_id).await
    }

    /// Adds the default list, skipping `(category, item)` pairs already
    /// present. Returns only the newly created items.
    pub async fn generate(
        &self,
        owner: &UserId,
        trip_id: &TripId,
    ) -> Result<Vec<PackingItem>, DomainError> {
        let trip = load_owned_trip(self.trips.as_ref(), trip_id, owner).await?;
        let existing = self.items.list_by_trip(&trip.id).await?;
        let present: HashSet<(&str, &str)> = existing
            .iter()
            .map(|i| (i.category.as_str(), i.item.as_str()))
            .collect();

        let mut created = Vec::new();
        for (category, name) in default_packing_list() {
            if present.contains(&(category, name)) {
                continue;
            }
            let item = PackingItem::new(trip.id, category, name, 1, None)?;
            self.items.save(&item).await?;
            created.push(item);
        }

        info!(trip_id = %trip.id, added = created.len(), "Packing list generated");
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryPackingRepository, InMemoryTripRepository};
    use crate::domain::trip::{NewTrip, Trip};

    async fn setup() -> (Trip, PackingListHandler) {
        let trips = Arc::new(InMemoryTripRepository::new());
        let trip = Trip::create(UserId::new(), NewTrip::named("Reykjavik")).unwrap();
        trips.save(&trip).await.unwrap();
        let handler = PackingListHandler::new(trips, Arc::new(InMemoryPackingRepository::new()));
        (trip, handler)
    }

    fn socks() -> AddPackingItemCommand {
        AddPackingItemCommand {
            category: "Clothing".to_string(),
            item: "Socks".to_string(),
            quantity: 4,
            notes: None,
        }
    }

    #[tokio::test]
    async fn add_update_delete() {
        let (trip, handler) = setup().await;

        let item = handler.add(&trip.owner, &trip.id, socks()).await.unwrap();
        let updated = handler
            .update(
                &trip.owner,
                &trip.id,
                &item.id,
                PackingChanges {
                    packed: Some(true),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert!(updated.packed);
        assert_eq!(updated.quantity, 4);

        handler.delete(&trip.owner, &trip.id, &item.id).await.unwrap();
        let err = handler
            .delete(&trip.owner, &trip.id, &item.id)
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::PackingItemNotFound);
    }

    #[tokio::test]
    async fn generate_skips_existing_pairs() {
        let (trip, handler) = setup().await;
        handler.add(&trip.owner, &trip.id, socks()).await.unwrap();

        let created = handler.generate(&trip.owner, &trip.id).await.unwrap();
        assert_eq!(created.len(), default_packing_list().len() - 1);
        assert!(!created.iter().any(|i| i.matches("Clothing", "Socks")));

        let again = handler.generate(&trip.owner, &trip.id).await.unwrap();
        assert!(again.is_empty());
        assert_eq!(
            handler.list(&trip.owner, &trip.id).await.unwrap().len(),
            default_packing_list().len()
        );
    }

    #[tokio::test]
    async fn invalid_quantity_is_rejected() {
        let (trip, handler) = setup().await;
        let err = handler
            .add(
                &trip.owner,
                &trip.id,
                AddPackingItemCommand {
                    quantity: 0,
                    ..socks()
                },
            )
            .await
            .unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
    }

    #[tokio::test]
    async fn foreign_trip_is_not_found() {
        let (trip, handler) = setup().await;
        let err = handler.list(&UserId::new(), &trip.id).await.unwrap_err();
        assert_eq!(err.code(), ErrorCode::TripNotFound);
    }
}
