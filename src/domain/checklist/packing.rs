use crate::domain::foundation::{PackingItemId, Timestamp, TripId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackingItem {
    pub id: PackingItemId,
    pub trip_id: TripId,
    pub category: String,
    pub item: String,
    pub packed: bool,
    pub quantity: i32,
    pub notes: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackingChanges {
    pub category: Option<String>,
    pub item: Option<String>,
    pub packed: Option<bool>,
    pub quantity: Option<i32>,
    pub notes: Option<String>,
}

fn required(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::empty_field(field));
    }
    Ok(value.to_string())
}

fn check_quantity(quantity: i32) -> Result<i32, ValidationError> {
    if !(1..=999).contains(&quantity) {
        return Err(ValidationError::out_of_range("quantity", 1, 999, quantity as i64));
    }
    Ok(quantity)
}

impl PackingItem {
    pub fn new(
        trip_id: TripId,
        category: &str,
        item: &str,
        quantity: i32,
        notes: Option<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            id: PackingItemId::new(),
            trip_id,
            category: required("category", category)?,
            item: required("item", item)?,
            packed: false,
            quantity: check_quantity(quantity)?,
            notes,
            created_at: Timestamp::now(),
        })
    }

    pub fn apply(&mut self, changes: PackingChanges) -> Result<(), ValidationError> {
        let category = match changes.category {
            Some(c) => required("category", &c)?,
            None => self.category.clone(),
        };
        let item = match changes.item {
            Some(i) => required("item", &i)?,
            None => self.item.clone(),
        };
        let quantity = match changes.quantity {
            Some(q) => check_quantity(q)?,
            None => self.quantity,
        };

        self.category = category;
        self.item = item;
        self.quantity = quantity;
        if let Some(packed) = changes.packed {
            self.packed = packed;
        }
        if changes.notes.is_some() {
            self.notes = changes.notes;
        }
        Ok(())
    }

    /// True when this item has the same category and name.
    pub fn matches(&self, category: &str, item: &str) -> bool {
        self.category == category && self.item == item
    }
}

/// Suggested packing list as `(category, item)` pairs.
pub fn default_packing_list() -> Vec<(&'static str, &'static str)> {
    const LIST: &[(&str, &[&str])] = &[
        (
            "Documents",
            &[
                "Passport/ID",
                "Travel insurance documents",
                "Hotel confirmations",
                "Flight tickets/boarding passes",
                "Emergency contacts list",
            ],
        ),
        (
            "Electronics",
            &["Phone charger", "Power adapter", "Camera", "Headphones"],
        ),
        (
            "Toiletries",
            &[
                "Toothbrush & toothpaste",
                "Deodorant",
                "Shampoo & conditioner",
                "Sunscreen",
                "Medications",
            ],
        ),
        (
            "Clothing",
            &[
                "Underwear",
                "Socks",
                "T-shirts",
                "Pants/shorts",
                "Comfortable walking shoes",
                "Pajamas",
            ],
        ),
        (
            "Miscellaneous",
            &["Reusable water bottle", "Snacks", "Travel pillow", "Hand sanitizer"],
        ),
    ];

    LIST.iter()
        .flat_map(|(category, items)| items.iter().map(move |item| (*category, *item)))
        .collect()
}
