//! Checklist module - packing items and pre-trip todos.

mod packing;
mod todo;

pub use packing::{default_packing_list, PackingChanges, PackingItem};
pub use todo::{default_todos, Priority, Todo, TodoChanges};
