//! Checklist handlers - per-trip packing list and pre-trip todos.
//!
//! Both resources hang off an owned trip; item ids from another trip are
//! reported as not found.

mod packing;
mod todos;

pub use packing::{AddPackingItemCommand, PackingListHandler};
pub use todos::{AddTodoCommand, TodoListHandler};
