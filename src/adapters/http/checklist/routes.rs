//! HTTP routes for checklist endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};

use super::handlers::{
    add_packing_item, add_todo, delete_packing_item, delete_todo, generate_packing_list,
    generate_todos, list_packing_items, list_todos, update_packing_item, update_todo,
    ChecklistHandlers,
};

pub fn checklist_routes(handlers: ChecklistHandlers) -> Router {
    Router::new()
        .route("/:id/packing", get(list_packing_items).post(add_packing_item))
        .route("/:id/packing/generate", post(generate_packing_list))
        .route(
            "/:id/packing/:item_id",
            put(update_packing_item).delete(delete_packing_item),
        )
        .route("/:id/todos", get(list_todos).post(add_todo))
        .route("/:id/todos/generate", post(generate_todos))
        .route("/:id/todos/:todo_id", put(update_todo).delete(delete_todo))
        .with_state(handlers)
}
