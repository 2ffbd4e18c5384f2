//! HTTP adapter for packing list and todo endpoints (nested under `/api/trips`).

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CreatePackingItemRequest, CreateTodoRequest, PackingItemResponse, TodoResponse,
    UpdatePackingItemRequest, UpdateTodoRequest,
};
pub use handlers::ChecklistHandlers;
pub use routes::checklist_routes;
