//! HTTP handlers for packing list and todo endpoints.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};

use super::dto::{
    CreatePackingItemRequest, CreateTodoRequest, PackingItemResponse, TodoResponse,
    UpdatePackingItemRequest, UpdateTodoRequest,
};
use crate::adapters::http::dto::MessageResponse;
use crate::adapters::http::error::{parse_id, ApiError};
use crate::adapters::http::middleware::RequireAuth;
use crate::adapters::http::state::AppState;
use crate::application::handlers::checklist::{PackingListHandler, TodoListHandler};
use crate::domain::foundation::{PackingItemId, TodoId, TripId};

#[derive(Clone)]
pub struct ChecklistHandlers {
    packing: Arc<PackingListHandler>,
    todos: Arc<TodoListHandler>,
}

impl ChecklistHandlers {
    pub fn new(state: &AppState) -> Self {
        Self {
            packing: Arc::new(PackingListHandler::new(
                state.trips.clone(),
                state.packing.clone(),
            )),
            todos: Arc::new(TodoListHandler::new(state.trips.clone(), state.todos.clone())),
        }
    }
}

// Packing list

/// GET /api/trips/:id/packing
pub async fn list_packing_items(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<PackingItemResponse>>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let items = handlers.packing.list(&user.id, &trip_id).await?;
    Ok(Json(items.into_iter().map(PackingItemResponse::from).collect()))
}

/// POST /api/trips/:id/packing
pub async fn add_packing_item(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<CreatePackingItemRequest>, JsonRejection>,
) -> Result<Json<PackingItemResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let Json(req) = payload?;
    let item = handlers.packing.add(&user.id, &trip_id, req.into()).await?;
    Ok(Json(item.into()))
}

/// PUT /api/trips/:id/packing/:item_id
pub async fn update_packing_item(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, item_id)): Path<(String, String)>,
    payload: Result<Json<UpdatePackingItemRequest>, JsonRejection>,
) -> Result<Json<PackingItemResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let item_id: PackingItemId = parse_id(&item_id, "packing item")?;
    let Json(req) = payload?;
    let item = handlers
        .packing
        .update(&user.id, &trip_id, &item_id, req.into())
        .await?;
    Ok(Json(item.into()))
}

/// DELETE /api/trips/:id/packing/:item_id
pub async fn delete_packing_item(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, item_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let item_id: PackingItemId = parse_id(&item_id, "packing item")?;
    handlers.packing.delete(&user.id, &trip_id, &item_id).await?;
    Ok(Json(MessageResponse::new("Packing item deleted")))
}

/// POST /api/trips/:id/packing/generate
pub async fn generate_packing_list(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<PackingItemResponse>>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let items = handlers.packing.generate(&user.id, &trip_id).await?;
    Ok(Json(items.into_iter().map(PackingItemResponse::from).collect()))
}

// Todos

/// GET /api/trips/:id/todos
pub async fn list_todos(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let todos = handlers.todos.list(&user.id, &trip_id).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}

/// POST /api/trips/:id/todos
pub async fn add_todo(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
    payload: Result<Json<CreateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let Json(req) = payload?;
    let todo = handlers.todos.add(&user.id, &trip_id, req.into()).await?;
    Ok(Json(todo.into()))
}

/// PUT /api/trips/:id/todos/:todo_id
pub async fn update_todo(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, todo_id)): Path<(String, String)>,
    payload: Result<Json<UpdateTodoRequest>, JsonRejection>,
) -> Result<Json<TodoResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let todo_id: TodoId = parse_id(&todo_id, "todo")?;
    let Json(req) = payload?;
    let todo = handlers
        .todos
        .update(&user.id, &trip_id, &todo_id, req.into())
        .await?;
    Ok(Json(todo.into()))
}

/// DELETE /api/trips/:id/todos/:todo_id
pub async fn delete_todo(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path((trip_id, todo_id)): Path<(String, String)>,
) -> Result<Json<MessageResponse>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let todo_id: TodoId = parse_id(&todo_id, "todo")?;
    handlers.todos.delete(&user.id, &trip_id, &todo_id).await?;
    Ok(Json(MessageResponse::new("Todo deleted")))
}

/// POST /api/trips/:id/todos/generate
pub async fn generate_todos(
    State(handlers): State<ChecklistHandlers>,
    RequireAuth(user): RequireAuth,
    Path(trip_id): Path<String>,
) -> Result<Json<Vec<TodoResponse>>, ApiError> {
    let trip_id: TripId = parse_id(&trip_id, "trip")?;
    let todos = handlers.todos.generate(&user.id, &trip_id).await?;
    Ok(Json(todos.into_iter().map(TodoResponse::from).collect()))
}
