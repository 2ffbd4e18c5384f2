//! Shared application state - the wired ports behind every router.

use std::sync::Arc;

use sqlx::PgPool;

use crate::adapters::memory::{
    InMemoryChatRepository, InMemoryItineraryRepository, InMemoryPackingRepository,
    InMemoryTodoRepository, InMemoryTripRepository, InMemoryUserRepository,
};
use crate::adapters::postgres::{
    PostgresChatRepository, PostgresItineraryRepository, PostgresPackingRepository,
    PostgresTodoRepository, PostgresTripRepository, PostgresUserRepository,
};
use crate::ports::{
    AIProvider, ChatRepository, CompletionParams, IdentityVerifier, ItineraryRepository,
    PackingRepository, SessionValidator, TodoRepository, TokenIssuer, TripRepository,
    UserRepository,
};

/// Default bound of the per-request event channel of the streaming route.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub trips: Arc<dyn TripRepository>,
    pub itineraries: Arc<dyn ItineraryRepository>,
    pub packing: Arc<dyn PackingRepository>,
    pub todos: Arc<dyn TodoRepository>,
    pub chats: Arc<dyn ChatRepository>,
    pub ai_provider: Arc<dyn AIProvider>,
    pub completion: CompletionParams,
    pub session_validator: Arc<dyn SessionValidator>,
    pub token_issuer: Arc<dyn TokenIssuer>,
    pub identity_verifier: Arc<dyn IdentityVerifier>,
    pub channel_capacity: usize,
}

impl AppState {
    /// State backed by in-memory repositories.
    ///
    /// `auth` both issues and validates access tokens.
    pub fn in_memory<A>(
        ai_provider: Arc<dyn AIProvider>,
        auth: Arc<A>,
        identity_verifier: Arc<dyn IdentityVerifier>,
    ) -> Self
    where
        A: SessionValidator + TokenIssuer + 'static,
    {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            trips: Arc::new(InMemoryTripRepository::new()),
            itineraries: Arc::new(InMemoryItineraryRepository::new()),
            packing: Arc::new(InMemoryPackingRepository::new()),
            todos: Arc::new(InMemoryTodoRepository::new()),
            chats: Arc::new(InMemoryChatRepository::new()),
            ai_provider,
            completion: CompletionParams::default(),
            session_validator: auth.clone(),
            token_issuer: auth,
            identity_verifier,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    /// State backed by PostgreSQL repositories sharing `pool`.
    pub fn postgres<A>(
        pool: PgPool,
        ai_provider: Arc<dyn AIProvider>,
        auth: Arc<A>,
        identity_verifier: Arc<dyn IdentityVerifier>,
    ) -> Self
    where
        A: SessionValidator + TokenIssuer + 'static,
    {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            trips: Arc::new(PostgresTripRepository::new(pool.clone())),
            itineraries: Arc::new(PostgresItineraryRepository::new(pool.clone())),
            packing: Arc::new(PostgresPackingRepository::new(pool.clone())),
            todos: Arc::new(PostgresTodoRepository::new(pool.clone())),
            chats: Arc::new(PostgresChatRepository::new(pool)),
            ai_provider,
            completion: CompletionParams::default(),
            session_validator: auth.clone(),
            token_issuer: auth,
            identity_verifier,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }

    pub fn with_completion(mut self, params: CompletionParams) -> Self {
        self.completion = params;
        self
    }

    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }
}
