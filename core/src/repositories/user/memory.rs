//! In-memory implementation of UserRepository
//!
//! Used by tests and by the `memory` database provider in development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

use super::trait_::UserRepository;

/// User repository backed by a process-local map
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    /// Create an empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a user
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    /// Reset both verified flags of a user
    pub async fn reset_verification(&self, id: Uuid) {
        if let Some(user) = self.users.write().await.get_mut(&id) {
            user.is_email_verified = false;
            user.is_phone_verified = false;
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn mark_email_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) if !user.is_email_verified => {
                user.is_email_verified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn mark_phone_verified(&self, id: Uuid) -> Result<bool, DomainError> {
        let mut users = self.users.write().await;
        match users.get_mut(&id) {
            Some(user) if !user.is_phone_verified => {
                user.is_phone_verified = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
