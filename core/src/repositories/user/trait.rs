//! User repository trait defining the interface for user data persistence.
//!
//! Only the operations the verification workflows need are exposed: a lookup
//! by ID and one conditional flag update per channel. The conditional updates
//! are the commit point of a confirmation, so implementations must perform
//! them atomically (`UPDATE ... WHERE flag = false`).

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations
///
/// # Example Implementation
/// ```no_run
/// use async_trait::async_trait;
/// use uuid::Uuid;
/// use th_core::repositories::UserRepository;
/// use th_core::domain::User;
/// use th_core::errors::DomainError;
///
/// struct StaticUserRepository;
///
/// #[async_trait]
/// impl UserRepository for StaticUserRepository {
///     async fn find_by_id(&self, _id: Uuid) -> Result<Option<User>, DomainError> {
///         Ok(None)
///     }
///
///     async fn mark_email_verified(&self, _id: Uuid) -> Result<bool, DomainError> {
///         Ok(false)
///     }
///
///     async fn mark_phone_verified(&self, _id: Uuid) -> Result<bool, DomainError> {
///         Ok(false)
///     }
/// }
/// ```
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their unique identifier
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with this ID
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Set `is_email_verified` if it is not already set
    ///
    /// # Returns
    /// * `Ok(true)` - The flag was flipped by this call
    /// * `Ok(false)` - The flag was already set (or the user is gone)
    async fn mark_email_verified(&self, id: Uuid) -> Result<bool, DomainError>;

    /// Set `is_phone_verified` if it is not already set
    ///
    /// Same contract as [`UserRepository::mark_email_verified`].
    async fn mark_phone_verified(&self, id: Uuid) -> Result<bool, DomainError>;
}
