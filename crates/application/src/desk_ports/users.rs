use async_trait::async_trait;
use servicedesk_core::{AppResult, Role, UserId};
use servicedesk_domain::{NewUser, UserRecord};

/// Backend port for the user directory.
///
/// Listing and role changes are restricted to administrators by the
/// backend as well; callers still gate them before issuing the call.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Lists every user account in backend order.
    async fn fetch_users(&self) -> AppResult<Vec<UserRecord>>;

    /// Replaces the role of a user.
    async fn update_user_role(&self, user_id: UserId, role: Role) -> AppResult<()>;

    /// Adds a user account and returns it as stored.
    async fn create_user(&self, user: NewUser) -> AppResult<UserRecord>;

    /// Finds an account by canonical email, used to establish a session.
    async fn find_user_by_email(&self, email: &str) -> AppResult<Option<UserRecord>>;
}
