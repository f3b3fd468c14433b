use uuid::Uuid;

use crate::{
    error::StoreError,
    models::user::{User, UserSummary},
};

pub mod memory;
pub mod users;

pub use memory::MemoryStore;
pub use users::SqliteStore;

/// Persistence seam for the user collection.
///
/// Implementations are synchronous; callers on the async side move them onto
/// the blocking pool.
pub trait UserStore: Send + Sync {
    /// Projections of every user whose name contains `name_filter`
    /// (case-insensitive), in natural storage order.
    fn list(&self, name_filter: Option<&str>) -> Result<Vec<UserSummary>, StoreError>;

    fn find(&self, id: &Uuid) -> Result<Option<User>, StoreError>;

    fn insert(&self, user: &User) -> Result<(), StoreError>;

    /// Replaces name and email. `None` when no record has `id`.
    fn update(&self, id: &Uuid, name: &str, email: &str) -> Result<Option<User>, StoreError>;

    /// Removes the record and hands it back. `None` when no record has `id`.
    fn delete(&self, id: &Uuid) -> Result<Option<User>, StoreError>;

    fn email_taken(&self, email: &str) -> Result<bool, StoreError>;

    fn ping(&self) -> Result<(), StoreError>;
}

pub(crate) fn name_matches(name: &str, filter: Option<&str>) -> bool {
    match filter {
        None => true,
        Some(f) => name.to_lowercase().contains(&f.to_lowercase()),
    }
}

/// Emails compare equal ignoring case, with Unicode folding.
pub(crate) fn same_email(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}
