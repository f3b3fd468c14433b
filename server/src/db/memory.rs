use std::sync::{Mutex, MutexGuard};

use uuid::Uuid;

use crate::{
    error::StoreError,
    models::user::{User, UserSummary},
};

use super::{name_matches, same_email, UserStore};

/// Vector-backed store. Used by tests and handy for throwaway runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    users: Mutex<Vec<User>>,
}

impl MemoryStore {
    fn users(&self) -> Result<MutexGuard<'_, Vec<User>>, StoreError> {
        self.users.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl UserStore for MemoryStore {
    fn list(&self, name_filter: Option<&str>) -> Result<Vec<UserSummary>, StoreError> {
        Ok(self
            .users()?
            .iter()
            .filter(|u| name_matches(&u.name, name_filter))
            .map(User::summary)
            .collect())
    }

    fn find(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        Ok(self.users()?.iter().find(|u| u.id == *id).cloned())
    }

    fn insert(&self, user: &User) -> Result<(), StoreError> {
        let mut users = self.users()?;
        if users.iter().any(|u| u.id == user.id) {
            return Err(StoreError::Corrupt(format!("duplicate user id {}", user.id)));
        }
        users.push(user.clone());
        Ok(())
    }

    fn update(&self, id: &Uuid, name: &str, email: &str) -> Result<Option<User>, StoreError> {
        let mut users = self.users()?;
        Ok(users.iter_mut().find(|u| u.id == *id).map(|u| {
            u.name = name.to_owned();
            u.email = email.to_owned();
            u.clone()
        }))
    }

    fn delete(&self, id: &Uuid) -> Result<Option<User>, StoreError> {
        let mut users = self.users()?;
        Ok(users
            .iter()
            .position(|u| u.id == *id)
            .map(|pos| users.remove(pos)))
    }

    fn email_taken(&self, email: &str) -> Result<bool, StoreError> {
        Ok(self.users()?.iter().any(|u| same_email(&u.email, email)))
    }

    fn ping(&self) -> Result<(), StoreError> {
        self.users().map(|_| ())
    }
}
