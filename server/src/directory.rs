use std::sync::Arc;

use log::debug;
use uuid::Uuid;

use crate::{
    db::UserStore,
    error::DirectoryError,
    models::user::{User, UserSummary},
    password::{PasswordEncoder, Plaintext},
};

/// Whether two users may share an email address.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum EmailPolicy {
    #[default]
    AllowDuplicates,
    Unique,
}

/// Facade over the user collection. Cheap to clone; every clone shares the
/// same store.
#[derive(Clone)]
pub struct UserDirectory {
    store: Arc<dyn UserStore>,
    passwords: Arc<dyn PasswordEncoder>,
    email_policy: EmailPolicy,
}

/// Ids that do not parse can never match a record.
fn parse_id(id: &str) -> Result<Uuid, DirectoryError> {
    Uuid::parse_str(id).map_err(|_| DirectoryError::NotFound)
}

impl UserDirectory {
    pub fn new(store: Arc<dyn UserStore>) -> Self {
        UserDirectory {
            store,
            passwords: Arc::new(Plaintext),
            email_policy: EmailPolicy::default(),
        }
    }

    pub fn with_password_encoder(mut self, passwords: Arc<dyn PasswordEncoder>) -> Self {
        self.passwords = passwords;
        self
    }

    pub fn with_email_policy(mut self, email_policy: EmailPolicy) -> Self {
        self.email_policy = email_policy;
        self
    }

    pub fn list(&self, search: Option<&str>) -> Result<Vec<UserSummary>, DirectoryError> {
        let filter = search.filter(|s| !s.is_empty());
        Ok(self.store.list(filter)?)
    }

    pub fn get(&self, id: &str) -> Result<User, DirectoryError> {
        let id = parse_id(id)?;
        self.store.find(&id)?.ok_or(DirectoryError::NotFound)
    }

    pub fn create(&self, name: &str, email: &str, password: &str) -> Result<User, DirectoryError> {
        self.check_email(email)?;

        let user = User {
            id: Uuid::new_v4(),
            name: name.to_owned(),
            email: email.to_owned(),
            password: self.passwords.encode(password)?,
        };
        self.store.insert(&user)?;
        debug!("created user {}", user.id);
        Ok(user)
    }

    pub fn update(&self, id: &str, name: &str, email: &str) -> Result<User, DirectoryError> {
        let id = parse_id(id)?;
        self.store
            .update(&id, name, email)?
            .ok_or(DirectoryError::NotFound)
    }

    pub fn delete(&self, id: &str) -> Result<User, DirectoryError> {
        let id = parse_id(id)?;
        self.store.delete(&id)?.ok_or(DirectoryError::NotFound)
    }

    pub fn ping(&self) -> Result<(), DirectoryError> {
        Ok(self.store.ping()?)
    }

    fn check_email(&self, email: &str) -> Result<(), DirectoryError> {
        match self.email_policy {
            EmailPolicy::AllowDuplicates => Ok(()),
            EmailPolicy::Unique => {
                if self.store.email_taken(email)? {
                    Err(DirectoryError::DuplicateEmail(email.to_owned()))
                } else {
                    Ok(())
                }
            }
        }
    }
}
