use std::sync::Arc;

use actix_web::http::{header::HeaderValue, Uri};
use clap::{Parser, ValueEnum};

use crate::{
    db::{MemoryStore, SqliteStore, UserStore},
    directory::EmailPolicy,
    error::StoreError,
    password::{Argon2Encoder, PasswordEncoder, Plaintext},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum StoreKind {
    #[default]
    Sqlite,
    Memory,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum PasswordStorage {
    #[default]
    Plaintext,
    Argon2,
}

impl PasswordStorage {
    pub fn encoder(self) -> Arc<dyn PasswordEncoder> {
        match self {
            PasswordStorage::Plaintext => Arc::new(Plaintext),
            PasswordStorage::Argon2 => Arc::new(Argon2Encoder),
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(name = "user-directory", about = "Server-rendered user directory")]
pub struct Config {
    #[arg(long, env = "USERS_HOST", default_value = "127.0.0.1")]
    pub host: String,

    #[arg(long, env = "USERS_PORT", default_value_t = 8080)]
    pub port: u16,

    #[arg(
        long,
        env = "USERS_DATABASE",
        default_value = "./config/users.db",
        help = "SQLite file, or :memory: for a throwaway database"
    )]
    pub database: String,

    #[arg(long, env = "USERS_STORE", value_enum, default_value_t = StoreKind::Sqlite)]
    pub store: StoreKind,

    #[arg(long, env = "USERS_PASSWORD_STORAGE", value_enum, default_value_t = PasswordStorage::Plaintext)]
    pub password_storage: PasswordStorage,

    #[arg(long, env = "USERS_EMAIL_POLICY", value_enum, default_value_t = EmailPolicy::AllowDuplicates)]
    pub email_policy: EmailPolicy,

    #[arg(long, env = "USERS_CORS_ORIGIN", help = "Allow cross-origin requests from this origin")]
    pub cors_origin: Option<String>,
}

/// A `--cors-origin` value that actix-cors will accept.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CorsOrigin {
    Any,
    Exact(String),
}

impl Config {
    /// Checks `--cors-origin` up front; actix-cors panics on bad origins.
    pub fn cors(&self) -> Result<Option<CorsOrigin>, String> {
        let origin = match &self.cors_origin {
            None => return Ok(None),
            Some(o) => o.trim(),
        };
        if origin == "*" {
            return Ok(Some(CorsOrigin::Any));
        }

        let uri = origin
            .parse::<Uri>()
            .map_err(|why| format!("invalid CORS origin {:?}: {}", origin, why))?;
        if uri.scheme().is_none() || uri.host().is_none() || HeaderValue::from_str(origin).is_err() {
            return Err(format!(
                "invalid CORS origin {:?}: expected scheme://host[:port]",
                origin
            ));
        }
        Ok(Some(CorsOrigin::Exact(origin.to_owned())))
    }

    pub fn open_store(&self) -> Result<Arc<dyn UserStore>, StoreError> {
        match self.store {
            StoreKind::Sqlite => Ok(Arc::new(SqliteStore::open(&self.database)?)),
            StoreKind::Memory => Ok(Arc::new(MemoryStore::default())),
        }
    }
}
