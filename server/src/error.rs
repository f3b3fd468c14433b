use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("sqlite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("store lock poisoned")]
    Poisoned,
    #[error("corrupt record: {0}")]
    Corrupt(String),
}

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("user not found")]
    NotFound,
    #[error("email {0} is already in use")]
    DuplicateEmail(String),
    #[error("password encoding failed: {0}")]
    Password(String),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("blocking worker failed: {0}")]
    Worker(String),
}

impl From<actix_web::error::BlockingError> for DirectoryError {
    fn from(why: actix_web::error::BlockingError) -> Self {
        DirectoryError::Worker(why.to_string())
    }
}
